//! Integration tests for the public driver API.
//!
//! A small plane strategy stands in for a real shape fitter; the clouds are
//! synthetic and seeded, so every expectation below is deterministic.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ransac3d::types::point;
use ransac3d::*;

/// Plane `ax + by + cz + d = 0` through three sampled points, unit normal.
struct PlaneStrategy;

impl FitStrategy for PlaneStrategy {
    type Equation = [f64; 4];

    fn iteration(
        &self,
        random: &mut RandomSource,
        points: &PointCloud,
        threshold: f64,
    ) -> TrialResult<[f64; 4]> {
        let Some(sample) = random.next_index_sample(points.nrows(), 3) else {
            return TrialResult::degenerate();
        };

        let p0 = point(points, sample[0]);
        let normal = (point(points, sample[1]) - p0).cross(&(point(points, sample[2]) - p0));
        if normal.norm() < 1e-12 {
            return TrialResult::degenerate();
        }
        let normal = normal.normalize();
        let d = -normal.dot(&p0.coords);

        let inliers = (0..points.nrows())
            .filter(|&i| (normal.dot(&point(points, i).coords) + d).abs() <= threshold)
            .collect();
        TrialResult::new([normal.x, normal.y, normal.z, d], inliers)
    }
}

/// `n_plane` points on z = 0.3x - 0.2y + 0.5 followed by `n_outliers`
/// points drawn uniformly from the cube [-1, 1]^3.
fn plane_with_outliers(n_plane: usize, n_outliers: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = PointCloud::zeros(n_plane + n_outliers, 3);

    for i in 0..n_plane {
        let x = rng.gen_range(-1.0..1.0);
        let y = rng.gen_range(-1.0..1.0);
        points[(i, 0)] = x;
        points[(i, 1)] = y;
        points[(i, 2)] = 0.3 * x - 0.2 * y + 0.5;
    }
    for i in n_plane..(n_plane + n_outliers) {
        for j in 0..3 {
            points[(i, j)] = rng.gen_range(-1.0..1.0);
        }
    }
    points
}

fn seeded(seed: u64, workers: usize) -> ParallelRansac<PlaneStrategy> {
    let settings = RansacSettings::default()
        .with_seed(seed)
        .with_workers(workers);
    ParallelRansac::with_settings(PlaneStrategy, settings).expect("pool should build")
}

#[test]
fn test_plane_with_outliers_is_recovered() {
    let points = plane_with_outliers(100, 10, 42);
    let result = seeded(1, 4).fit(&points, 0.01, 200).unwrap();

    assert!(
        result.inlier_count() >= 95,
        "expected at least 95 inliers, got {}",
        result.inlier_count()
    );
    assert_eq!(result.iterations, 200);

    // The recovered normal is parallel to (0.3, -0.2, -1).
    let [a, b, c, _] = result.equation.expect("a plane should be found");
    let expected = nalgebra::Vector3::new(0.3, -0.2, -1.0).normalize();
    let cosine = (a * expected.x + b * expected.y + c * expected.z).abs();
    assert_relative_eq!(cosine, 1.0, epsilon = 1e-6);
}

#[test]
fn test_inliers_are_unique_and_in_range() {
    let points = plane_with_outliers(60, 40, 3);
    let result = seeded(9, 2).fit(&points, 0.05, 300).unwrap();

    assert!(result.inlier_count() <= points.nrows());
    assert!(result.inliers.iter().all(|&i| i < points.nrows()));
    assert!(result.inliers.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_cloud_yields_empty_result() {
    let result = seeded(0, 2)
        .fit(&PointCloud::zeros(0, 3), 0.05, 50)
        .unwrap();

    let (equation, inliers) = result.into_parts();
    assert!(equation.is_none());
    assert!(inliers.is_empty());
}

#[test]
fn test_zero_iterations_yield_empty_result() {
    let points = plane_with_outliers(20, 0, 1);
    let result = seeded(0, 2).fit(&points, 0.05, 0).unwrap();
    assert_eq!(result, FitResult::empty());
}

#[test]
fn test_too_few_points_is_not_an_error() {
    let points = PointCloud::from_row_slice(2, 3, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    let result = seeded(0, 2).fit(&points, 0.05, 20).unwrap();

    assert!(result.equation.is_none());
    assert!(result.inliers.is_empty());
    assert_eq!(result.iterations, 20);
}

#[test]
fn test_sequential_fits_are_bit_identical() {
    let points = plane_with_outliers(80, 30, 5);

    let first = seeded(123, 1).fit(&points, 0.02, 100).unwrap();
    let second = seeded(123, 1).fit(&points, 0.02, 100).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_pool_size_does_not_change_best_inlier_count() {
    let points = plane_with_outliers(50, 50, 8);

    let counts: Vec<usize> = [1, 2, 8]
        .into_iter()
        .map(|workers| seeded(77, workers).fit(&points, 0.02, 120).unwrap().inlier_count())
        .collect();
    assert_eq!(counts[0], counts[1]);
    assert_eq!(counts[0], counts[2]);
}

#[test]
fn test_best_matches_sequential_reference() {
    let points = plane_with_outliers(30, 30, 11);
    let ransac = seeded(2, 4);
    let result = ransac.fit(&points, 0.02, 80).unwrap();

    // Re-run every trial from its own seed and take the first maximum.
    let mut reference = ResultAggregator::new();
    for trial in 0..80 {
        let mut random = RandomSource::for_trial(ransac.master_seed(), trial);
        reference.offer(trial, PlaneStrategy.iteration(&mut random, &points, 0.02));
    }
    assert_eq!(result, reference.finish());
}

#[test]
fn test_default_threshold_and_budget() {
    let points = plane_with_outliers(40, 5, 21);
    let result = seeded(4, 0).fit_default(&points).unwrap();

    assert_eq!(result.iterations, 5000);
    assert!(result.inlier_count() >= 40);
}

#[test]
fn test_invalid_input_is_reported() {
    let ransac = seeded(0, 1);

    let err = ransac.fit(&plane_with_outliers(10, 0, 0), -0.01, 10).unwrap_err();
    assert!(matches!(err, RansacError::InvalidThreshold { .. }));

    let flat = PointCloud::zeros(10, 2);
    let err = ransac.fit(&flat, 0.05, 10).unwrap_err();
    assert!(matches!(err, RansacError::InvalidDimension { columns: 2 }));
    assert_eq!(
        err.to_string(),
        "point cloud must have 3 columns (x, y, z), got 2"
    );
}

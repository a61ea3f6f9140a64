//! Example: fitting a sphere to a noisy cloud with the parallel driver.
//!
//! Run with `RUST_LOG=ransac3d=trace` to see every trial.

use nalgebra::{Matrix3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ransac3d::types::point;
use ransac3d::{
    FitStrategy, ParallelRansac, PointCloud, RandomSource, RansacSettings, TrialResult,
};
use tracing_subscriber::EnvFilter;

/// Sphere through four sampled points, as `[cx, cy, cz, radius]`.
struct SphereStrategy;

impl FitStrategy for SphereStrategy {
    type Equation = [f64; 4];

    fn iteration(
        &self,
        random: &mut RandomSource,
        points: &PointCloud,
        threshold: f64,
    ) -> TrialResult<[f64; 4]> {
        let Some(sample) = random.next_index_sample(points.nrows(), 4) else {
            return TrialResult::degenerate();
        };
        let p: Vec<Vector3<f64>> = sample.iter().map(|&i| point(points, i).coords).collect();

        // |p_i - c|^2 = r^2 for all i; subtracting the first equation leaves
        // a linear system in c.
        let a = Matrix3::from_rows(&[
            (2.0 * (p[1] - p[0])).transpose(),
            (2.0 * (p[2] - p[0])).transpose(),
            (2.0 * (p[3] - p[0])).transpose(),
        ]);
        let b = Vector3::new(
            p[1].norm_squared() - p[0].norm_squared(),
            p[2].norm_squared() - p[0].norm_squared(),
            p[3].norm_squared() - p[0].norm_squared(),
        );
        let Some(center) = a.lu().solve(&b) else {
            return TrialResult::degenerate();
        };
        let radius = (p[0] - center).norm();

        let inliers = (0..points.nrows())
            .filter(|&i| ((point(points, i).coords - center).norm() - radius).abs() <= threshold)
            .collect();
        TrialResult::new([center.x, center.y, center.z, radius], inliers)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ransac3d=debug")),
        )
        .with_thread_ids(true)
        .init();

    println!("=== Parallel Sphere Fitting Example ===\n");

    let n_inliers = 400;
    let n_outliers = 150;
    let center = Vector3::new(1.0, -2.0, 0.5);
    let radius = 3.0;

    let mut rng = StdRng::seed_from_u64(2024);
    let mut random = RandomSource::from_seed(2024);
    let mut points = PointCloud::zeros(n_inliers + n_outliers, 3);

    for i in 0..n_inliers {
        let noise = rng.gen_range(-0.02..0.02);
        let p = center + random.unit_vector() * (radius + noise);
        points.row_mut(i).copy_from(&p.transpose());
    }
    for i in n_inliers..(n_inliers + n_outliers) {
        for j in 0..3 {
            points[(i, j)] = rng.gen_range(-6.0..6.0);
        }
    }

    println!(
        "True sphere: center ({:.2}, {:.2}, {:.2}), radius {:.2}",
        center.x, center.y, center.z, radius
    );
    println!("{} points on the sphere, {} outliers\n", n_inliers, n_outliers);

    let settings = RansacSettings::default()
        .with_seed(7)
        .with_inlier_threshold(0.05)
        .with_max_iterations(2000);
    let ransac = ParallelRansac::with_settings(SphereStrategy, settings)?;
    let result = ransac.fit_default(&points)?;

    println!("RANSAC Results ({} workers):", ransac.workers());
    match result.equation {
        Some([cx, cy, cz, r]) => {
            println!("  center: ({:.3}, {:.3}, {:.3})", cx, cy, cz);
            println!("  radius: {:.3}", r);
        }
        None => println!("  no model found"),
    }
    println!(
        "  inliers: {} / {} (trial {:?} of {})",
        result.inliers.len(),
        points.nrows(),
        result.trial,
        result.iterations
    );

    Ok(())
}

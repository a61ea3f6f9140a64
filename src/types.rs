//! Shared data types for the parallel RANSAC driver.
//!
//! Point clouds are plain `nalgebra` matrices with one point per row, so
//! callers can hand over whatever they loaded without an intermediate copy.

use nalgebra::{DMatrix, Point3};

use crate::error::{RansacError, Result};

/// Dynamic `N x 3` matrix of `f64`; row `i` is the point with index `i`.
pub type PointCloud = DMatrix<f64>;

/// Outcome of a single randomized trial.
///
/// `equation` is opaque to the driver: candidates are compared by the length
/// of `inliers` only.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult<E> {
    pub equation: Option<E>,
    /// Strictly increasing indices into the point cloud.
    pub inliers: Vec<usize>,
}

impl<E> TrialResult<E> {
    pub fn new(equation: E, inliers: Vec<usize>) -> Self {
        Self {
            equation: Some(equation),
            inliers,
        }
    }

    /// Zero-quality candidate for a sample that could not produce a model
    /// (collinear or coincident points, too few points, ...).
    pub fn degenerate() -> Self {
        Self {
            equation: None,
            inliers: Vec::new(),
        }
    }

    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }
}

/// Result of [`ParallelRansac::fit`](crate::core::ParallelRansac::fit).
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult<E> {
    /// Equation of the best model, `None` when no trial found any inlier.
    pub equation: Option<E>,
    /// Inlier indices of the best model.
    pub inliers: Vec<usize>,
    /// Ordinal of the winning trial.
    pub trial: Option<usize>,
    /// Number of trials that were executed.
    pub iterations: usize,
}

impl<E> FitResult<E> {
    /// The "no model found" result.
    pub fn empty() -> Self {
        Self {
            equation: None,
            inliers: Vec::new(),
            trial: None,
            iterations: 0,
        }
    }

    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }

    /// Split into the `(equation, inliers)` pair.
    pub fn into_parts(self) -> (Option<E>, Vec<usize>) {
        (self.equation, self.inliers)
    }
}

/// Row `index` of the cloud as a point.
pub fn point(points: &PointCloud, index: usize) -> Point3<f64> {
    Point3::new(
        points[(index, 0)],
        points[(index, 1)],
        points[(index, 2)],
    )
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(RansacError::InvalidThreshold { threshold });
    }
    Ok(())
}

pub(crate) fn validate_points(points: &PointCloud) -> Result<()> {
    if points.nrows() == 0 {
        return Ok(());
    }
    if points.ncols() != 3 {
        return Err(RansacError::InvalidDimension {
            columns: points.ncols(),
        });
    }
    for (row, coords) in points.row_iter().enumerate() {
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(RansacError::NonFinitePoint { row });
        }
    }
    Ok(())
}

/// Check that `inliers` is strictly increasing and bounded by `n`.
pub(crate) fn check_inliers(inliers: &[usize], n: usize) -> std::result::Result<(), String> {
    if let Some(&last) = inliers.last() {
        if last >= n {
            return Err(format!("inlier index {last} out of range for {n} points"));
        }
    }
    if let Some(pair) = inliers.windows(2).find(|w| w[0] >= w[1]) {
        return Err(format!(
            "inlier indices must be strictly increasing, found {} followed by {}",
            pair[0], pair[1]
        ));
    }
    Ok(())
}

//! Error type shared by the driver and input validation.

use thiserror::Error;

/// Errors surfaced by [`ParallelRansac`](crate::core::ParallelRansac).
///
/// Degenerate samples are not errors: a strategy reports them as a
/// zero-inlier [`TrialResult`](crate::types::TrialResult) and the reduction
/// simply never selects them.
#[derive(Debug, Error)]
pub enum RansacError {
    /// The inlier threshold is negative or NaN.
    #[error("inlier threshold must be a non-negative number, got {threshold}")]
    InvalidThreshold { threshold: f64 },

    /// A non-empty point cloud does not have exactly three columns.
    #[error("point cloud must have 3 columns (x, y, z), got {columns}")]
    InvalidDimension { columns: usize },

    /// A coordinate is NaN or infinite.
    #[error("point {row} has a non-finite coordinate")]
    NonFinitePoint { row: usize },

    /// A trial panicked or produced a malformed inlier set.
    ///
    /// The whole `fit` call is aborted; trials not yet dispatched are skipped.
    #[error("trial {trial} failed: {reason}")]
    WorkerFailure { trial: usize, reason: String },

    /// The worker pool could not be created.
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, RansacError>;

//! Configuration for the parallel RANSAC driver.

/// Default inlier threshold used by [`fit_default`](crate::core::ParallelRansac::fit_default).
pub const DEFAULT_INLIER_THRESHOLD: f64 = 0.05;

/// Default number of trials used by [`fit_default`](crate::core::ParallelRansac::fit_default).
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

/// Driver configuration.
///
/// `seed` and `workers` are fixed when the driver is built; the threshold and
/// iteration budget are only defaults and can be overridden per `fit` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RansacSettings {
    /// Master seed; drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Worker-pool size; one worker per available core when `None`.
    pub workers: Option<usize>,
    /// Inlier threshold in point-cloud units.
    pub inlier_threshold: f64,
    /// Number of independent trials.
    pub max_iterations: usize,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            seed: None,
            workers: None,
            inlier_threshold: DEFAULT_INLIER_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RansacSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_inlier_threshold(mut self, inlier_threshold: f64) -> Self {
        self.inlier_threshold = inlier_threshold;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

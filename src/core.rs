//! Strategy trait and the parallel RANSAC driver.
//!
//! [`ParallelRansac`] runs a fixed budget of independent trials on a rayon
//! worker pool. Each trial delegates to a [`FitStrategy`], which samples a
//! minimal subset, derives a candidate equation and collects its inliers. The
//! driver keeps the candidate with the most inliers.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, debug_span, trace, warn};

use crate::error::{RansacError, Result};
use crate::random::RandomSource;
use crate::scoring::ResultAggregator;
use crate::settings::RansacSettings;
use crate::types::{
    check_inliers, validate_points, validate_threshold, FitResult, PointCloud, TrialResult,
};

/// Shape-specific half of RANSAC: one randomized trial.
///
/// Implementations must not rely on any state shared between trials; every
/// call gets its own `random` stream and may run concurrently with others.
pub trait FitStrategy: Sync {
    /// Parameters of the fitted primitive (e.g. plane coefficients).
    type Equation: Send;

    /// Sample a minimal subset with `random`, derive a candidate equation and
    /// return it with the sorted indices of all points within `threshold`.
    ///
    /// Degenerate samples are reported with [`TrialResult::degenerate`].
    fn iteration(
        &self,
        random: &mut RandomSource,
        points: &PointCloud,
        threshold: f64,
    ) -> TrialResult<Self::Equation>;
}

impl<E, F> FitStrategy for F
where
    F: Fn(&mut RandomSource, &PointCloud, f64) -> TrialResult<E> + Sync,
    E: Send,
{
    type Equation = E;

    fn iteration(
        &self,
        random: &mut RandomSource,
        points: &PointCloud,
        threshold: f64,
    ) -> TrialResult<E> {
        self(random, points, threshold)
    }
}

/// Parallel RANSAC driver.
///
/// Trial `i` always draws from `RandomSource::for_trial(master_seed, i)`, so a
/// driver returns the same answer for the same inputs on every call and for
/// every pool size. Among trials with equal inlier counts the lowest ordinal
/// wins.
pub struct ParallelRansac<S> {
    strategy: S,
    settings: RansacSettings,
    master_seed: u64,
    pool: ThreadPool,
}

impl<S: FitStrategy> ParallelRansac<S> {
    /// Driver with default settings: entropy seed, one worker per core.
    pub fn new(strategy: S) -> Result<Self> {
        Self::with_settings(strategy, RansacSettings::default())
    }

    pub fn with_settings(strategy: S, settings: RansacSettings) -> Result<Self> {
        // rayon treats 0 threads as "pick automatically".
        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.workers.unwrap_or(0))
            .thread_name(|i| format!("ransac3d-worker-{i}"))
            .build()?;
        let master_seed = settings.seed.unwrap_or_else(rand::random);

        debug!(
            master_seed,
            workers = pool.current_num_threads(),
            "created parallel ransac driver"
        );

        Ok(Self {
            strategy,
            settings,
            master_seed,
            pool,
        })
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Number of worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn settings(&self) -> &RansacSettings {
        &self.settings
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Fit with the threshold and iteration budget from the driver settings.
    pub fn fit_default(&self, points: &PointCloud) -> Result<FitResult<S::Equation>> {
        self.fit(
            points,
            self.settings.inlier_threshold,
            self.settings.max_iterations,
        )
    }

    /// Run `max_iteration` trials and return the one with the most inliers.
    ///
    /// An empty cloud or a zero budget yields [`FitResult::empty`] without
    /// calling the strategy. A panicking trial, or one returning an inlier set
    /// that is unsorted, duplicated or out of range, aborts the whole call with
    /// [`RansacError::WorkerFailure`].
    pub fn fit(
        &self,
        points: &PointCloud,
        threshold: f64,
        max_iteration: usize,
    ) -> Result<FitResult<S::Equation>> {
        validate_threshold(threshold)?;
        validate_points(points)?;

        let span = debug_span!("fit", points = points.nrows(), threshold, max_iteration);
        let _enter = span.enter();

        if max_iteration == 0 || points.nrows() == 0 {
            debug!("no trials to run");
            return Ok(FitResult::empty());
        }

        let strategy = &self.strategy;
        let master_seed = self.master_seed;
        let span = &span;

        let reduced = self.pool.install(|| {
            (0..max_iteration)
                .into_par_iter()
                .try_fold(
                    ResultAggregator::new,
                    |mut aggregator, trial| -> Result<ResultAggregator<S::Equation>> {
                        let candidate = run_trial(strategy, master_seed, trial, points, threshold)?;
                        trace!(
                            parent: span,
                            trial,
                            inliers = candidate.inlier_count(),
                            "trial finished"
                        );
                        aggregator.offer(trial, candidate);
                        Ok(aggregator)
                    },
                )
                .try_reduce(ResultAggregator::new, |a, b| Ok(a.merge(b)))
        });

        let mut aggregator = match reduced {
            Ok(aggregator) => aggregator,
            Err(err) => {
                warn!(error = %err, "fit aborted");
                return Err(err);
            }
        };

        let result = aggregator.finish();
        debug!(
            trial = ?result.trial,
            inliers = result.inlier_count(),
            iterations = result.iterations,
            "fit finished"
        );
        Ok(result)
    }

    /// Re-run trial `trial` of a fit on the calling thread.
    ///
    /// Produces exactly the candidate that trial contributed to
    /// [`fit`](Self::fit) for the same points and threshold.
    pub fn replay_trial(
        &self,
        points: &PointCloud,
        threshold: f64,
        trial: usize,
    ) -> Result<TrialResult<S::Equation>> {
        validate_threshold(threshold)?;
        validate_points(points)?;
        run_trial(&self.strategy, self.master_seed, trial, points, threshold)
    }
}

fn run_trial<S: FitStrategy>(
    strategy: &S,
    master_seed: u64,
    trial: usize,
    points: &PointCloud,
    threshold: f64,
) -> Result<TrialResult<S::Equation>> {
    let mut random = RandomSource::for_trial(master_seed, trial);

    let candidate = catch_unwind(AssertUnwindSafe(|| {
        strategy.iteration(&mut random, points, threshold)
    }))
    .map_err(|payload| RansacError::WorkerFailure {
        trial,
        reason: panic_reason(&*payload),
    })?;

    check_inliers(&candidate.inliers, points.nrows())
        .map_err(|reason| RansacError::WorkerFailure { trial, reason })?;

    Ok(candidate)
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

//! Reduction of trial results into the best model.
//!
//! Candidates are ranked by inlier count alone. An aggregator only replaces
//! its champion on a strictly larger count, so among equally good trials the
//! one offered first is kept.

use crate::types::{FitResult, TrialResult};

/// Running champion: the trial with the most inliers seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct BestResult<E> {
    pub equation: Option<E>,
    pub inliers: Vec<usize>,
    /// Ordinal of the trial that produced this result.
    pub trial: usize,
}

impl<E> BestResult<E> {
    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }

    /// Ranking used when merging aggregators: more inliers first, then the
    /// earlier trial.
    fn beats(&self, other: &Self) -> bool {
        match self.inlier_count().cmp(&other.inlier_count()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.trial < other.trial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Accumulating,
    Done,
}

/// Fold over trial results.
///
/// Each aggregator is owned by one thread at a time and needs no locking.
/// The driver gives every worker its own aggregator for the contiguous block
/// of trials it runs and then [`merge`](Self::merge)s them; the merge rule is
/// order-independent, so the winner is the earliest trial with the maximum
/// inlier count no matter how blocks were scheduled.
#[derive(Debug)]
pub struct ResultAggregator<E> {
    best: Option<BestResult<E>>,
    consumed: usize,
    state: AggregatorState,
}

impl<E> Default for ResultAggregator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ResultAggregator<E> {
    pub fn new() -> Self {
        Self {
            best: None,
            consumed: 0,
            state: AggregatorState::Accumulating,
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Number of trial results consumed so far, including merged ones.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn best(&self) -> Option<&BestResult<E>> {
        self.best.as_ref()
    }

    /// Consume the result of trial `trial`.
    ///
    /// The candidate replaces the champion only if it has strictly more
    /// inliers. A zero-inlier candidate never becomes the champion.
    pub fn offer(&mut self, trial: usize, candidate: TrialResult<E>) {
        debug_assert_eq!(self.state, AggregatorState::Accumulating);
        self.consumed += 1;

        let current = self.best.as_ref().map_or(0, BestResult::inlier_count);
        if candidate.inlier_count() > current {
            self.best = Some(BestResult {
                equation: candidate.equation,
                inliers: candidate.inliers,
                trial,
            });
        }
    }

    /// Combine two aggregators that consumed disjoint sets of trials.
    pub fn merge(self, other: Self) -> Self {
        let best = match (self.best, other.best) {
            (Some(a), Some(b)) => Some(if b.beats(&a) { b } else { a }),
            (a, b) => a.or(b),
        };
        Self {
            best,
            consumed: self.consumed + other.consumed,
            state: AggregatorState::Accumulating,
        }
    }

    /// Stop accepting results and hand out the final answer.
    pub fn finish(&mut self) -> FitResult<E> {
        self.state = AggregatorState::Done;
        match self.best.take() {
            Some(best) => FitResult {
                equation: best.equation,
                inliers: best.inliers,
                trial: Some(best.trial),
                iterations: self.consumed,
            },
            None => FitResult {
                iterations: self.consumed,
                ..FitResult::empty()
            },
        }
    }
}

//! # ransac3d - Parallel RANSAC for 3D primitives
//!
//! `ransac3d` fits geometric primitives (planes, spheres, cylinders, ...) to
//! noisy point clouds with random sample consensus. The crate provides the
//! shape-agnostic part: a driver that runs many independent trials on a
//! worker pool and keeps the candidate with the largest inlier set. The
//! geometry of each shape is supplied by the caller as a [`FitStrategy`].
//!
//! ## Quick Start
//!
//! ```rust
//! use ransac3d::types::point;
//! use ransac3d::{FitStrategy, ParallelRansac, PointCloud, RandomSource, RansacSettings, TrialResult};
//!
//! /// Plane through three sampled points, as `[a, b, c, d]` with `ax + by + cz + d = 0`.
//! struct Plane;
//!
//! impl FitStrategy for Plane {
//!     type Equation = [f64; 4];
//!
//!     fn iteration(
//!         &self,
//!         random: &mut RandomSource,
//!         points: &PointCloud,
//!         threshold: f64,
//!     ) -> TrialResult<[f64; 4]> {
//!         let Some(sample) = random.next_index_sample(points.nrows(), 3) else {
//!             return TrialResult::degenerate();
//!         };
//!         let a = point(points, sample[0]);
//!         let normal = (point(points, sample[1]) - a).cross(&(point(points, sample[2]) - a));
//!         if normal.norm() < 1e-12 {
//!             return TrialResult::degenerate();
//!         }
//!         let normal = normal.normalize();
//!         let d = -normal.dot(&a.coords);
//!         let inliers = (0..points.nrows())
//!             .filter(|&i| (normal.dot(&point(points, i).coords) + d).abs() <= threshold)
//!             .collect();
//!         TrialResult::new([normal.x, normal.y, normal.z, d], inliers)
//!     }
//! }
//!
//! // A 10 x 5 grid on z = 0 plus two outliers.
//! let mut points = PointCloud::zeros(52, 3);
//! for i in 0..50 {
//!     points[(i, 0)] = (i % 10) as f64;
//!     points[(i, 1)] = (i / 10) as f64;
//! }
//! points[(50, 2)] = 3.0;
//! points[(51, 2)] = -2.0;
//!
//! let settings = RansacSettings::default().with_seed(7);
//! let ransac = ParallelRansac::with_settings(Plane, settings).unwrap();
//! let result = ransac.fit(&points, 0.01, 200).unwrap();
//! assert_eq!(result.inlier_count(), 50);
//! ```
//!
//! Closures with the right signature are strategies too:
//!
//! ```rust
//! use ransac3d::{ParallelRansac, PointCloud, RandomSource, TrialResult};
//!
//! let everything = |_: &mut RandomSource, points: &PointCloud, _: f64| {
//!     TrialResult::new((), (0..points.nrows()).collect())
//! };
//! let ransac = ParallelRansac::new(everything).unwrap();
//! let result = ransac.fit(&PointCloud::zeros(4, 3), 0.05, 10).unwrap();
//! assert_eq!(result.inliers, vec![0, 1, 2, 3]);
//! ```
//!
//! ## Modules
//!
//! - **[`core`](core)**: the [`FitStrategy`] trait and the [`ParallelRansac`] driver
//! - **[`random`](random)**: per-trial seedable random source
//! - **[`scoring`](scoring)**: reduction of trial results into the best model
//! - **[`settings`](settings)**: driver configuration
//! - **[`types`](types)**: point clouds and trial/fit results
//! - **[`error`](error)**: error type

pub mod core;
pub mod error;
pub mod random;
pub mod scoring;
pub mod settings;
pub mod types;

pub use crate::core::{FitStrategy, ParallelRansac};
pub use error::{RansacError, Result};
pub use random::RandomSource;
pub use scoring::{BestResult, ResultAggregator};
pub use settings::RansacSettings;
pub use types::{FitResult, PointCloud, TrialResult};

//! Grid approximation for Bayesian posteriors.
//!
//! Discretize a parameter space with [`GridSpace`], evaluate an
//! unnormalized log posterior over it with [`PosteriorEvaluator`],
//! normalize with a stabilized log-sum-exp into a [`Pmf`], draw a particle
//! approximation with [`resample`], and summarize any collection of scalar
//! draws with [`equal_tailed`] and [`highest_density`] credible intervals.
//!
//! ```
//! use grid_rs::{equal_tailed, GridAxis, GridSpace, LogPrior, PosteriorEvaluator, resample_seeded};
//!
//! // Binomial posterior for 6 successes in 9 trials, flat prior.
//! let grid = GridSpace::new(vec![GridAxis::linspace(0.0, 1.0, 1000)?])?;
//! let evaluator = PosteriorEvaluator::new(
//!     &grid,
//!     |point: &[f64]| 6.0 * point[0].ln() + 3.0 * (1.0 - point[0]).ln(),
//!     vec![Box::new(|_: f64| 0.0) as Box<dyn LogPrior>],
//! )?;
//! let pmf = evaluator.pmf()?;
//! let samples = resample_seeded(&grid, &pmf, 10_000, 42)?;
//! let interval = equal_tailed(&samples.dimension(0), 0.89)?;
//! assert!(interval.lower < 7.0 / 11.0 && 7.0 / 11.0 < interval.upper);
//! # Ok::<(), grid_rs::GridError>(())
//! ```

pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod interval;
pub(crate) mod math;
pub(crate) mod posterior;
pub(crate) mod resample;

pub use error::{GridError, Result};
pub use grid::{GridAxis, GridSpace, DEFAULT_MAX_POINTS};
pub use interval::{equal_tailed, highest_density, Interval};
pub use posterior::{
    LogLikelihood, LogPosteriorTable, LogPrior, Pmf, PosteriorEvaluator, DEFAULT_SUM_TOLERANCE,
};
pub use resample::{resample, resample_seeded, SampleSet};

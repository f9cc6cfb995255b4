//! Unnormalized log-posterior evaluation over a grid and its stabilized
//! normalization into a probability mass function.

use itertools::izip;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::{GridError, Result};
use crate::grid::GridSpace;
use crate::math::logsumexp;

/// Relative tolerance on `sum(pmf) == 1` for externally supplied weights.
pub const DEFAULT_SUM_TOLERANCE: f64 = 1e-9;

/// Log-likelihood of the observed data at a grid point.
///
/// Any aggregation over the dataset happens inside the implementation; the
/// evaluator only ever sees the total. Plain closures implement this.
pub trait LogLikelihood: Sync {
    fn logp(&self, point: &[f64]) -> f64;
}

impl<F> LogLikelihood for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn logp(&self, point: &[f64]) -> f64 {
        self(point)
    }
}

/// Log prior density for a single parameter dimension.
pub trait LogPrior: Sync {
    fn logp(&self, coord: f64) -> f64;
}

impl<F> LogPrior for F
where
    F: Fn(f64) -> f64 + Sync,
{
    fn logp(&self, coord: f64) -> f64 {
        self(coord)
    }
}

/// Evaluates `log lik(point) + sum of per-dimension log priors` at every
/// point of a grid.
pub struct PosteriorEvaluator<'grid, L> {
    grid: &'grid GridSpace,
    log_likelihood: L,
    log_priors: Vec<Box<dyn LogPrior>>,
}

impl<'grid, L: LogLikelihood> PosteriorEvaluator<'grid, L> {
    /// Requires exactly one log prior per grid dimension.
    pub fn new(
        grid: &'grid GridSpace,
        log_likelihood: L,
        log_priors: Vec<Box<dyn LogPrior>>,
    ) -> Result<Self> {
        if log_priors.len() != grid.ndim() {
            return Err(GridError::DimensionMismatch {
                expected: grid.ndim(),
                actual: log_priors.len(),
            });
        }
        Ok(Self {
            grid,
            log_likelihood,
            log_priors,
        })
    }

    /// The unnormalized log posterior at every grid point, in flat-index
    /// order.
    ///
    /// Points are evaluated across threads; the collection is indexed, so
    /// the ordering (and hence the result) is independent of the schedule.
    /// Normalization over the whole table happens afterwards in
    /// [`LogPosteriorTable::normalize`].
    pub fn log_table(&self) -> LogPosteriorTable {
        let ndim = self.grid.ndim();
        let values: Vec<f64> = (0..self.grid.num_points())
            .into_par_iter()
            .map_init(
                || vec![0f64; ndim],
                |point, index| {
                    self.grid.write_point(index, point);
                    let mut logp = self.log_likelihood.logp(point);
                    for (prior, &coord) in izip!(&self.log_priors, point.iter()) {
                        logp += prior.logp(coord);
                    }
                    logp
                },
            )
            .collect();
        LogPosteriorTable {
            values: values.into(),
        }
    }

    /// The normalized posterior mass function over the grid.
    pub fn pmf(&self) -> Result<Pmf> {
        self.log_table().normalize()
    }
}

/// Unnormalized log-posterior mass, one entry per grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPosteriorTable {
    values: Box<[f64]>,
}

impl LogPosteriorTable {
    pub fn from_values(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into().into(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Log of the normalizing constant, `log(sum(exp(values)))`.
    pub fn log_normalizer(&self) -> f64 {
        logsumexp(&self.values)
    }

    /// Normalize into a [`Pmf`] by stabilized exponentiation.
    ///
    /// The table maximum is subtracted before exponentiating, so tables
    /// differing only by an additive constant produce identical results and
    /// no finite table can under- or overflow to a degenerate pmf.
    pub fn normalize(&self) -> Result<Pmf> {
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == f64::NEG_INFINITY {
            return Err(GridError::DegenerateLikelihood);
        }
        let mut probs: Vec<f64> = self.values.iter().map(|&v| (v - max).exp()).collect();
        let total: f64 = probs.iter().sum();
        for p in probs.iter_mut() {
            *p /= total;
        }
        Ok(Pmf {
            probs: probs.into(),
        })
    }
}

/// A normalized probability mass function over the grid points.
///
/// Invariant: non-empty, every entry in `[0, 1]`, entries summing to 1
/// within tolerance. Construction through [`LogPosteriorTable::normalize`]
/// guarantees this; externally supplied weights are validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf {
    probs: Box<[f64]>,
}

impl Pmf {
    /// Validate caller-supplied weights with the default tolerance.
    pub fn from_probs(probs: impl Into<Vec<f64>>) -> Result<Self> {
        Self::from_probs_with_tolerance(probs, DEFAULT_SUM_TOLERANCE)
    }

    pub fn from_probs_with_tolerance(
        probs: impl Into<Vec<f64>>,
        tolerance: f64,
    ) -> Result<Self> {
        let probs: Vec<f64> = probs.into();
        if probs.is_empty() {
            return Err(GridError::EmptyPmf);
        }
        let sum: f64 = probs.iter().sum();
        if probs.iter().any(|&p| !(0. ..=1.).contains(&p)) || (sum - 1.).abs() > tolerance {
            return Err(GridError::InvalidPmf { sum });
        }
        Ok(Self {
            probs: probs.into(),
        })
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

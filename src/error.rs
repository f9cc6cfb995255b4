use thiserror::Error;

/// Failures raised by grid construction, posterior evaluation, resampling
/// and interval estimation.
///
/// All of these are contract violations by the caller or degenerate inputs,
/// not transient faults. A failing call produces no partial result.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("invalid grid axis: {0}")]
    InvalidGridSpec(String),
    #[error("grid would contain {size} points, more than the configured maximum of {max}")]
    GridTooLarge { size: usize, max: usize },
    #[error("expected {expected} values (one per grid dimension), got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("log posterior is negative infinity at every grid point, total mass is zero")]
    DegenerateLikelihood,
    #[error("probability mass function has no entries")]
    EmptyPmf,
    #[error("probability mass function entries must lie in [0, 1] and sum to 1, sum was {sum}")]
    InvalidPmf { sum: f64 },
    #[error("sample count must be at least 1")]
    InvalidSampleCount,
    #[error("cannot summarize an empty draw collection")]
    EmptyDrawSet,
    #[error("interval mass must lie in (0, 1], got {0}")]
    InvalidMassLevel(f64),
}

pub type Result<T> = std::result::Result<T, GridError>;

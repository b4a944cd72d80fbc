use thiserror::Error;

/// Errors raised by interval construction and cross-set operations.
///
/// Every variant is an invalid-argument condition: nothing here is retried or
/// partially applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// The start of an interval sorts after its end.
    #[error("invalid interval: start is greater than end")]
    StartAfterEnd,

    /// A single-point interval was not closed on both ends.
    #[error("invalid interval: a point interval must be closed on both ends")]
    OpenPoint,

    /// Two sets were built with limit orderings that cannot be mixed.
    #[error("interval sets use incompatible limit orderings")]
    IncompatibleOrder,
}

pub type Result<T> = std::result::Result<T, IntervalError>;

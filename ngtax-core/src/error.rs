use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating a bracket table.
///
/// A table that fails any of these checks cannot be used by the engine; the
/// caller decides whether to disable the compute action or show a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The bracket configuration could not be found or read.
    #[error("bracket configuration missing: {0}")]
    Missing(String),

    /// The bracket configuration could not be decoded.
    #[error("bracket configuration malformed: {0}")]
    Malformed(String),

    /// No tax brackets were provided.
    #[error("no tax brackets provided")]
    Empty,

    /// The first bracket does not start at zero.
    #[error("first bracket must start at 0, found {0}")]
    NotAnchoredAtZero(Decimal),

    /// A bracket's `min` is not strictly greater than the previous one.
    #[error("bracket {index} is out of order (min {min} after {previous_min})")]
    Unordered {
        index: usize,
        min: Decimal,
        previous_min: Decimal,
    },

    /// A bracket does not start where the previous bracket ends.
    #[error("bracket {index} starts at {min} but the previous bracket ends at {previous_max}")]
    NotContiguous {
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },

    /// A bounded bracket whose upper bound is not above its lower bound.
    #[error("bracket {index} has an empty range ({min}..{max})")]
    EmptyRange {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// An unbounded bracket appears before the end of the table.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeLast(usize),

    /// The last bracket has an upper bound, so high incomes are not covered.
    #[error("last bracket must be unbounded, found max {0}")]
    LastBracketBounded(Decimal),

    /// A rate outside the 0..=1 range.
    #[error("bracket {index} has rate {rate} outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// Errors returned by the tax engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    /// A monetary field was negative or not a number.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The bracket table is missing, malformed or unordered.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl TaxEngineError {
    pub(crate) fn negative(
        field: &'static str,
        value: Decimal,
    ) -> Self {
        TaxEngineError::InvalidInput {
            field,
            reason: format!("must not be negative, got {value}"),
        }
    }
}

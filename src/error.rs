//! Error types for the marketing engine.

use thiserror::Error;

/// Errors raised by selections and sorting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketingError {
    /// Sort requested on a field events do not have.
    #[error("unknown event field: '{0}' (expected one of: Id, Name, City, Date)")]
    UnknownField(String),

    /// City is not part of the built-in coordinate table.
    #[error("unknown city: '{0}'")]
    UnknownCity(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, MarketingError>;

//! Error types for dataset construction.

use thiserror::Error;

/// Result type for quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Errors that can occur while building the quarterly dataset.
///
/// Data-level defects (non-quarter-end dates, unparseable cells, incomplete
/// lookback windows) are not errors — they surface as missing values or
/// excluded rows. This enum covers structural misuse only.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// A quarter label that is not of the `YYYY/Qn` form
    #[error("Invalid quarter label: {0}")]
    InvalidQuarter(String),

    /// A table header that parses under neither the quarterly nor the
    /// annual header form
    #[error("Malformed table header: {0}")]
    MalformedHeader(String),

    /// Missing required column in a quarter-indexed frame
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

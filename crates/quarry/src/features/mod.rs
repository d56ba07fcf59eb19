//! Derived time-series features over quarter-indexed frames.
//!
//! Each step consumes a complete quarter-indexed frame and produces a new
//! derived frame keyed by the same quarter column; the input is never
//! mutated. Derived frames are joined back during panel assembly.

pub mod benchmark;
pub mod dividend;
pub mod forward_price;
pub mod lags;
pub mod yoy;

pub use benchmark::{benchmark_frame, six_month_dynamics};
pub use dividend::{DIVIDEND_FLAG_COL, dividend_flag};
pub use forward_price::ForwardPrice;
pub use lags::ValuationLags;
pub use yoy::YearOverYear;

use polars::prelude::*;

use crate::error::Result;

/// A derived-feature pass over one quarter-indexed frame.
///
/// The unit the panel assembly composes: a step declares the columns it
/// reads and produces a frame of derived columns keyed by quarter. Steps
/// are pure — same frame in, same frame out.
pub trait FeatureStep: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this step.
    ///
    /// Should be snake_case and stable across versions.
    fn name(&self) -> &str;

    /// Columns required in the input frame.
    fn required_columns(&self) -> &[&str];

    /// Compute the derived frame.
    ///
    /// Quarters lacking the lookback or lookahead window a step needs are
    /// excluded from the output, not padded with missing values, unless a
    /// step documents otherwise.
    fn derive(&self, frame: &DataFrame) -> Result<DataFrame>;
}

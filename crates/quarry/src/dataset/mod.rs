//! Panel assembly, merge and cross-sectional features.
//!
//! Per-company panels and the economic panel are assembled independently
//! (no ordering dependency between companies); the merge is the single
//! point where everything must be together, because the ranking pass is
//! cross-sectional within each quarter.

pub mod company;
pub mod economic;
pub mod merge;
pub mod ranking;

pub use company::{CompanyPanel, StatementKind};
pub use economic::EconomicPanel;
pub use merge::merge_panels;
pub use ranking::cross_sectional_features;

use polars::prelude::*;

use crate::config::DatasetConfig;
use crate::error::Result;

/// Build the final dataset from assembled panels.
///
/// Stacks the company frames, inner-joins the economic frame on quarter and
/// runs the cross-sectional feature pass. The result is keyed by
/// (`company_code`, `quarter`) and carries every normalized and derived
/// field plus ranks, the composite score and the per-quarter mean.
pub fn build_dataset(
    companies: &[DataFrame],
    economic: &DataFrame,
    config: &DatasetConfig,
) -> Result<DataFrame> {
    let merged = merge::merge_panels(companies, economic)?;
    ranking::cross_sectional_features(&merged, config)
}

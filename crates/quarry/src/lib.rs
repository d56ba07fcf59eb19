#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod config;
pub mod dataset;
pub mod dynamics;
pub mod error;
pub mod features;
pub mod normalize;
pub mod scrape;

// Re-export core types
pub use calendar::Quarter;
pub use config::{CompositeSpec, DatasetConfig, FeatureDict, RankSpec, RatioSpec};
pub use dataset::{
    CompanyPanel, EconomicPanel, StatementKind, build_dataset, cross_sectional_features,
    merge_panels,
};
pub use dynamics::{dynamics, ratio};
pub use error::{QuarryError, Result};
pub use features::{
    DIVIDEND_FLAG_COL, FeatureStep, ForwardPrice, ValuationLags, YearOverYear, benchmark_frame,
    dividend_flag, six_month_dynamics,
};
pub use normalize::{
    COMPANY_CODE_COL, PUBLICATION_DATE_LABEL, QUARTER_COL, clean_cell, monthly_series,
    normalize_table, parse_headers, quote_series, value_columns,
};
pub use scrape::{CompanyCode, DividendRow, DividendTable, QuoteRow, RawRow, RawTable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Data contract with the page-scraping layer.
//!
//! Retrieval and DOM parsing live outside this crate; what arrives here is
//! already row data. The shapes below are the whole agreement: an ordered
//! header plus labelled rows for report tables, dated rows for quotation
//! histories, and the yearly dividend table.

use serde::{Deserialize, Serialize};

/// Opaque code identifying a company or macro series.
pub type CompanyCode = String;

/// A scraped report table: quarter-labelled header plus labelled rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column header labels, one per data column, in page order
    pub headers: Vec<String>,
    /// Data rows in page order
    pub rows: Vec<RawRow>,
}

/// One labelled row of a report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Row label as scraped
    pub label: String,
    /// Cell texts, one per header column
    pub cells: Vec<String>,
}

impl RawRow {
    /// Create a row from a label and cell texts.
    pub fn new<I, S>(label: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// One row of a dated quotation table (economic indicator, index history).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Observation date in `DD.MM.YYYY` form
    pub date: String,
    /// Observed value text
    pub value: String,
}

impl QuoteRow {
    /// Create a dated observation.
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// The yearly dividend-payment table of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendTable {
    /// One row per recorded payment year
    pub rows: Vec<DividendRow>,
}

/// One recorded dividend year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendRow {
    /// Payment year as scraped
    pub year: String,
    /// Payment status text as scraped
    pub status: String,
}

impl DividendRow {
    /// Create a dividend record.
    pub fn new(year: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            status: status.into(),
        }
    }
}

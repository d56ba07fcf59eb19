//! Raw scraped tables to quarter-indexed frames.
//!
//! A quarter-indexed frame is a [`DataFrame`] with a [`QUARTER_COL`] utf8
//! column of canonical `YYYY/Qn` keys plus named `f64` columns. Missing
//! values are nulls, never zeros; quarter keys are unique within a frame.

use std::collections::{HashMap, HashSet};

use polars::prelude::*;

use crate::calendar::Quarter;
use crate::config::FeatureDict;
use crate::error::{QuarryError, Result};
use crate::scrape::{QuoteRow, RawTable};

/// Name of the quarter key column in every quarter-indexed frame.
pub const QUARTER_COL: &str = "quarter";

/// Name of the entity identity column in per-company frames.
pub const COMPANY_CODE_COL: &str = "company_code";

/// Row label of the publication-date row; report metadata, not a data field.
pub const PUBLICATION_DATE_LABEL: &str = "Data publikacji";

/// Parse a header row into quarter keys, one per data column.
///
/// A first header whose fifth character is not `/` signals an annually
/// reporting entity; the annual `YYYY(ab…` form is then applied to every
/// entry. A header that parses under neither form is an error — the table
/// structure, unlike a single cell, cannot be partially wrong.
pub fn parse_headers(headers: &[String]) -> Result<Vec<Quarter>> {
    let annual = headers.first().is_some_and(|first| {
        first
            .chars()
            .filter(|c| !c.is_whitespace())
            .nth(4)
            .is_some_and(|c| c != '/')
    });
    headers
        .iter()
        .map(|header| {
            let parsed = if annual {
                Quarter::from_annual_header(header)
            } else {
                Quarter::from_quarter_header(header)
            };
            parsed.ok_or_else(|| QuarryError::MalformedHeader(header.clone()))
        })
        .collect()
}

/// Extract the numeric value of a table cell.
///
/// Whitespace and the `~` approximate-value marker are dropped; a trailing
/// alphabetic annotation (footnote markers) truncates the cell at its first
/// letter. An empty result is missing, a `%`-suffixed result is divided by
/// 100, anything else parses as a literal number. Unparseable text is
/// missing — cell defects are data, not errors.
pub fn clean_cell(cell: &str) -> Option<f64> {
    let mut cleaned: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '~')
        .collect();
    if let Some(position) = cleaned.find(|c: char| c.is_ascii_alphabetic()) {
        cleaned.truncate(position);
    }
    if cleaned.is_empty() {
        return None;
    }
    if let Some(percent) = cleaned.strip_suffix('%') {
        return percent.parse::<f64>().ok().map(|value| value / 100.0);
    }
    cleaned.parse::<f64>().ok()
}

/// Convert a scraped report table into a quarter-indexed frame.
///
/// Row labels re-key to canonical field names through `features` (unknown
/// labels pass through; a later duplicate label wins). The publication-date
/// row is excluded. Rows shorter than the header are padded with nulls.
pub fn normalize_table(table: &RawTable, features: &FeatureDict) -> Result<DataFrame> {
    let quarters = parse_headers(&table.headers)?;
    let width = quarters.len();

    let mut order: Vec<String> = Vec::new();
    let mut fields: HashMap<String, Vec<Option<f64>>> = HashMap::new();
    for row in &table.rows {
        let label = row.label.trim();
        if label.is_empty() || label == PUBLICATION_DATE_LABEL {
            continue;
        }
        let field = features.resolve(label).to_string();
        let mut values: Vec<Option<f64>> = row.cells.iter().map(|cell| clean_cell(cell)).collect();
        values.resize(width, None);
        if !fields.contains_key(&field) {
            order.push(field.clone());
        }
        fields.insert(field, values);
    }

    let labels: Vec<String> = quarters.iter().map(|q| q.to_string()).collect();
    let mut columns: Vec<Column> = Vec::with_capacity(order.len() + 1);
    columns.push(Series::new(QUARTER_COL.into(), labels).into());
    for field in &order {
        let values = fields.remove(field).unwrap_or_default();
        columns.push(Series::new(field.as_str().into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}

/// Convert dated quotation rows into a quarterly series named `field`.
///
/// Rows whose date is not a quarter-end reporting date are skipped, never
/// rounded. The first occurrence of a quarter wins.
pub fn quote_series(rows: &[QuoteRow], field: &str) -> Result<DataFrame> {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for row in rows {
        let Some(quarter) = Quarter::from_report_date(&row.date) else {
            continue;
        };
        let label = quarter.to_string();
        if !seen.insert(label.clone()) {
            continue;
        }
        labels.push(label);
        values.push(clean_cell(&row.value));
    }
    Ok(DataFrame::new(vec![
        Series::new(QUARTER_COL.into(), labels).into(),
        Series::new(field.into(), values).into(),
    ])?)
}

/// Resample a daily quotation history to one observation per calendar month
/// and keep the quarter-end months as a quarterly series named `field`.
///
/// The first observation encountered for a month wins; subsequent rows of
/// the same month are discarded, not averaged.
pub fn monthly_series(rows: &[QuoteRow], field: &str) -> Result<DataFrame> {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();
    let mut seen_months: HashSet<String> = HashSet::new();
    for row in rows {
        // `MM.YYYY` tail of the date identifies the calendar month.
        let month: String = row.date.trim().chars().skip(3).collect();
        if !seen_months.insert(month) {
            continue;
        }
        if let Some(quarter) = Quarter::from_report_date(&row.date) {
            labels.push(quarter.to_string());
            values.push(clean_cell(&row.value));
        }
    }
    Ok(DataFrame::new(vec![
        Series::new(QUARTER_COL.into(), labels).into(),
        Series::new(field.into(), values).into(),
    ])?)
}

/// Quarter keys of a frame plus their row positions.
pub(crate) fn quarter_index(frame: &DataFrame) -> Result<(Vec<Quarter>, HashMap<Quarter, usize>)> {
    let labels = frame.column(QUARTER_COL)?.str()?;
    let mut keys = Vec::with_capacity(labels.len());
    let mut index = HashMap::with_capacity(labels.len());
    for position in 0..labels.len() {
        let label = labels
            .get(position)
            .ok_or_else(|| QuarryError::Computation("null quarter key".to_string()))?;
        let quarter: Quarter = label.parse()?;
        index.insert(quarter, position);
        keys.push(quarter);
    }
    Ok((keys, index))
}

/// Names of the value columns of a quarter-indexed frame, in frame order.
pub fn value_columns(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != QUARTER_COL)
        .map(|name| name.to_string())
        .collect()
}

/// Left join on the quarter key.
pub(crate) fn left_join_on_quarter(left: DataFrame, right: DataFrame) -> Result<DataFrame> {
    Ok(left
        .lazy()
        .join(
            right.lazy(),
            [col(QUARTER_COL)],
            [col(QUARTER_COL)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?)
}

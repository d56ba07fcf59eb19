//! Benchmark and currency dynamics for the macro frame.

use polars::prelude::*;

use crate::dynamics::dynamics;
use crate::error::{QuarryError, Result};
use crate::features::{FeatureStep, YearOverYear};
use crate::normalize::{QUARTER_COL, left_join_on_quarter, quarter_index, value_columns};

/// Six-month (two-quarter) dynamics of `field`, for every quarter present.
///
/// Unlike the year-over-year pass this keeps all rows: a quarter without
/// the two-quarter lookback gets a missing value, because the
/// relative-strength ratio downstream wants the full spine.
pub fn six_month_dynamics(frame: &DataFrame, field: &str) -> Result<DataFrame> {
    let (keys, index) = quarter_index(frame)?;
    let values = frame.column(field)?.f64()?;

    let labels: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
    let derived: Vec<Option<f64>> = keys
        .iter()
        .enumerate()
        .map(|(position, key)| {
            index
                .get(&key.offset(-2))
                .and_then(|&older| dynamics(values.get(position), values.get(older)))
        })
        .collect();

    let name = format!("{field}_6m");
    Ok(DataFrame::new(vec![
        Series::new(QUARTER_COL.into(), labels).into(),
        Series::new(name.as_str().into(), derived).into(),
    ])?)
}

/// Assemble the benchmark frame on a caller-supplied quarter spine.
///
/// `currency` and `market_index` are monthly-resampled quarterly series
/// (see [`crate::normalize::monthly_series`]); both series, their
/// year-over-year dynamics and the index six-month dynamics are left-joined
/// onto the spine in that order.
pub fn benchmark_frame(
    spine: &[String],
    currency: &DataFrame,
    market_index: &DataFrame,
) -> Result<DataFrame> {
    let index_field = value_columns(market_index)
        .into_iter()
        .next()
        .ok_or_else(|| QuarryError::MissingColumn("market index value".to_string()))?;

    let mut frame = DataFrame::new(vec![
        Series::new(QUARTER_COL.into(), spine.to_vec()).into(),
    ])?;
    for derived in [
        currency.clone(),
        market_index.clone(),
        YearOverYear.derive(currency)?,
        YearOverYear.derive(market_index)?,
        six_month_dynamics(market_index, &index_field)?,
    ] {
        frame = left_join_on_quarter(frame, derived)?;
    }
    Ok(frame)
}

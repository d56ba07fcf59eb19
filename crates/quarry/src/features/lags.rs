//! Lagged earnings and revenue fields for valuation screens.

use polars::prelude::*;

use crate::error::Result;
use crate::features::FeatureStep;
use crate::normalize::{QUARTER_COL, quarter_index};

/// Lagged fields carried into the dataset: (output, source, quarters back).
const LAG_FIELDS: [(&str, &str, i32); 9] = [
    ("net_earnings_1Q", "net_earnings", 1),
    ("net_earnings_2Q", "net_earnings", 2),
    ("net_earnings_5Q", "net_earnings", 5),
    ("net_earnings_6Q", "net_earnings", 6),
    ("net_earnings_5Y", "net_earnings", 60),
    ("sales_revenues_1Q", "sales_revenues", 1),
    ("sales_revenues_2Q", "sales_revenues", 2),
    ("sales_revenues_5Q", "sales_revenues", 5),
    ("sales_revenues_6Q", "sales_revenues", 6),
];

/// Lookbacks that must all be present for a quarter to be emitted.
const REQUIRED_LOOKBACKS: [i32; 5] = [1, 2, 5, 6, 60];

/// Historical earnings and revenue values at fixed lookbacks.
///
/// A quarter is emitted only when the 1-, 2-, 5-, 6- and 60-quarter
/// lookbacks all exist in the input — all or nothing; a quarter failing any
/// lookback is excluded entirely. A source field absent from the frame
/// yields missing lag values without affecting which quarters are emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationLags;

impl FeatureStep for ValuationLags {
    fn name(&self) -> &str {
        "valuation_lags"
    }

    fn required_columns(&self) -> &[&str] {
        &[QUARTER_COL, "net_earnings", "sales_revenues"]
    }

    fn derive(&self, frame: &DataFrame) -> Result<DataFrame> {
        let (keys, index) = quarter_index(frame)?;

        let mut picked = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        for key in keys {
            if REQUIRED_LOOKBACKS
                .iter()
                .all(|&steps| index.contains_key(&key.offset(-steps)))
            {
                picked.push(key);
                labels.push(key.to_string());
            }
        }

        let mut columns: Vec<Column> = Vec::with_capacity(LAG_FIELDS.len() + 1);
        columns.push(Series::new(QUARTER_COL.into(), labels).into());
        for (output, source, steps) in LAG_FIELDS {
            let values: Vec<Option<f64>> = match frame.column(source) {
                Ok(column) => {
                    let values = column.f64()?;
                    picked
                        .iter()
                        .map(|key| values.get(index[&key.offset(-steps)]))
                        .collect()
                }
                Err(_) => vec![None; picked.len()],
            };
            columns.push(Series::new(output.into(), values).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

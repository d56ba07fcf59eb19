//! Forward-looking price performance and trailing momentum.

use polars::prelude::*;

use crate::dynamics::dynamics;
use crate::error::Result;
use crate::features::FeatureStep;
use crate::normalize::{COMPANY_CODE_COL, QUARTER_COL, quarter_index};
use crate::scrape::CompanyCode;

/// The target feature of the dataset: the best price gain over the year
/// following each quarter, plus a trailing six-month momentum proxy.
///
/// For each quarter with at least one of the next four quarters present,
/// `max_price_change_y = dynamics(max(price over the present next-four),
/// price[q])`. `price_change_6m = dynamics(price[q], price[q-2])`, missing
/// when the two-quarter lookback is absent. Quarters with no forward
/// quarter at all are excluded. The output carries the company code so the
/// label survives the later cross-company merge.
#[derive(Debug, Clone)]
pub struct ForwardPrice {
    code: CompanyCode,
}

impl ForwardPrice {
    /// Create the step for one company.
    pub fn new(code: impl Into<CompanyCode>) -> Self {
        Self { code: code.into() }
    }
}

impl FeatureStep for ForwardPrice {
    fn name(&self) -> &str {
        "forward_price"
    }

    fn required_columns(&self) -> &[&str] {
        &[QUARTER_COL, "price"]
    }

    fn derive(&self, frame: &DataFrame) -> Result<DataFrame> {
        let (keys, index) = quarter_index(frame)?;
        let price = frame.column("price")?.f64()?;

        let mut labels: Vec<String> = Vec::new();
        let mut codes: Vec<String> = Vec::new();
        let mut max_change: Vec<Option<f64>> = Vec::new();
        let mut change_6m: Vec<Option<f64>> = Vec::new();

        for (position, key) in keys.iter().enumerate() {
            let forward: Vec<Option<f64>> = (1..=4)
                .filter_map(|steps| index.get(&key.offset(steps)).map(|&row| price.get(row)))
                .collect();
            if forward.is_empty() {
                continue;
            }
            let peak = forward
                .iter()
                .flatten()
                .copied()
                .fold(None, |acc: Option<f64>, value| {
                    Some(acc.map_or(value, |best| best.max(value)))
                });

            labels.push(key.to_string());
            codes.push(self.code.clone());
            max_change.push(dynamics(peak, price.get(position)));
            change_6m.push(
                index
                    .get(&key.offset(-2))
                    .and_then(|&older| dynamics(price.get(position), price.get(older))),
            );
        }

        Ok(DataFrame::new(vec![
            Series::new(QUARTER_COL.into(), labels).into(),
            Series::new(COMPANY_CODE_COL.into(), codes).into(),
            Series::new("max_price_change_y".into(), max_change).into(),
            Series::new("price_change_6m".into(), change_6m).into(),
        ])?)
    }
}

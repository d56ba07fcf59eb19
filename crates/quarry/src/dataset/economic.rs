//! Macro-economic panel assembly.

use std::collections::BTreeSet;

use polars::prelude::*;

use crate::calendar::Quarter;
use crate::error::Result;
use crate::features::benchmark_frame;
use crate::normalize::{QUARTER_COL, left_join_on_quarter, quarter_index};

/// The shared macro panel: quarterly indicator series plus the benchmark
/// block (currency, market index and their dynamics).
///
/// Series join onto a sorted union spine of their quarters, so indicator
/// histories of different lengths coexist with missing values where a
/// series has no observation.
#[derive(Debug, Clone, Default)]
pub struct EconomicPanel {
    series: Vec<DataFrame>,
    benchmark: Option<(DataFrame, DataFrame)>,
}

impl EconomicPanel {
    /// Create an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quarterly indicator series (a frame of `quarter` plus one
    /// value field, see [`crate::normalize::quote_series`]).
    pub fn add_series(&mut self, series: DataFrame) -> &mut Self {
        self.series.push(series);
        self
    }

    /// Attach the currency and market-index monthly series; their dynamics
    /// are derived at assembly.
    pub fn with_benchmark(&mut self, currency: DataFrame, market_index: DataFrame) -> &mut Self {
        self.benchmark = Some((currency, market_index));
        self
    }

    /// Assemble the panel on the sorted union spine of its series.
    pub fn finish(self) -> Result<DataFrame> {
        let mut spine: BTreeSet<Quarter> = BTreeSet::new();
        for frame in &self.series {
            spine.extend(quarter_index(frame)?.0);
        }
        if self.series.is_empty() {
            if let Some((currency, market_index)) = &self.benchmark {
                spine.extend(quarter_index(currency)?.0);
                spine.extend(quarter_index(market_index)?.0);
            }
        }

        let labels: Vec<String> = spine.iter().map(|key| key.to_string()).collect();
        let mut frame = DataFrame::new(vec![
            Series::new(QUARTER_COL.into(), labels.clone()).into(),
        ])?;
        for series in &self.series {
            frame = left_join_on_quarter(frame, series.clone())?;
        }
        if let Some((currency, market_index)) = &self.benchmark {
            frame = left_join_on_quarter(frame, benchmark_frame(&labels, currency, market_index)?)?;
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn series_join_on_a_sorted_union_spine() {
        let rates = df![
            QUARTER_COL => ["2019/Q4", "2020/Q1"],
            "interest_rate" => [0.015, 0.01],
        ]
        .unwrap();
        let inflation = df![
            QUARTER_COL => ["2020/Q1", "2020/Q2"],
            "inflation" => [0.046, 0.033],
        ]
        .unwrap();

        let mut panel = EconomicPanel::new();
        panel.add_series(rates).add_series(inflation);
        let frame = panel.finish().unwrap();

        assert_eq!(frame.height(), 3);
        let quarters = frame.column(QUARTER_COL).unwrap().str().unwrap();
        assert_eq!(quarters.get(0), Some("2019/Q4"));
        assert_eq!(quarters.get(2), Some("2020/Q2"));

        let rate = frame.column("interest_rate").unwrap().f64().unwrap();
        assert_relative_eq!(rate.get(0).unwrap(), 0.015);
        assert_eq!(rate.get(2), None);
    }

    #[test]
    fn benchmark_block_joins_onto_the_indicator_spine() {
        let rates = df![
            QUARTER_COL => ["2019/Q3", "2019/Q4", "2020/Q1"],
            "interest_rate" => [0.015, 0.015, 0.01],
        ]
        .unwrap();
        let usd = df![
            QUARTER_COL => ["2019/Q3", "2019/Q4", "2020/Q1"],
            "usd_pln" => [3.9, 3.85, 4.1],
        ]
        .unwrap();
        let wig = df![
            QUARTER_COL => ["2019/Q1", "2019/Q2", "2019/Q3", "2019/Q4", "2020/Q1"],
            "wig" => [50000.0, 52000.0, 51000.0, 54000.0, 45000.0],
        ]
        .unwrap();

        let mut panel = EconomicPanel::new();
        panel.add_series(rates).with_benchmark(usd, wig);
        let frame = panel.finish().unwrap();

        // Spine comes from the indicator series, not the longer benchmark.
        assert_eq!(frame.height(), 3);
        for name in ["interest_rate", "usd_pln", "wig", "wig_6m", "wig_yy"] {
            assert!(frame.column(name).is_ok(), "missing {name}");
        }
        let wig_6m = frame.column("wig_6m").unwrap().f64().unwrap();
        assert_relative_eq!(wig_6m.get(0).unwrap(), 0.02);
    }
}

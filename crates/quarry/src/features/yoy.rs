//! Generic year-over-year dynamics.

use polars::prelude::*;

use crate::dynamics::dynamics;
use crate::error::Result;
use crate::features::FeatureStep;
use crate::normalize::{QUARTER_COL, quarter_index, value_columns};

/// Suffix of every derived year-over-year field.
const YY_SUFFIX: &str = "_yy";

/// Year-over-year dynamics for every field of a frame.
///
/// For each quarter whose four-quarters-earlier key is also present, every
/// field `f` yields `f_yy = dynamics(f[q], f[q-4])`. Quarters without the
/// one-year lookback are excluded from the output entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearOverYear;

impl FeatureStep for YearOverYear {
    fn name(&self) -> &str {
        "year_over_year"
    }

    fn required_columns(&self) -> &[&str] {
        &[QUARTER_COL]
    }

    fn derive(&self, frame: &DataFrame) -> Result<DataFrame> {
        let (keys, index) = quarter_index(frame)?;
        let fields = value_columns(frame);

        // (row, row four quarters earlier) for quarters with a full lookback
        let mut rows: Vec<(usize, usize)> = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        for (position, key) in keys.iter().enumerate() {
            if let Some(&older) = index.get(&key.offset(-4)) {
                rows.push((position, older));
                labels.push(key.to_string());
            }
        }

        let mut columns: Vec<Column> = Vec::with_capacity(fields.len() + 1);
        columns.push(Series::new(QUARTER_COL.into(), labels).into());
        for field in &fields {
            let values = frame.column(field)?.f64()?;
            let derived: Vec<Option<f64>> = rows
                .iter()
                .map(|&(newer, older)| dynamics(values.get(newer), values.get(older)))
                .collect();
            let name = format!("{field}{YY_SUFFIX}");
            columns.push(Series::new(name.as_str().into(), derived).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derives_dynamics_against_four_quarters_earlier() {
        let frame = df![
            QUARTER_COL => ["2019/Q1", "2019/Q2", "2019/Q3", "2019/Q4", "2020/Q1"],
            "net_earnings" => [100.0, 90.0, 95.0, 105.0, 110.0],
            "ebit" => [50.0, 45.0, 48.0, 52.0, 60.0],
        ]
        .unwrap();

        let derived = YearOverYear.derive(&frame).unwrap();

        // Only 2020/Q1 has a 2019/Q1 lookback.
        assert_eq!(derived.height(), 1);
        let quarters = derived.column(QUARTER_COL).unwrap().str().unwrap();
        assert_eq!(quarters.get(0), Some("2020/Q1"));

        let earnings = derived.column("net_earnings_yy").unwrap().f64().unwrap();
        assert_relative_eq!(earnings.get(0).unwrap(), 0.10);
        let ebit = derived.column("ebit_yy").unwrap().f64().unwrap();
        assert_relative_eq!(ebit.get(0).unwrap(), 0.20);
    }

    #[test]
    fn quarters_without_lookback_are_absent_not_null() {
        let frame = df![
            QUARTER_COL => ["2019/Q1", "2020/Q1", "2020/Q2"],
            "sales_revenues" => [100.0, 120.0, 130.0],
        ]
        .unwrap();

        let derived = YearOverYear.derive(&frame).unwrap();
        let quarters = derived.column(QUARTER_COL).unwrap().str().unwrap();
        assert_eq!(quarters.len(), 1);
        assert_eq!(quarters.get(0), Some("2020/Q1"));
    }

    #[test]
    fn missing_input_stays_missing() {
        let frame = df![
            QUARTER_COL => ["2019/Q1", "2020/Q1"],
            "ebit" => [None, Some(60.0)],
            "sales_revenues" => [Some(10.0), None],
        ]
        .unwrap();

        let derived = YearOverYear.derive(&frame).unwrap();
        assert_eq!(derived.height(), 1);
        // Missing older value and missing newer value both propagate.
        assert_eq!(derived.column("ebit_yy").unwrap().f64().unwrap().get(0), None);
        assert_eq!(
            derived
                .column("sales_revenues_yy")
                .unwrap()
                .f64()
                .unwrap()
                .get(0),
            None
        );
    }
}

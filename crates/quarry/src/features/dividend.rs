//! Dividend-payment flag.

use std::collections::HashSet;

use polars::prelude::*;

use crate::calendar::Quarter;
use crate::error::Result;
use crate::normalize::QUARTER_COL;
use crate::scrape::DividendTable;

/// Name of the projected dividend flag column.
pub const DIVIDEND_FLAG_COL: &str = "dividend_1Y";

/// Project yearly dividend payments onto the following year's quarters.
///
/// A payment recorded for year `Y` whose status equals `paid_marker` sets
/// the flag to 1 for all four quarters of `Y + 1`; other recorded years set
/// 0. Years that fail to parse are skipped; the first record per year wins.
/// Companies without a dividend table get a constant zero column instead —
/// that default lives in the panel assembly, not here.
pub fn dividend_flag(table: &DividendTable, paid_marker: &str) -> Result<DataFrame> {
    let mut labels: Vec<String> = Vec::new();
    let mut flags: Vec<f64> = Vec::new();
    let mut seen: HashSet<i32> = HashSet::new();
    for row in &table.rows {
        let Ok(year) = row.year.trim().parse::<i32>() else {
            continue;
        };
        if !seen.insert(year) {
            continue;
        }
        let paid = if row.status.trim() == paid_marker {
            1.0
        } else {
            0.0
        };
        for index in 1..=4 {
            labels.push(Quarter::new(year + 1, index)?.to_string());
            flags.push(paid);
        }
    }
    Ok(DataFrame::new(vec![
        Series::new(QUARTER_COL.into(), labels).into(),
        Series::new(DIVIDEND_FLAG_COL.into(), flags).into(),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::DividendRow;

    const PAID: &str = "wypłacona";

    #[test]
    fn payment_projects_onto_following_year() {
        let table = DividendTable {
            rows: vec![
                DividendRow::new("2019", PAID),
                DividendRow::new("2018", "zawieszona"),
            ],
        };
        let frame = dividend_flag(&table, PAID).unwrap();

        assert_eq!(frame.height(), 8);
        let quarters = frame.column(QUARTER_COL).unwrap().str().unwrap();
        let flags = frame.column(DIVIDEND_FLAG_COL).unwrap().f64().unwrap();

        // 2019 paid -> 2020/Q1..Q4 flagged 1
        for position in 0..4 {
            assert_eq!(
                quarters.get(position),
                Some(format!("2020/Q{}", position + 1).as_str())
            );
            assert_eq!(flags.get(position), Some(1.0));
        }
        // 2018 not paid -> 2019/Q1..Q4 flagged 0
        for position in 4..8 {
            assert_eq!(flags.get(position), Some(0.0));
        }
    }

    #[test]
    fn unparseable_years_and_duplicates_are_skipped() {
        let table = DividendTable {
            rows: vec![
                DividendRow::new("suma", PAID),
                DividendRow::new("2019", PAID),
                DividendRow::new("2019", "zawieszona"),
            ],
        };
        let frame = dividend_flag(&table, PAID).unwrap();
        assert_eq!(frame.height(), 4);
        let flags = frame.column(DIVIDEND_FLAG_COL).unwrap().f64().unwrap();
        assert_eq!(flags.get(0), Some(1.0));
    }
}

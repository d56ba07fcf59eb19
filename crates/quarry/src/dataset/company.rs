//! Per-company panel assembly.

use derive_more::Display;
use polars::prelude::*;

use crate::error::Result;
use crate::features::{
    DIVIDEND_FLAG_COL, FeatureStep, ForwardPrice, ValuationLags, YearOverYear, dividend_flag,
};
use crate::normalize::left_join_on_quarter;
use crate::scrape::{CompanyCode, DividendTable};

/// Which derived passes a statement table contributes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Balance-sheet style table: year-over-year dynamics only
    General,
    /// Profit-and-loss table: year-over-year dynamics plus valuation lags
    ProfitLoss,
}

/// One company's quarterly panel, assembled table by table.
///
/// The market-value table opens the panel: its forward price features form
/// the row spine, so the panel covers exactly the quarters that have a
/// forward-return label. Every further table left-joins onto that spine
/// together with its derived series. Assemble each company through the same
/// table sequence — the merge stacks panel frames and expects one schema.
#[derive(Debug, Clone)]
pub struct CompanyPanel {
    code: CompanyCode,
    frame: DataFrame,
}

impl CompanyPanel {
    /// Open a panel from the normalized market-value table (must carry
    /// `price`).
    pub fn from_market_table(code: impl Into<CompanyCode>, table: &DataFrame) -> Result<Self> {
        let code = code.into();
        let forward = ForwardPrice::new(code.clone()).derive(table)?;
        let yoy = YearOverYear.derive(table)?;
        let frame = left_join_on_quarter(forward, table.clone())?;
        let frame = left_join_on_quarter(frame, yoy)?;
        Ok(Self { code, frame })
    }

    /// Company code this panel belongs to.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Join a normalized statement table and its year-over-year dynamics;
    /// a profit-and-loss table also contributes the valuation lags.
    pub fn add_statement(&mut self, table: &DataFrame, kind: StatementKind) -> Result<&mut Self> {
        let yoy = YearOverYear.derive(table)?;
        let mut frame = left_join_on_quarter(self.frame.clone(), table.clone())?;
        frame = left_join_on_quarter(frame, yoy)?;
        if kind == StatementKind::ProfitLoss {
            frame = left_join_on_quarter(frame, ValuationLags.derive(table)?)?;
        }
        self.frame = frame;
        Ok(self)
    }

    /// Attach the dividend flag.
    ///
    /// Companies without a dividend table get a constant zero column;
    /// with a table, quarters outside the projected years stay missing.
    pub fn add_dividends(
        &mut self,
        table: Option<&DividendTable>,
        paid_marker: &str,
    ) -> Result<&mut Self> {
        match table {
            Some(table) => {
                let flags = dividend_flag(table, paid_marker)?;
                self.frame = left_join_on_quarter(self.frame.clone(), flags)?;
            }
            None => {
                let zeros = vec![0.0f64; self.frame.height()];
                self.frame
                    .with_column(Series::new(DIVIDEND_FLAG_COL.into(), zeros))?;
            }
        }
        Ok(self)
    }

    /// Finish assembly and hand back the panel frame.
    pub fn finish(self) -> DataFrame {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{COMPANY_CODE_COL, QUARTER_COL};
    use crate::scrape::DividendRow;
    use approx::assert_relative_eq;

    fn market_table() -> DataFrame {
        df![
            QUARTER_COL => ["2019/Q1", "2019/Q2", "2019/Q3", "2019/Q4", "2020/Q1"],
            "price" => [10.0, 12.0, 11.0, 13.0, 14.0],
            "ev_ebit" => [8.0, 9.0, 7.5, 8.5, 9.5],
        ]
        .unwrap()
    }

    fn pnl_table() -> DataFrame {
        df![
            QUARTER_COL => ["2019/Q1", "2019/Q2", "2019/Q3", "2019/Q4", "2020/Q1"],
            "net_earnings" => [100.0, 90.0, 95.0, 105.0, 110.0],
            "sales_revenues" => [500.0, 480.0, 490.0, 520.0, 560.0],
        ]
        .unwrap()
    }

    #[test]
    fn market_table_opens_the_panel_on_forward_quarters() {
        let panel = CompanyPanel::from_market_table("11B", &market_table()).unwrap();
        let frame = panel.finish();

        // 2020/Q1 has no forward quarter, so the spine is 2019/Q1..Q4.
        assert_eq!(frame.height(), 4);
        for name in [
            QUARTER_COL,
            COMPANY_CODE_COL,
            "max_price_change_y",
            "price_change_6m",
            "price",
            "ev_ebit",
            "price_yy",
            "ev_ebit_yy",
        ] {
            assert!(frame.column(name).is_ok(), "missing {name}");
        }

        let max_change = frame.column("max_price_change_y").unwrap().f64().unwrap();
        assert_relative_eq!(max_change.get(0).unwrap(), 0.40);
        // Year-over-year needs 2018 data; the whole spine predates it.
        let price_yy = frame.column("price_yy").unwrap().f64().unwrap();
        assert_eq!(price_yy.get(0), None);
    }

    #[test]
    fn statement_tables_join_with_their_dynamics() {
        let mut panel = CompanyPanel::from_market_table("11B", &market_table()).unwrap();
        panel
            .add_statement(&pnl_table(), StatementKind::ProfitLoss)
            .unwrap();
        let frame = panel.finish();

        let earnings = frame.column("net_earnings").unwrap().f64().unwrap();
        assert_relative_eq!(earnings.get(0).unwrap(), 100.0);
        // Lag columns exist even though no quarter satisfies the lookbacks.
        let lagged = frame.column("net_earnings_5Y").unwrap().f64().unwrap();
        assert_eq!(lagged.get(0), None);
    }

    #[test]
    fn dividends_default_to_zero_without_a_table() {
        let mut panel = CompanyPanel::from_market_table("11B", &market_table()).unwrap();
        panel.add_dividends(None, "wypłacona").unwrap();
        let frame = panel.finish();

        let flags = frame.column(DIVIDEND_FLAG_COL).unwrap().f64().unwrap();
        for position in 0..frame.height() {
            assert_eq!(flags.get(position), Some(0.0));
        }
    }

    #[test]
    fn dividend_table_projects_onto_panel_quarters() {
        let table = DividendTable {
            rows: vec![DividendRow::new("2018", "wypłacona")],
        };
        let mut panel = CompanyPanel::from_market_table("11B", &market_table()).unwrap();
        panel.add_dividends(Some(&table), "wypłacona").unwrap();
        let frame = panel.finish();

        let flags = frame.column(DIVIDEND_FLAG_COL).unwrap().f64().unwrap();
        // 2018 payment flags all of 2019; the panel spine is 2019/Q1..Q4.
        for position in 0..frame.height() {
            assert_eq!(flags.get(position), Some(1.0));
        }
    }
}

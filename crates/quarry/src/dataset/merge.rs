//! Merging company panels with the economic panel.

use polars::prelude::*;

use crate::error::{QuarryError, Result};
use crate::normalize::QUARTER_COL;

/// Stack company panel frames and inner-join the economic frame on quarter.
///
/// A record survives only if its quarter exists in the economic frame.
/// Company frames must share one schema — they do when each panel is
/// assembled through the same table sequence.
pub fn merge_panels(companies: &[DataFrame], economic: &DataFrame) -> Result<DataFrame> {
    let mut frames = companies.iter();
    let Some(first) = frames.next() else {
        return Err(QuarryError::Computation(
            "no company panels to merge".to_string(),
        ));
    };
    let mut stacked = first.clone();
    for frame in frames {
        stacked.vstack_mut(frame)?;
    }
    Ok(stacked
        .lazy()
        .join(
            economic.clone().lazy(),
            [col(QUARTER_COL)],
            [col(QUARTER_COL)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::COMPANY_CODE_COL;

    fn company(code: &str, quarters: &[&str]) -> DataFrame {
        let codes: Vec<String> = quarters.iter().map(|_| code.to_string()).collect();
        let labels: Vec<String> = quarters.iter().map(|q| q.to_string()).collect();
        let prices: Vec<f64> = quarters.iter().enumerate().map(|(i, _)| 10.0 + i as f64).collect();
        df![
            QUARTER_COL => labels,
            COMPANY_CODE_COL => codes,
            "price" => prices,
        ]
        .unwrap()
    }

    #[test]
    fn inner_join_drops_quarters_missing_from_the_economic_frame() {
        let economic = df![
            QUARTER_COL => ["2019/Q4", "2020/Q1"],
            "usd_pln" => [3.85, 4.1],
        ]
        .unwrap();
        let companies = [
            company("AAA", &["2019/Q3", "2019/Q4", "2020/Q1"]),
            company("BBB", &["2019/Q4"]),
        ];

        let merged = merge_panels(&companies, &economic).unwrap();

        // AAA 2019/Q3 has no economic quarter and is gone.
        assert_eq!(merged.height(), 3);
        assert!(merged.column("usd_pln").is_ok());
        let codes = merged.column(COMPANY_CODE_COL).unwrap().str().unwrap();
        let seen: Vec<&str> = (0..merged.height()).filter_map(|i| codes.get(i)).collect();
        assert!(seen.contains(&"AAA") && seen.contains(&"BBB"));
    }

    #[test]
    fn no_panels_is_an_error() {
        let economic = df![QUARTER_COL => ["2020/Q1"], "usd_pln" => [4.1]].unwrap();
        assert!(merge_panels(&[], &economic).is_err());
    }
}

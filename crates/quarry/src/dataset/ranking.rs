//! Cross-sectional features: derived ratios, dense ranks, composite score.

use std::collections::HashMap;

use polars::prelude::*;

use crate::config::{CompositeSpec, DatasetConfig, RatioSpec};
use crate::dynamics::ratio;
use crate::error::{QuarryError, Result};
use crate::normalize::QUARTER_COL;

/// Run the full cross-sectional pass over the merged dataset.
///
/// Order matters: capitalization feeds the ratio list, the ratio fields
/// feed the rank lists, the ranks feed the composite.
pub fn cross_sectional_features(frame: &DataFrame, config: &DatasetConfig) -> Result<DataFrame> {
    let mut frame = add_capitalization(frame)?;
    add_ratio_columns(&mut frame, &config.ratios)?;
    for spec in &config.ascending_ranks {
        add_dense_rank(&mut frame, &spec.field, &spec.name, false)?;
    }
    for spec in &config.descending_ranks {
        add_dense_rank(&mut frame, &spec.field, &spec.name, true)?;
    }
    add_composite_rank(&mut frame, &config.composite)?;
    add_quarter_mean(&mut frame, &config.mean_field)?;
    Ok(frame)
}

/// `capitalization = number_of_shares * price`, null-propagating.
pub fn add_capitalization(frame: &DataFrame) -> Result<DataFrame> {
    Ok(frame
        .clone()
        .lazy()
        .with_column((col("number_of_shares") * col("price")).alias("capitalization"))
        .collect()?)
}

/// Append the configured ratio fields, in order, under the degenerate-case
/// convention of [`ratio`].
pub fn add_ratio_columns(frame: &mut DataFrame, ratios: &[RatioSpec]) -> Result<()> {
    for spec in ratios {
        let numerator = frame.column(&spec.numerator)?.f64()?.to_vec();
        let denominator = frame.column(&spec.denominator)?.f64()?.to_vec();
        let values: Vec<Option<f64>> = numerator
            .iter()
            .zip(&denominator)
            .map(|(&n, &d)| ratio(n, d))
            .collect();
        frame.with_column(Series::new(spec.name.as_str().into(), values))?;
    }
    Ok(())
}

/// Append a dense rank of `field` within each quarter as `name`.
///
/// Ties share a rank and the next distinct value takes the immediately
/// following rank — no gaps. Missing values get missing ranks. With
/// `descending`, the largest value ranks first.
pub fn add_dense_rank(
    frame: &mut DataFrame,
    field: &str,
    name: &str,
    descending: bool,
) -> Result<()> {
    let ranks = dense_rank_values(frame, field, descending)?;
    frame.with_column(Series::new(name.into(), ranks))?;
    Ok(())
}

fn dense_rank_values(frame: &DataFrame, field: &str, descending: bool) -> Result<Vec<Option<f64>>> {
    let quarters = frame.column(QUARTER_COL)?.str()?;
    let values = frame.column(field)?.f64()?;

    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for position in 0..frame.height() {
        if let Some(label) = quarters.get(position) {
            groups.entry(label).or_default().push(position);
        }
    }

    let mut ranks: Vec<Option<f64>> = vec![None; frame.height()];
    for rows in groups.values() {
        let mut present: Vec<(usize, f64)> = rows
            .iter()
            .filter_map(|&row| values.get(row).map(|value| (row, value)))
            .collect();
        present.sort_by(|a, b| {
            if descending {
                b.1.total_cmp(&a.1)
            } else {
                a.1.total_cmp(&b.1)
            }
        });

        let mut rank = 0u32;
        let mut previous: Option<f64> = None;
        for (row, value) in present {
            if previous != Some(value) {
                rank += 1;
                previous = Some(value);
            }
            ranks[row] = Some(f64::from(rank));
        }
    }
    Ok(ranks)
}

/// Append the blended score: the equal-weighted mean of the component rank
/// fields, re-ranked dense descending within each quarter.
pub fn add_composite_rank(frame: &mut DataFrame, spec: &CompositeSpec) -> Result<()> {
    if spec.components.is_empty() {
        return Err(QuarryError::Computation(
            "composite rank with no components".to_string(),
        ));
    }
    let mut sums: Vec<Option<f64>> = vec![Some(0.0); frame.height()];
    for component in &spec.components {
        let values = frame.column(component)?.f64()?.to_vec();
        for (slot, value) in sums.iter_mut().zip(values) {
            *slot = match (*slot, value) {
                (Some(acc), Some(v)) => Some(acc + v),
                _ => None,
            };
        }
    }
    let count = spec.components.len() as f64;
    let means: Vec<Option<f64>> = sums
        .into_iter()
        .map(|sum| sum.map(|value| value / count))
        .collect();
    frame.with_column(Series::new(spec.name.as_str().into(), means))?;
    add_dense_rank(frame, &spec.name, &spec.name, true)
}

/// Attach the per-quarter mean of `field` to every row as `avg_<field>`.
pub fn add_quarter_mean(frame: &mut DataFrame, field: &str) -> Result<()> {
    let name = format!("avg_{field}");
    *frame = frame
        .clone()
        .lazy()
        .with_column(col(field).mean().over([col(QUARTER_COL)]).alias(name.as_str()))
        .collect()?;
    Ok(())
}

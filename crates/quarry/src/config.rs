//! Static configuration for normalization and feature engineering.
//!
//! Everything here is supplied up front — the label dictionary, the ratio
//! pairs and the rank lists are configuration, not something discovered
//! from the scraped pages at runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Maps scraped row labels to canonical field names.
///
/// Labels absent from the dictionary pass through unchanged, so partially
/// mapped tables still normalize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureDict {
    labels: HashMap<String, String>,
}

impl FeatureDict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(label, field)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(label, field)| (label.into(), field.into()))
                .collect(),
        }
    }

    /// Map `label` to `field`.
    pub fn insert(&mut self, label: impl Into<String>, field: impl Into<String>) {
        self.labels.insert(label.into(), field.into());
    }

    /// Canonical field name for a row label; unknown labels pass through.
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        self.labels.get(label).map_or(label, String::as_str)
    }

    /// Number of mapped labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dictionary maps no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A derived ratio field: `name = numerator / denominator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSpec {
    /// Name of the derived field
    pub name: String,
    /// Numerator field
    pub numerator: String,
    /// Denominator field
    pub denominator: String,
}

impl RatioSpec {
    /// Create a ratio spec.
    pub fn new(
        name: impl Into<String>,
        numerator: impl Into<String>,
        denominator: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }
}

/// A cross-sectional rank field: `name` dense-ranks `field` within each
/// quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSpec {
    /// Name of the rank field
    pub name: String,
    /// Field the ranking is based on
    pub field: String,
}

impl RankSpec {
    /// Create a rank spec.
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// A blended score: the equal-weighted mean of the component rank fields,
/// itself dense-ranked descending within each quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeSpec {
    /// Name of the composite rank field
    pub name: String,
    /// Rank fields averaged into the score
    pub components: Vec<String>,
}

/// Configuration of the cross-sectional feature pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Derived ratio fields, applied in order
    pub ratios: Vec<RatioSpec>,
    /// Ranks where a smaller field value is better (rank 1)
    pub ascending_ranks: Vec<RankSpec>,
    /// Ranks where a larger field value is better (rank 1)
    pub descending_ranks: Vec<RankSpec>,
    /// Blended valuation-quality score
    pub composite: CompositeSpec,
    /// Field whose per-quarter mean is attached as `avg_<field>`
    pub mean_field: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            ratios: vec![
                RatioSpec::new("capitalization_usd", "capitalization", "usd_pln"),
                RatioSpec::new("relative_strength_6m", "price_change_6m", "wig_6m"),
                RatioSpec::new("price_earnings_net_earnings", "price_earnings", "net_earnings"),
                RatioSpec::new("roce", "ebit", "core_capital"),
                RatioSpec::new("net_debt_ebit", "net_debt", "ebit"),
                RatioSpec::new(
                    "current_assets_short_term_liabilities",
                    "current_assets",
                    "short_term_liabilities",
                ),
                RatioSpec::new(
                    "long_term_liabilities_net_working_capital",
                    "long_term_liabilities",
                    "net_working_capital",
                ),
            ],
            ascending_ranks: vec![
                RankSpec::new("rank_ev_ebit", "ev_ebit"),
                RankSpec::new("rank_price_sales_revenues", "price_sales_revenues"),
                RankSpec::new("rank_price_earnings", "price_earnings"),
            ],
            descending_ranks: vec![
                RankSpec::new("rank_roic", "roic"),
                RankSpec::new("rank_relative_strength_6m", "relative_strength_6m"),
                RankSpec::new("rank_ebit_yy", "ebit_yy"),
            ],
            composite: CompositeSpec {
                name: "greenblatt_rank".to_string(),
                components: vec!["rank_ev_ebit".to_string(), "rank_roic".to_string()],
            },
            mean_field: "price_earnings".to_string(),
        }
    }
}

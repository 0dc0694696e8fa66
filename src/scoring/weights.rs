//! Correlation-derived feature weights
//!
//! Each feature is weighted by the absolute Pearson correlation it has with
//! a reference column, normalized so the weights sum to 1.0.

use super::correlation::pearson;
use crate::core::Table;
use crate::errors::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One feature's share of the composite index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub feature: String,
    /// |r| between the feature and the reference (0.0 when undefined)
    pub correlation: f64,
    pub weight: f64,
}

/// Tolerance on the sum of a deserialized weight vector
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Ordered feature weights, non-negative and summing to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightVectorRecord")]
pub struct WeightVector {
    reference: String,
    entries: Vec<FeatureWeight>,
}

/// Unchecked wire form of [`WeightVector`]
#[derive(Deserialize)]
struct WeightVectorRecord {
    reference: String,
    entries: Vec<FeatureWeight>,
}

impl TryFrom<WeightVectorRecord> for WeightVector {
    type Error = IndexError;

    fn try_from(record: WeightVectorRecord) -> Result<Self> {
        let invalid = |reason: String| IndexError::InvalidWeightVector { reason };

        if record.entries.is_empty() {
            return Err(invalid("no entries".into()));
        }
        let mut seen = HashSet::new();
        for entry in &record.entries {
            if !seen.insert(entry.feature.as_str()) {
                return Err(invalid(format!("feature '{}' listed twice", entry.feature)));
            }
            if !(entry.weight.is_finite() && entry.weight >= 0.0) {
                return Err(invalid(format!(
                    "weight of '{}' is {}",
                    entry.feature, entry.weight
                )));
            }
            if !(0.0..=1.0).contains(&entry.correlation) {
                return Err(invalid(format!(
                    "correlation of '{}' is {}",
                    entry.feature, entry.correlation
                )));
            }
        }
        let total: f64 = record.entries.iter().map(|e| e.weight).sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(format!("weights sum to {total}")));
        }

        Ok(Self {
            reference: record.reference,
            entries: record.entries,
        })
    }
}

impl WeightVector {
    /// Normalize absolute correlations into weights.
    ///
    /// Fails with `ZeroCorrelationSum` when the correlations sum to zero.
    pub fn from_correlations(
        reference: impl Into<String>,
        correlations: Vec<(String, f64)>,
    ) -> Result<Self> {
        let reference = reference.into();
        let total: f64 = correlations.iter().map(|(_, r)| r.abs()).sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(IndexError::ZeroCorrelationSum { reference });
        }

        let entries = correlations
            .into_iter()
            .map(|(feature, r)| FeatureWeight {
                feature,
                correlation: r.abs(),
                weight: r.abs() / total,
            })
            .collect();

        Ok(Self { reference, entries })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.feature == feature)
            .map(|e| e.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureWeight> {
        self.entries.iter()
    }

    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.feature.as_str())
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

/// Derive feature weights from absolute correlation with `reference`.
///
/// Correlations are pairwise complete: a row missing either cell is left
/// out of that one pair. A pair whose correlation is undefined contributes
/// 0.0. The feature set and reference are validated before anything is
/// computed.
pub fn estimate_weights<S: AsRef<str>>(
    table: &Table,
    features: &[S],
    reference: &str,
) -> Result<WeightVector> {
    table.require_features(features)?;
    let reference_values = table.numeric(reference)?;

    let mut correlations = Vec::with_capacity(features.len());
    for feature in features {
        let feature = feature.as_ref();
        let r = pearson(table.numeric(feature)?, reference_values);
        if r.is_none() {
            tracing::debug!(feature, reference, "correlation undefined, weighting as zero");
        }
        correlations.push((feature.to_string(), r.unwrap_or(0.0)));
    }

    WeightVector::from_correlations(reference, correlations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_feature_is_its_own_reference() {
        let table = Table::new().with_numeric("x", [1.0, 2.0, 3.0]).unwrap();
        let weights = estimate_weights(&table, &["x"], "x").unwrap();

        assert_eq!(weights.len(), 1);
        assert!((weights.get("x").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(weights.reference(), "x");
    }

    #[test]
    fn test_weights_use_absolute_correlation() {
        let table = Table::new()
            .with_numeric("income", [1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_numeric("poverty", [4.0, 3.0, 2.0, 1.0])
            .unwrap()
            .with_numeric("schooling", [1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let weights = estimate_weights(&table, &["poverty", "schooling"], "income").unwrap();

        assert!((weights.get("poverty").unwrap() - 0.5).abs() < 1e-12);
        assert!((weights.get("schooling").unwrap() - 0.5).abs() < 1e-12);
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert_eq!(
            weights.features().collect::<Vec<_>>(),
            vec!["poverty", "schooling"]
        );
    }

    #[test]
    fn test_undefined_correlation_counts_as_zero() {
        let table = Table::new()
            .with_numeric("ref", [1.0, 2.0, 3.0])
            .unwrap()
            .with_numeric("flat", [7.0, 7.0, 7.0])
            .unwrap();
        let weights = estimate_weights(&table, &["ref", "flat"], "ref").unwrap();
        assert_eq!(weights.get("flat"), Some(0.0));
        assert_eq!(weights.get("ref"), Some(1.0));
    }

    #[test]
    fn test_zero_correlation_sum_is_an_error() {
        let table = Table::new()
            .with_numeric("ref", [5.0, 5.0, 5.0])
            .unwrap()
            .with_numeric("x", [1.0, 2.0, 3.0])
            .unwrap();
        assert_eq!(
            estimate_weights(&table, &["x"], "ref").unwrap_err(),
            IndexError::ZeroCorrelationSum {
                reference: "ref".into()
            }
        );
    }

    #[test]
    fn test_schema_errors_before_computation() {
        let table = Table::new().with_numeric("x", [1.0, 2.0]).unwrap();
        assert_eq!(
            estimate_weights(&table, &["x", "y"], "x").unwrap_err(),
            IndexError::missing_column("y")
        );
        assert_eq!(
            estimate_weights(&table, &["x"], "ref").unwrap_err(),
            IndexError::missing_column("ref")
        );
    }

    #[test]
    fn test_pairwise_complete_weights() {
        let table = Table::new()
            .with_optional_numeric("ref", [Some(1.0), Some(2.0), Some(3.0), None])
            .unwrap()
            .with_optional_numeric("a", [Some(2.0), None, Some(6.0), Some(8.0)])
            .unwrap()
            .with_numeric("b", [3.0, 1.0, 2.0, 9.0])
            .unwrap();
        let weights = estimate_weights(&table, &["a", "b"], "ref").unwrap();

        // a over rows {0, 2} is perfectly correlated; b over rows {0, 1, 2} gives |r| = 0.5
        let a = weights.iter().find(|w| w.feature == "a").unwrap();
        let b = weights.iter().find(|w| w.feature == "b").unwrap();
        assert!((a.correlation - 1.0).abs() < 1e-12);
        assert!((b.correlation - 0.5).abs() < 1e-12);
        assert!((a.weight - 2.0 / 3.0).abs() < 1e-12);
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_weights_round_trip() {
        let weights = WeightVector::from_correlations(
            "income",
            vec![("income".into(), 1.0), ("poverty".into(), -0.5)],
        )
        .unwrap();
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(serde_json::from_str::<WeightVector>(&json).unwrap(), weights);
    }

    #[test]
    fn test_deserialization_rejects_invalid_distributions() {
        let negative =
            r#"{"reference":"x","entries":[{"feature":"x","correlation":1.0,"weight":-5.0}]}"#;
        let err = serde_json::from_str::<WeightVector>(negative).unwrap_err();
        assert!(err.to_string().contains("weight of 'x' is -5"), "{err}");

        let short = r#"{"reference":"x","entries":[
            {"feature":"x","correlation":1.0,"weight":0.25},
            {"feature":"y","correlation":1.0,"weight":0.25}]}"#;
        let err = serde_json::from_str::<WeightVector>(short).unwrap_err();
        assert!(err.to_string().contains("weights sum to 0.5"), "{err}");

        let empty = r#"{"reference":"x","entries":[]}"#;
        assert!(serde_json::from_str::<WeightVector>(empty).is_err());

        let duplicate = r#"{"reference":"x","entries":[
            {"feature":"x","correlation":1.0,"weight":0.5},
            {"feature":"x","correlation":1.0,"weight":0.5}]}"#;
        assert!(serde_json::from_str::<WeightVector>(duplicate).is_err());
    }
}

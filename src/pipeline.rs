//! End-to-end operations built from the scoring stages
//!
//! raw table → normalize → weights → compose → split

use crate::core::Table;
use crate::errors::Result;
use crate::scoring::{
    compose_index, estimate_weights, min_max_normalize, IndexReport, WeightVector,
};
use crate::split::{train_test_split, SplitConfig, TrainTestSplit};
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info};

/// Columns that drive an index computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRequest {
    pub features: Vec<String>,
    pub reference: String,
    #[serde(default)]
    pub id_column: Option<String>,
}

impl IndexRequest {
    pub fn new(features: Vec<String>, reference: impl Into<String>) -> Self {
        Self {
            features,
            reference: reference.into(),
            id_column: None,
        }
    }

    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = Some(id_column.into());
        self
    }
}

/// Normalized data plus its modeling partition
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub normalized: Table,
    pub split: TrainTestSplit,
}

/// Everything produced by [`compute_socioeconomic_index`]
#[derive(Debug, Clone)]
pub struct IndexOutcome {
    pub normalized: Table,
    pub weights: WeightVector,
    pub report: IndexReport,
    /// Normalized features against the composite index, over classified rows.
    /// `None` unless a partition was requested.
    pub split: Option<TrainTestSplit>,
}

impl IndexOutcome {
    /// Partition the classified rows' normalized features against their index.
    ///
    /// A failed partition leaves the computed index untouched.
    pub fn split_classified(&self, config: &SplitConfig) -> Result<TrainTestSplit> {
        let features: Vec<&str> = self.weights.features().collect();
        let retained = self
            .normalized
            .select(&features)?
            .take_rows(&self.report.retained_rows());
        let target: Vec<Option<f64>> =
            self.report.index_values().into_iter().map(Some).collect();
        debug_span!("split").in_scope(|| train_test_split(&retained, &target, config))
    }
}

/// Normalize the features and derive their correlation weights
pub fn compute_correlation_weights<S: AsRef<str>>(
    table: &Table,
    features: &[S],
    reference: &str,
) -> Result<(Table, WeightVector)> {
    table.require_features(features)?;
    table.numeric(reference)?;

    let normalized = debug_span!("normalize").in_scope(|| min_max_normalize(table, features))?;
    let weights =
        debug_span!("weights").in_scope(|| estimate_weights(&normalized, features, reference))?;

    for entry in weights.iter() {
        info!(
            feature = %entry.feature,
            correlation = entry.correlation,
            weight = entry.weight,
            "computed feature weight"
        );
    }

    Ok((normalized, weights))
}

/// Normalize features and target, then split them for model training
pub fn prepare_model_data<S: AsRef<str>>(
    table: &Table,
    target: &str,
    features: &[S],
    config: &SplitConfig,
) -> Result<PreparedData> {
    table.require_features(features)?;
    table.numeric(target)?;

    let mut columns: Vec<&str> = features.iter().map(|f| f.as_ref()).collect();
    if !columns.contains(&target) {
        columns.push(target);
    }

    let normalized = debug_span!("normalize").in_scope(|| min_max_normalize(table, &columns))?;
    let x = normalized.select(features)?;
    let y = normalized.numeric(target)?;
    let split = debug_span!("split").in_scope(|| train_test_split(&x, y, config))?;

    Ok(PreparedData { normalized, split })
}

/// Compute the composite index and classify every row.
///
/// With a `split` config the normalized features are also partitioned
/// against the index, and a partition failure fails the call. Pass `None`
/// and use [`IndexOutcome::split_classified`] to keep the index when the
/// partition may not be possible.
pub fn compute_socioeconomic_index(
    table: &Table,
    request: &IndexRequest,
    split: Option<&SplitConfig>,
) -> Result<IndexOutcome> {
    let (normalized, weights) =
        compute_correlation_weights(table, &request.features, &request.reference)?;

    let report = debug_span!("compose").in_scope(|| {
        compose_index(&normalized, &weights, request.id_column.as_deref())
    })?;
    info!(
        classified = report.len(),
        dropped = report.dropped_rows().len(),
        "composed socioeconomic index"
    );

    let mut outcome = IndexOutcome {
        normalized,
        weights,
        report,
        split: None,
    };
    if let Some(config) = split {
        outcome.split = Some(outcome.split_classified(config)?);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IndexError;
    use crate::scoring::Tier;

    fn states() -> Table {
        Table::new()
            .with_text("state", ["AC", "BA", "CE", "DF", "ES", "GO", "MG", "PR", "RJ", "SP"])
            .unwrap()
            .with_numeric("income", [1.2, 1.1, 1.0, 4.0, 2.2, 2.0, 2.1, 2.6, 2.9, 3.3])
            .unwrap()
            .with_numeric("schooling", [7.0, 6.8, 6.9, 11.0, 8.6, 8.4, 8.2, 9.0, 9.6, 10.1])
            .unwrap()
            .with_numeric("poverty", [40.0, 42.0, 45.0, 8.0, 20.0, 22.0, 21.0, 15.0, 14.0, 10.0])
            .unwrap()
    }

    fn features() -> Vec<String> {
        vec!["income".into(), "schooling".into(), "poverty".into()]
    }

    #[test]
    fn test_correlation_weights_sum_to_one() {
        let (normalized, weights) =
            compute_correlation_weights(&states(), &features(), "income").unwrap();
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert!(weights.iter().all(|w| w.weight >= 0.0));
        assert_eq!(normalized.numeric("income").unwrap()[3], Some(1.0));
    }

    #[test]
    fn test_full_index_pipeline() {
        let request = IndexRequest::new(features(), "income").with_id_column("state");
        let config = SplitConfig::default();
        let outcome = compute_socioeconomic_index(&states(), &request, Some(&config)).unwrap();

        assert_eq!(outcome.report.len(), 10);
        let top = &outcome.report.sorted_by_index_desc()[0];
        assert_eq!(top.id.as_deref(), Some("DF"));
        assert_eq!(top.tier, Tier::High);
        let split = outcome.split.unwrap();
        assert_eq!(split.n_test(), 3);
        assert_eq!(split.n_train(), 7);
        assert_eq!(split.x_train.n_columns(), 3);
    }

    #[test]
    fn test_index_split_is_reproducible() {
        let request = IndexRequest::new(features(), "income");
        let config = SplitConfig::new(0.2, 1234).unwrap();
        let a = compute_socioeconomic_index(&states(), &request, Some(&config)).unwrap();
        let b = compute_socioeconomic_index(&states(), &request, Some(&config)).unwrap();
        assert_eq!(a.split, b.split);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_prepare_model_data_normalizes_target() {
        let prepared = prepare_model_data(
            &states(),
            "income",
            &["schooling", "poverty"],
            &SplitConfig::default(),
        )
        .unwrap();

        let income = prepared.normalized.numeric("income").unwrap();
        assert!(income.iter().flatten().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(prepared.split.x_train.n_columns(), 2);
        assert_eq!(prepared.split.y_train.len() + prepared.split.y_test.len(), 10);
    }

    #[test]
    fn test_missing_feature_fails_before_computation() {
        let request = IndexRequest::new(vec!["income".into(), "gdp".into()], "income");
        let err = compute_socioeconomic_index(&states(), &request, Some(&SplitConfig::default()))
            .unwrap_err();
        assert_eq!(err, IndexError::missing_column("gdp"));
    }

    #[test]
    fn test_index_survives_an_impossible_split() {
        let table = Table::new().with_numeric("x", [1.0, 2.0]).unwrap();
        let request = IndexRequest::new(vec!["x".into()], "x");
        let config = SplitConfig::new(0.6, 42).unwrap();

        let outcome = compute_socioeconomic_index(&table, &request, None).unwrap();
        assert_eq!(outcome.split, None);
        assert_eq!(outcome.report.index_values(), vec![0.0, 1.0]);
        assert_eq!(outcome.report.tiers(), vec![Tier::Low, Tier::High]);
        assert_eq!(
            outcome.split_classified(&config).unwrap_err(),
            IndexError::InvalidSplit {
                rows: 2,
                test_rows: 2
            }
        );

        assert!(compute_socioeconomic_index(&table, &request, Some(&config)).is_err());
    }
}

//! Composite index: weighted sum, rescaling, and tier classification

use super::normalizer::min_max_scale_values;
use super::tiers::{classify, Tier, TierCounts};
use super::weights::WeightVector;
use crate::core::{IndexScore, Table};
use crate::errors::{IndexError, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// A record with a defined composite index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRow {
    /// Position of the record in the input table
    pub row: usize,
    /// Identifier cell rendered as text, if an id column was requested
    pub id: Option<String>,
    pub index: IndexScore,
    pub tier: Tier,
}

/// Classified records in input order, plus the rows that were excluded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexReport {
    rows: Vec<ClassifiedRow>,
    dropped_rows: Vec<usize>,
}

impl IndexReport {
    pub fn rows(&self) -> &[ClassifiedRow] {
        &self.rows
    }

    /// Input positions of rows whose index was undefined
    pub fn dropped_rows(&self) -> &[usize] {
        &self.dropped_rows
    }

    /// Input positions of the classified rows
    pub fn retained_rows(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.row).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn index_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.index.get()).collect()
    }

    pub fn tiers(&self) -> Vec<Tier> {
        self.rows.iter().map(|r| r.tier).collect()
    }

    pub fn tier_counts(&self) -> TierCounts {
        TierCounts::from_tiers(self.rows.iter().map(|r| r.tier))
    }

    /// Rows ordered from highest to lowest index; ties keep input order
    pub fn sorted_by_index_desc(&self) -> Vec<ClassifiedRow> {
        let mut sorted = self.rows.clone();
        sorted.sort_by(|a, b| b.index.partial_cmp(&a.index).unwrap_or(Ordering::Equal));
        sorted
    }
}

/// Weighted sum of a row's features, `None` if any weighted cell is missing
fn raw_index(columns: &[(&[Option<f64>], f64)], row: usize) -> Option<f64> {
    columns
        .iter()
        .map(|(values, weight)| values[row].map(|v| weight * v))
        .sum()
}

/// Compose, rescale and classify the index for every row of `table`.
///
/// `table` is expected to hold the normalized feature columns the weights
/// were estimated from. Rows with a missing feature cell are dropped rather
/// than classified.
///
/// # Errors
/// * Schema errors if a weighted feature or the id column is absent
/// * `NoClassifiableRows` if every row was dropped
/// * `ConstantIndex` if every retained row has the same raw index
pub fn compose_index(
    table: &Table,
    weights: &WeightVector,
    id_column: Option<&str>,
) -> Result<IndexReport> {
    let features: Vec<&str> = weights.features().collect();
    table.require_features(&features)?;
    let ids = id_column
        .map(|name| {
            table
                .column(name)
                .ok_or_else(|| IndexError::missing_column(name))
        })
        .transpose()?;

    let columns = weights
        .iter()
        .map(|w| Ok((table.numeric(&w.feature)?, w.weight)))
        .collect::<Result<Vec<_>>>()?;

    let mut defined = Vec::with_capacity(table.n_rows());
    let mut raw_values = Vec::with_capacity(table.n_rows());
    let mut dropped_rows = Vec::new();
    for row in 0..table.n_rows() {
        match raw_index(&columns, row) {
            Some(raw) => {
                defined.push(row);
                raw_values.push(raw);
            }
            None => dropped_rows.push(row),
        }
    }

    if defined.is_empty() {
        return Err(IndexError::NoClassifiableRows);
    }
    let scaled = min_max_scale_values(&raw_values).ok_or(IndexError::ConstantIndex)?;

    let mut rows = Vec::with_capacity(defined.len());
    for (row, value) in defined.into_iter().zip(scaled) {
        match (IndexScore::new(value), classify(value)) {
            (Some(index), Some(tier)) => rows.push(ClassifiedRow {
                row,
                id: ids.and_then(|column| column.render(row)),
                index,
                tier,
            }),
            _ => dropped_rows.push(row),
        }
    }
    dropped_rows.sort_unstable();

    if !dropped_rows.is_empty() {
        tracing::debug!(
            dropped = dropped_rows.len(),
            retained = rows.len(),
            "dropped rows with undefined composite index"
        );
    }

    Ok(IndexReport { rows, dropped_rows })
}

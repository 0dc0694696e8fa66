//! Typed, column-major table with ordered named columns
//!
//! Columns keep insertion order and every column has the same number of
//! rows. Missing cells are `None`; non-finite numbers are stored as missing
//! so NaN never reaches the scoring code.

use crate::errors::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// A single column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Numeric(_) => ColumnType::Numeric,
            Column::Text(_) => ColumnType::Text,
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(values) => Some(values),
            Column::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            Column::Text(values) => Some(values),
            Column::Numeric(_) => None,
        }
    }

    /// Render a cell as text, `None` when the cell is missing
    pub fn render(&self, row: usize) -> Option<String> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten().map(|v| v.to_string()),
            Column::Text(values) => values.get(row).cloned().flatten(),
        }
    }

    /// Copy the given rows, in the given order
    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(rows.iter().map(|&r| values[r]).collect()),
            Column::Text(values) => {
                Column::Text(rows.iter().map(|&r| values[r].clone()).collect())
            }
        }
    }

    fn sanitized(self) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(
                values
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .collect(),
            ),
            text => text,
        }
    }
}

/// Ordered collection of equally sized named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.names.iter().any(|n| *n == name) {
            return Err(IndexError::DuplicateColumn { column: name });
        }
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(IndexError::RaggedColumn {
                column: name,
                expected: self.n_rows,
                actual: column.len(),
            });
        }

        self.n_rows = column.len();
        self.names.push(name);
        self.columns.push(column.sanitized());
        Ok(())
    }

    /// Builder form of [`Table::push_column`] for a complete numeric column
    pub fn with_numeric(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
    ) -> Result<Self> {
        let column = Column::Numeric(values.into_iter().map(Some).collect());
        self.push_column(name, column)?;
        Ok(self)
    }

    /// Builder form for a numeric column that may contain missing cells
    pub fn with_optional_numeric(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Result<Self> {
        self.push_column(name, Column::Numeric(values.into_iter().collect()))?;
        Ok(self)
    }

    /// Builder form for a text column
    pub fn with_text<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let column = Column::Text(values.into_iter().map(|s| Some(s.into())).collect());
        self.push_column(name, column)?;
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Look up a numeric column, failing with a schema error otherwise
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        self.column(name)
            .ok_or_else(|| IndexError::missing_column(name))?
            .as_numeric()
            .ok_or_else(|| IndexError::non_numeric_column(name))
    }

    /// Look up a text column
    pub fn text(&self, name: &str) -> Option<&[Option<String>]> {
        self.column(name)?.as_text()
    }

    /// Check that every name exists and is numeric
    pub fn require_numeric<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            self.numeric(name.as_ref())?;
        }
        Ok(())
    }

    /// Validate a feature set: non-empty, no duplicates, all numeric
    pub fn require_features<S: AsRef<str>>(&self, features: &[S]) -> Result<()> {
        if features.is_empty() {
            return Err(IndexError::EmptyFeatureSet);
        }

        let mut seen = HashSet::new();
        for feature in features {
            let feature = feature.as_ref();
            if !seen.insert(feature) {
                return Err(IndexError::DuplicateFeature {
                    column: feature.to_string(),
                });
            }
        }

        self.require_numeric(features)
    }

    /// Replace the cells of an existing numeric column
    pub(crate) fn replace_numeric(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| IndexError::missing_column(name))?;
        if values.len() != self.n_rows {
            return Err(IndexError::RaggedColumn {
                column: name.to_string(),
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        self.columns[index] = Column::Numeric(values).sanitized();
        Ok(())
    }

    /// Copy a subset of rows into a new table, in the order given.
    ///
    /// Callers pass positions they derived from this table; an out-of-range
    /// position panics.
    pub(crate) fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            n_rows: rows.len(),
        }
    }

    /// Keep only the named columns, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let mut selected = Table::new();
        for name in names {
            let name = name.as_ref();
            let column = self
                .column(name)
                .ok_or_else(|| IndexError::missing_column(name))?;
            selected.push_column(name, column.clone())?;
        }
        // An empty selection still describes the same rows
        if names.is_empty() {
            selected.n_rows = self.n_rows;
        }
        Ok(selected)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new()
            .with_text("state", ["SP", "RJ", "MG"])
            .unwrap()
            .with_numeric("income", [3.0, 2.0, 1.0])
            .unwrap()
    }

    #[test]
    fn test_table_builders() {
        let table = sample_table();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["state", "income"]);
        assert_eq!(table.numeric("income").unwrap()[0], Some(3.0));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = sample_table().with_numeric("income", [1.0, 1.0, 1.0]);
        assert_eq!(
            result.unwrap_err(),
            IndexError::DuplicateColumn {
                column: "income".into()
            }
        );
    }

    #[test]
    fn test_ragged_column_rejected() {
        let result = sample_table().with_numeric("schooling", [1.0]);
        assert!(matches!(
            result,
            Err(IndexError::RaggedColumn {
                expected: 3,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_values_become_missing() {
        let table = Table::new()
            .with_numeric("x", [1.0, f64::NAN, f64::INFINITY])
            .unwrap();
        assert_eq!(table.numeric("x").unwrap(), &[Some(1.0), None, None]);
    }

    #[test]
    fn test_numeric_lookup_errors() {
        let table = sample_table();
        assert_eq!(
            table.numeric("missing").unwrap_err(),
            IndexError::missing_column("missing")
        );
        assert_eq!(
            table.numeric("state").unwrap_err(),
            IndexError::non_numeric_column("state")
        );
    }

    #[test]
    fn test_require_features() {
        let table = sample_table();
        assert!(table.require_features(&["income"]).is_ok());
        assert_eq!(
            table.require_features::<&str>(&[]).unwrap_err(),
            IndexError::EmptyFeatureSet
        );
        assert_eq!(
            table.require_features(&["income", "income"]).unwrap_err(),
            IndexError::DuplicateFeature {
                column: "income".into()
            }
        );
    }

    #[test]
    fn test_take_rows_preserves_requested_order() {
        let table = sample_table();
        let subset = table.take_rows(&[2, 0]);
        assert_eq!(subset.n_rows(), 2);
        assert_eq!(subset.numeric("income").unwrap(), &[Some(1.0), Some(3.0)]);
        assert_eq!(
            subset.text("state").unwrap(),
            &[Some("MG".to_string()), Some("SP".to_string())]
        );
    }

    #[test]
    fn test_select_columns() {
        let table = sample_table();
        let selected = table.select(&["income"]).unwrap();
        assert_eq!(selected.n_columns(), 1);
        assert_eq!(selected.n_rows(), 3);
        assert!(table.select(&["nope"]).is_err());
    }

    #[test]
    fn test_render_cells() {
        let table = sample_table();
        assert_eq!(table.column("state").unwrap().render(1), Some("RJ".into()));
        assert_eq!(table.column("income").unwrap().render(2), Some("1".into()));
        assert_eq!(table.column("income").unwrap().render(9), None);
    }
}

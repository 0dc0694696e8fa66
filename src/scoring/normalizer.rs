//! Min-max normalization of numeric columns into [0, 1]

use crate::core::Table;
use crate::errors::{IndexError, Result};

/// Observed range of the present values in a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range over present values, `None` if there are none
    pub fn of(values: impl IntoIterator<Item = Option<f64>>) -> Option<Self> {
        values
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<ValueRange>, x| {
                Some(acc.map_or(ValueRange { min: x, max: x }, |r| ValueRange {
                    min: r.min.min(x),
                    max: r.max.max(x),
                }))
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Zero-width ranges cannot be rescaled
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// (x - min) / (max - min)
    pub fn scale(&self, x: f64) -> f64 {
        (x - self.min) / self.span()
    }
}

/// Rescale each listed column so its minimum maps to 0.0 and its maximum to 1.0.
///
/// Returns a new table; unlisted columns and missing cells pass through
/// unchanged. Every listed column is checked before any scaling happens.
///
/// # Errors
/// * `MissingColumn` / `NonNumericColumn` for schema problems
/// * `EmptyColumn` if a listed column has no present values
/// * `ConstantColumn` if a listed column has max == min
pub fn min_max_normalize<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Table> {
    table.require_numeric(columns)?;

    let mut ranges = Vec::with_capacity(columns.len());
    for name in columns {
        let name = name.as_ref();
        let values = table.numeric(name)?;
        let range =
            ValueRange::of(values.iter().copied()).ok_or_else(|| IndexError::EmptyColumn {
                column: name.to_string(),
            })?;
        if range.is_degenerate() {
            return Err(IndexError::constant_column(name));
        }
        ranges.push((name, range));
    }

    let mut normalized = table.clone();
    for (name, range) in ranges {
        let scaled = table
            .numeric(name)?
            .iter()
            .map(|v| v.map(|x| range.scale(x)))
            .collect();
        normalized.replace_numeric(name, scaled)?;
        tracing::trace!(column = name, min = range.min, max = range.max, "scaled column");
    }

    Ok(normalized)
}

/// Min-max scale a complete vector, `None` if it is empty or constant
pub fn min_max_scale_values(values: &[f64]) -> Option<Vec<f64>> {
    let range = ValueRange::of(values.iter().map(|&v| Some(v)))?;
    if range.is_degenerate() {
        return None;
    }
    Some(values.iter().map(|&x| range.scale(x)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_normalize_normal() {
        let table = Table::new()
            .with_numeric("a", [0.0, 5.0, 10.0])
            .unwrap()
            .with_numeric("b", [10.0, 20.0, 30.0])
            .unwrap();
        let scaled = min_max_normalize(&table, &["a", "b"]).unwrap();

        assert_eq!(scaled.numeric("a").unwrap(), &[Some(0.0), Some(0.5), Some(1.0)]);
        assert_eq!(scaled.numeric("b").unwrap(), &[Some(0.0), Some(0.5), Some(1.0)]);
    }

    #[test]
    fn test_unlisted_columns_untouched() {
        let table = Table::new()
            .with_text("state", ["SP", "RJ"])
            .unwrap()
            .with_numeric("a", [2.0, 4.0])
            .unwrap()
            .with_numeric("b", [100.0, 300.0])
            .unwrap();
        let scaled = min_max_normalize(&table, &["a"]).unwrap();

        assert_eq!(scaled.numeric("b").unwrap(), table.numeric("b").unwrap());
        assert_eq!(scaled.column("state"), table.column("state"));
        // Input is never modified
        assert_eq!(table.numeric("a").unwrap(), &[Some(2.0), Some(4.0)]);
    }

    #[test]
    fn test_missing_cells_pass_through() {
        let table = Table::new()
            .with_optional_numeric("a", [Some(-10.0), None, Some(10.0), Some(0.0)])
            .unwrap();
        let scaled = min_max_normalize(&table, &["a"]).unwrap();
        assert_eq!(
            scaled.numeric("a").unwrap(),
            &[Some(0.0), None, Some(1.0), Some(0.5)]
        );
    }

    #[test]
    fn test_constant_column_is_an_error() {
        let table = Table::new().with_numeric("a", [5.0, 5.0, 5.0]).unwrap();
        assert_eq!(
            min_max_normalize(&table, &["a"]).unwrap_err(),
            IndexError::constant_column("a")
        );
    }

    #[test]
    fn test_all_missing_column_is_an_error() {
        let table = Table::new()
            .with_optional_numeric("a", [None, None])
            .unwrap();
        assert_eq!(
            min_max_normalize(&table, &["a"]).unwrap_err(),
            IndexError::EmptyColumn { column: "a".into() }
        );
    }

    #[test]
    fn test_schema_checked_before_scaling() {
        let table = Table::new()
            .with_numeric("a", [5.0, 5.0])
            .unwrap()
            .with_text("name", ["x", "y"])
            .unwrap();
        // Missing column wins over the constant column listed first
        assert_eq!(
            min_max_normalize(&table, &["a", "nope"]).unwrap_err(),
            IndexError::missing_column("nope")
        );
        assert_eq!(
            min_max_normalize(&table, &["name"]).unwrap_err(),
            IndexError::non_numeric_column("name")
        );
    }

    #[test]
    fn test_min_max_scale_values() {
        assert_eq!(
            min_max_scale_values(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            Some(vec![0.0, 0.25, 0.5, 0.75, 1.0])
        );
        assert_eq!(min_max_scale_values(&[3.0, 3.0, 3.0]), None);
        assert_eq!(min_max_scale_values(&[]), None);
    }
}

//! Shared error types for index computation
//!
//! Every precondition the pipeline checks maps to exactly one variant, so a
//! failed call reports which column or which degenerate condition stopped it.

use thiserror::Error;

/// Main error type for socindex operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// A requested column is absent from the table
    #[error("Schema error: column '{column}' not found")]
    MissingColumn { column: String },

    /// A column used as a feature or reference is not numeric
    #[error("Schema error: column '{column}' is not numeric")]
    NonNumericColumn { column: String },

    /// The same feature name appears twice in a feature list
    #[error("Schema error: feature '{column}' listed more than once")]
    DuplicateFeature { column: String },

    /// Two table columns share a name
    #[error("Schema error: table already has a column named '{column}'")]
    DuplicateColumn { column: String },

    /// A column does not have the same length as the rest of the table
    #[error("Schema error: column '{column}' has {actual} rows, table has {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A serialized weight vector does not hold a valid distribution
    #[error("Schema error: invalid weight vector: {reason}")]
    InvalidWeightVector { reason: String },

    /// No features were requested
    #[error("Schema error: feature set is empty")]
    EmptyFeatureSet,

    /// A target series does not line up with the feature table
    #[error("Schema error: expected {expected} target values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Min-max scaling of a column whose values are all equal
    #[error("Degenerate data: column '{column}' has zero variance (max == min)")]
    ConstantColumn { column: String },

    /// Min-max scaling of a column with no present values
    #[error("Degenerate data: column '{column}' has no values")]
    EmptyColumn { column: String },

    /// Every feature has zero correlation with the reference
    #[error("Degenerate data: absolute correlations with '{reference}' sum to zero")]
    ZeroCorrelationSum { reference: String },

    /// Every classifiable row has the same raw composite index
    #[error("Degenerate data: composite index is constant across all rows")]
    ConstantIndex,

    /// Every row was dropped because its composite index was undefined
    #[error("Degenerate data: no row has a defined composite index")]
    NoClassifiableRows,

    /// Test-set fraction outside the open interval (0, 1)
    #[error("Invalid split: test fraction must be in (0, 1), got {value}")]
    InvalidTestFraction { value: f64 },

    /// The requested fraction leaves the training or testing set empty
    #[error("Invalid split: {rows} rows with {test_rows} test rows leaves an empty partition")]
    InvalidSplit { rows: usize, test_rows: usize },
}

impl IndexError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn non_numeric_column(column: impl Into<String>) -> Self {
        Self::NonNumericColumn {
            column: column.into(),
        }
    }

    pub fn constant_column(column: impl Into<String>) -> Self {
        Self::ConstantColumn {
            column: column.into(),
        }
    }

    /// True for errors caused by the shape of the input rather than its values
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. }
                | Self::NonNumericColumn { .. }
                | Self::DuplicateFeature { .. }
                | Self::DuplicateColumn { .. }
                | Self::RaggedColumn { .. }
                | Self::InvalidWeightVector { .. }
                | Self::EmptyFeatureSet
                | Self::LengthMismatch { .. }
        )
    }

    /// True for errors raised instead of dividing by zero
    pub fn is_degenerate_data(&self) -> bool {
        matches!(
            self,
            Self::ConstantColumn { .. }
                | Self::EmptyColumn { .. }
                | Self::ZeroCorrelationSum { .. }
                | Self::ConstantIndex
                | Self::NoClassifiableRows
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IndexError::missing_column("income");
        assert_eq!(err.to_string(), "Schema error: column 'income' not found");

        let err = IndexError::constant_column("literacy");
        assert_eq!(
            err.to_string(),
            "Degenerate data: column 'literacy' has zero variance (max == min)"
        );

        let err = IndexError::ZeroCorrelationSum {
            reference: "income".into(),
        };
        assert!(err.to_string().contains("sum to zero"));
    }

    #[test]
    fn test_error_classification() {
        assert!(IndexError::missing_column("a").is_schema_error());
        assert!(IndexError::non_numeric_column("a").is_schema_error());
        assert!(IndexError::EmptyFeatureSet.is_schema_error());
        assert!(IndexError::InvalidWeightVector {
            reason: "no entries".into()
        }
        .is_schema_error());
        assert!(!IndexError::ConstantIndex.is_schema_error());

        assert!(IndexError::constant_column("a").is_degenerate_data());
        assert!(IndexError::NoClassifiableRows.is_degenerate_data());
        assert!(!IndexError::InvalidTestFraction { value: 2.0 }.is_degenerate_data());
        assert!(!IndexError::InvalidTestFraction { value: 2.0 }.is_schema_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<IndexError>();
        assert_sync::<IndexError>();
    }
}

//! Refined types for domain invariants
//!
//! Values are validated once at construction and can then be passed around
//! without re-checking:
//! - [`TestFraction`]: share of rows held out for testing, open interval (0, 1)
//! - [`IndexScore`]: rescaled composite index, closed interval [0, 1]

use crate::errors::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// Fraction of rows assigned to the test partition.
///
/// Valid range: (0.0, 1.0), exclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TestFraction(f64);

impl TestFraction {
    /// Default held-out share
    pub const DEFAULT: f64 = 0.3;

    /// Create a test fraction, validating it's in (0.0, 1.0).
    pub fn new(value: f64) -> Result<Self> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(IndexError::InvalidTestFraction { value })
        }
    }

    /// Get the inner value.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for TestFraction {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for TestFraction {
    type Error = IndexError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TestFraction> for f64 {
    fn from(fraction: TestFraction) -> Self {
        fraction.0
    }
}

/// Composite index value in the unit interval [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct IndexScore(f64);

impl IndexScore {
    /// Create an index score, `None` unless the value is in [0.0, 1.0].
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    /// Get the inner value.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl std::ops::Deref for IndexScore {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

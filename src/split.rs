//! Seeded random train/test partitioning
//!
//! Row positions are shuffled with a generator seeded from the caller's
//! seed, so the same table, fraction and seed always produce the same
//! partition. There is no process-wide random state.

use crate::core::{Table, TestFraction};
use crate::errors::{IndexError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Default seed for reproducible partitions
pub const DEFAULT_SEED: u64 = 42;

/// Partition parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub test_fraction: TestFraction,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: TestFraction::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SplitConfig {
    pub fn new(test_fraction: f64, seed: u64) -> Result<Self> {
        Ok(Self {
            test_fraction: TestFraction::new(test_fraction)?,
            seed,
        })
    }

    /// Number of test rows for `n` rows: ceil(fraction * n)
    pub fn test_rows(&self, n: usize) -> usize {
        (self.test_fraction.get() * n as f64).ceil() as usize
    }
}

/// Features and target divided into training and testing subsets
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub x_train: Table,
    pub x_test: Table,
    pub y_train: Vec<Option<f64>>,
    pub y_test: Vec<Option<f64>>,
    /// Input row positions of the training rows, in shuffled order
    pub train_rows: Vec<usize>,
    /// Input row positions of the testing rows, in shuffled order
    pub test_rows: Vec<usize>,
}

impl TrainTestSplit {
    pub fn n_train(&self) -> usize {
        self.train_rows.len()
    }

    pub fn n_test(&self) -> usize {
        self.test_rows.len()
    }
}

/// Shuffle `0..n` and cut it into (train, test) row positions.
///
/// # Errors
/// `InvalidSplit` if either partition would be empty.
pub fn split_indices(n: usize, config: &SplitConfig) -> Result<(Vec<usize>, Vec<usize>)> {
    let n_test = config.test_rows(n);
    if n_test == 0 || n_test >= n {
        return Err(IndexError::InvalidSplit {
            rows: n,
            test_rows: n_test,
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows: Vec<usize> = (0..n).collect();
    rows.shuffle(&mut rng);

    let train = rows.split_off(n_test);
    Ok((train, rows))
}

/// Randomly partition a feature table and its target into train/test sets.
///
/// Each feature row stays paired with its target value.
///
/// # Errors
/// * `LengthMismatch` if `target` does not have one value per row
/// * `InvalidSplit` if either partition would be empty
pub fn train_test_split(
    features: &Table,
    target: &[Option<f64>],
    config: &SplitConfig,
) -> Result<TrainTestSplit> {
    if target.len() != features.n_rows() {
        return Err(IndexError::LengthMismatch {
            expected: features.n_rows(),
            actual: target.len(),
        });
    }

    let (train_rows, test_rows) = split_indices(features.n_rows(), config)?;
    tracing::debug!(
        train = train_rows.len(),
        test = test_rows.len(),
        seed = config.seed,
        "partitioned rows"
    );

    Ok(TrainTestSplit {
        x_train: features.take_rows(&train_rows),
        x_test: features.take_rows(&test_rows),
        y_train: train_rows.iter().map(|&r| target[r]).collect(),
        y_test: test_rows.iter().map(|&r| target[r]).collect(),
        train_rows,
        test_rows,
    })
}

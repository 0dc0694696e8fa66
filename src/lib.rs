// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod scoring;
pub mod split;

// Re-export commonly used types
pub use crate::core::{Column, ColumnType, IndexScore, Table, TestFraction};

pub use crate::errors::{IndexError, Result};

pub use crate::scoring::{
    classify, compose_index, estimate_weights, min_max_normalize, ClassifiedRow, FeatureWeight,
    IndexReport, Tier, TierCounts, WeightVector,
};

pub use crate::split::{split_indices, train_test_split, SplitConfig, TrainTestSplit};

pub use crate::pipeline::{
    compute_correlation_weights, compute_socioeconomic_index, prepare_model_data, IndexOutcome,
    IndexRequest, PreparedData,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::config::{load_config, SocindexConfig};

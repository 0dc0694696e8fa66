//! CLI command implementations for socindex operations.
//!
//! Each submodule handles one command: it merges CLI flags over the
//! discovered configuration, loads the input table, runs the pipeline and
//! renders the result.
//!
//! Available commands:
//! - **index**: Compute and classify the composite index
//! - **weights**: Print the correlation weights
//! - **prepare**: Normalize and partition features and target
//! - **init**: Initialize a new socindex configuration file

pub mod index;
pub mod init;
pub mod prepare;
pub mod weights;

pub use index::{run_index, IndexConfig};
pub use init::init_config;
pub use prepare::{run_prepare, PrepareConfig};
pub use weights::{run_weights, WeightsConfig};

use crate::cli;
use crate::config::{load_config, load_config_file, SocindexConfig};
use crate::io::output::OutputFormat;
use crate::split::SplitConfig;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Explicit `--config` file, or the nearest discovered one
pub(crate) fn resolve_config(path: Option<&Path>) -> Result<SocindexConfig> {
    match path {
        Some(path) => load_config_file(path),
        None => Ok(load_config()),
    }
}

pub(crate) fn resolve_format(
    format: Option<cli::OutputFormat>,
    config: &SocindexConfig,
) -> OutputFormat {
    if let Some(format) = format {
        return format.into();
    }
    match config.default_format() {
        Some(name) => OutputFormat::parse(name).unwrap_or_else(|| {
            tracing::warn!("Unknown default_format '{}'. Using terminal.", name);
            OutputFormat::Terminal
        }),
        None => OutputFormat::Terminal,
    }
}

/// Configured partition parameters with CLI overrides applied
pub(crate) fn resolve_split(
    config: &SocindexConfig,
    test_fraction: Option<f64>,
    seed: Option<u64>,
) -> Result<SplitConfig> {
    let base = config.split_config();
    let split = SplitConfig::new(
        test_fraction.unwrap_or(base.test_fraction.get()),
        seed.unwrap_or(base.seed),
    )?;
    Ok(split)
}

/// Empty CLI feature lists defer to the configuration
pub(crate) fn explicit_features(features: Vec<String>) -> Option<Vec<String>> {
    if features.is_empty() {
        None
    } else {
        Some(features)
    }
}

fn should_use_color(config: &SocindexConfig, to_file: bool) -> bool {
    if std::env::var_os("NO_COLOR").is_some() || to_file {
        return false;
    }
    config
        .use_color()
        .unwrap_or_else(|| std::io::stdout().is_terminal())
}

pub(crate) fn configure_color(config: &SocindexConfig, output: Option<&Path>) {
    colored::control::set_override(should_use_color(config, output.is_some()));
}

/// Write a rendered report to `output`, or to stdout
pub(crate) fn deliver(rendered: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let text = String::from_utf8_lossy(rendered);
            crate::io::write_file(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("wrote report to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

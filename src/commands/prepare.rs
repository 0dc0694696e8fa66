use super::{
    configure_color, deliver, explicit_features, resolve_config, resolve_format, resolve_split,
};
use crate::cli;
use crate::io::{self, output::create_writer};
use crate::pipeline::prepare_model_data;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct PrepareConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub target: String,
    pub features: Vec<String>,
    pub test_fraction: Option<f64>,
    pub seed: Option<u64>,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn run_prepare(config: PrepareConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let features = explicit_features(config.features)
        .or_else(|| {
            settings
                .index
                .as_ref()
                .map(|section| section.features.clone())
                .filter(|features| !features.is_empty())
        })
        .context(
            "No features given. Pass --features or set them under [index] in .socindex.toml",
        )?;
    let split = resolve_split(&settings, config.test_fraction, config.seed)?;
    let format = resolve_format(config.format, &settings);

    let table = io::load_table(&config.input)?;
    let prepared = prepare_model_data(&table, &config.target, &features, &split)
        .with_context(|| format!("Failed to prepare {}", config.input.display()))?;

    configure_color(&settings, config.output.as_deref());
    let mut rendered = Vec::new();
    create_writer(format, &mut rendered).write_partition(&prepared)?;
    deliver(&rendered, config.output.as_deref())
}

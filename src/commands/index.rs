use super::{
    configure_color, deliver, explicit_features, resolve_config, resolve_format, resolve_split,
};
use crate::cli;
use crate::io::{self, output::create_writer};
use crate::pipeline::compute_socioeconomic_index;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct IndexConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub features: Vec<String>,
    pub reference: Option<String>,
    pub id_column: Option<String>,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub test_fraction: Option<f64>,
    pub seed: Option<u64>,
}

pub fn run_index(config: IndexConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let request = settings
        .index_request(
            explicit_features(config.features),
            config.reference,
            config.id_column,
        )
        .context(
            "No features or reference given. Pass --features and --reference \
             or set them under [index] in .socindex.toml",
        )?;
    let split = resolve_split(&settings, config.test_fraction, config.seed)?;
    let format = resolve_format(config.format, &settings);

    let table = io::load_table(&config.input)?;
    let mut outcome = compute_socioeconomic_index(&table, &request, None)
        .with_context(|| format!("Failed to compute index for {}", config.input.display()))?;
    match outcome.split_classified(&split) {
        Ok(partition) => outcome.split = Some(partition),
        Err(e) => tracing::warn!("{}. Reporting the index without a partition.", e),
    }

    configure_color(&settings, config.output.as_deref());
    let mut rendered = Vec::new();
    create_writer(format, &mut rendered).write_index(&outcome)?;
    deliver(&rendered, config.output.as_deref())
}

use super::{configure_color, deliver, explicit_features, resolve_config, resolve_format};
use crate::cli;
use crate::io::{self, output::create_writer};
use crate::pipeline::compute_correlation_weights;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct WeightsConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub features: Vec<String>,
    pub reference: Option<String>,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn run_weights(config: WeightsConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let request = settings
        .index_request(explicit_features(config.features), config.reference, None)
        .context(
            "No features or reference given. Pass --features and --reference \
             or set them under [index] in .socindex.toml",
        )?;
    let format = resolve_format(config.format, &settings);

    let table = io::load_table(&config.input)?;
    let (_, weights) =
        compute_correlation_weights(&table, &request.features, &request.reference)
            .with_context(|| {
                format!("Failed to estimate weights for {}", config.input.display())
            })?;

    configure_color(&settings, config.output.as_deref());
    let mut rendered = Vec::new();
    create_writer(format, &mut rendered).write_weights(&weights)?;
    deliver(&rendered, config.output.as_deref())
}

use anyhow::Result;
use socindex::cli::{parse_args, Commands};
use socindex::commands::{self, IndexConfig, PrepareConfig, WeightsConfig};
use tracing_subscriber::EnvFilter;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = parse_args();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Index {
            input,
            features,
            reference,
            id_column,
            format,
            output,
            test_fraction,
            seed,
        } => commands::run_index(IndexConfig {
            input,
            config: cli.config,
            features,
            reference,
            id_column,
            format,
            output,
            test_fraction,
            seed,
        }),
        Commands::Weights {
            input,
            features,
            reference,
            format,
            output,
        } => commands::run_weights(WeightsConfig {
            input,
            config: cli.config,
            features,
            reference,
            format,
            output,
        }),
        Commands::Prepare {
            input,
            target,
            features,
            test_fraction,
            seed,
            format,
            output,
        } => commands::run_prepare(PrepareConfig {
            input,
            config: cli.config,
            target,
            features,
            test_fraction,
            seed,
            format,
            output,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the default level
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

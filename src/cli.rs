use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "socindex")]
#[command(
    about = "Correlation-weighted socioeconomic index with tier classification",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest .socindex.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    /// -v: debug logging
    /// -vv: trace logging
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute, rescale and classify the composite index
    Index {
        /// JSON array of records
        input: PathBuf,

        /// Feature columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,

        /// Reference column the weights are correlated against
        #[arg(long)]
        reference: Option<String>,

        /// Column used to label rows in the report
        #[arg(long = "id-column")]
        id_column: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fraction of classified rows held out for testing
        #[arg(long = "test-fraction")]
        test_fraction: Option<f64>,

        /// Seed for the train/test shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the correlation weights of the features
    Weights {
        /// JSON array of records
        input: PathBuf,

        /// Feature columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,

        /// Reference column the weights are correlated against
        #[arg(long)]
        reference: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize features and target, then partition them for modeling
    Prepare {
        /// JSON array of records
        input: PathBuf,

        /// Target column
        #[arg(long)]
        target: String,

        /// Feature columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,

        /// Fraction of rows held out for testing
        #[arg(long = "test-fraction")]
        test_fraction: Option<f64>,

        /// Seed for the train/test shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

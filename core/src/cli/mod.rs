pub mod report;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for truthmap
#[derive(Parser, Debug)]
#[command(name = "truthmap")]
#[command(about = "Reconcile DBT volumes with EA1141 clinical outcome tables")]
#[command(version)]
pub struct Cli {
    /// Image root laid out as <patient>/<study>/<file>.dcm
    #[arg(value_name = "IMAGE_ROOT")]
    pub image_root: PathBuf,

    /// Directory holding the clinical outcome tables
    #[arg(value_name = "CLINICAL_DIR")]
    pub clinical_dir: PathBuf,

    /// Output file for the volume table (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read subject identifiers from this column instead of the last one
    #[arg(long, value_name = "COLUMN")]
    pub subject_column: Option<String>,

    /// Field delimiter of the clinical tables
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON label mapping
    Json,
}

/// Initialises `env_logger` at Info, or Debug when verbose
///
/// `RUST_LOG` still applies on top of the chosen level.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

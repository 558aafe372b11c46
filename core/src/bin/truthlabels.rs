use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use truthmap_core::cli::{setup_logging, OutputFormat};
use truthmap_core::{
    build_label_mapping, AggregationOptions, LabelMapping, Result, TextReport, VolumeTable,
};

/// CLI tool for deriving ground-truth labels from a reconciled volume table
#[derive(Parser, Debug)]
#[command(name = "truthlabels")]
#[command(about = "Derive keyed ground-truth labels from a truthmap volume table")]
#[command(version)]
struct Cli {
    /// Volume table written by truthmap
    #[arg(value_name = "VOLUMES")]
    volumes: PathBuf,

    /// Ground-truth definition: biopsy or acr4+
    #[arg(long, default_value = "biopsy")]
    gt_type: String,

    /// Label granularity: volume-wise, breast-wise or patient-wise
    #[arg(long, default_value = "volume-wise")]
    scope: String,

    /// Only DBT findings define the label
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    dbt_only: bool,

    /// Discard volumes where MRI is more suspicious than DBT
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    mri_excluded: bool,

    /// Output file for the label mapping
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Stdout format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Reject bad configuration before touching the volume table
    let options = AggregationOptions::parse(&cli.gt_type, &cli.scope, cli.dbt_only, cli.mri_excluded)?;
    info!("Using options: {:?}", options);

    let table = VolumeTable::read_json(&cli.volumes)?;
    info!("Loaded {} volumes from {}", table.len(), cli.volumes.display());

    let mapping = build_label_mapping(&table, &options);

    if let Some(ref path) = cli.output {
        mapping.write_json(path)?;
        info!("Wrote {} keys to {}", mapping.len(), path.display());
    }

    output_mapping(&mapping, &options, &cli.format)
}

fn output_mapping(
    mapping: &LabelMapping,
    options: &AggregationOptions,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", TextReport::new(mapping, options)),
        OutputFormat::Json => println!("{}", mapping.to_json_string()?),
    }
    Ok(())
}

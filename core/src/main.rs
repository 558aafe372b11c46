use clap::Parser;
use log::{error, info};
use std::process;
use truthmap_core::cli::{setup_logging, Cli};
use truthmap_core::imaging::enumerate_volumes;
use truthmap_core::{reconcile_volumes, ClinicalIndex, Result, TableSchema, TruthError};

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
    if !cli.image_root.is_dir() {
        return Err(TruthError::InvalidValue(format!(
            "{} is not a directory",
            cli.image_root.display()
        )));
    }

    let schema = table_schema(cli)?;
    let index = ClinicalIndex::from_dir(&cli.clinical_dir, &schema)?;

    info!("Processing image root: {}", cli.image_root.display());
    let records = enumerate_volumes(&cli.image_root)?;
    let table = reconcile_volumes(records, &index)?;

    match cli.output {
        Some(ref path) => {
            table.write_json(path)?;
            info!("Wrote {} volumes to {}", table.len(), path.display());
        }
        None => println!("{}", table.to_json_string()?),
    }

    Ok(())
}

fn table_schema(cli: &Cli) -> Result<TableSchema> {
    if !cli.delimiter.is_ascii() {
        return Err(TruthError::InvalidValue(format!(
            "delimiter '{}' is not a single-byte character",
            cli.delimiter
        )));
    }

    let mut schema = TableSchema::default().with_delimiter(cli.delimiter as u8);
    if let Some(ref column) = cli.subject_column {
        schema = schema.with_subject_column(column);
    }
    Ok(schema)
}

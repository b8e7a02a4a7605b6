use bratskit_core::cli::report::ConversionSummary;
use bratskit_core::cli::setup_logging;
use bratskit_core::{convert_all, BratsDataset, DEFAULT_POOL_SIZE};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// CLI tool for converting a BraTS training set into compressed records
#[derive(Parser, Debug)]
#[command(name = "bratsconvert")]
#[command(about = "Convert a BraTS data set into compressed training records")]
#[command(version)]
struct Cli {
    /// BraTS root data set directory
    #[arg(long = "brats", value_name = "DIR")]
    brats_root: PathBuf,

    /// BraTS release year
    #[arg(long, default_value_t = 2018)]
    year: u16,

    /// Output directory for the record files
    #[arg(long, value_name = "DIR")]
    output: PathBuf,

    /// Size of the conversion worker pool
    #[arg(long = "pool-size", default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Logging level
    #[arg(long = "log", default_value = "warn", value_name = "LEVEL")]
    log_level: String,

    /// Redirect logging to this file
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli.log_level, cli.log_file.as_deref()) {
        eprintln!("Error: failed to set up logging: {}", e);
        process::exit(1);
    }

    let dataset = match BratsDataset::open(&cli.brats_root, cli.year) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("failed to open data set: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let ids = match dataset.patient_ids() {
        Ok(ids) => ids,
        Err(e) => {
            error!("failed to enumerate patients: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if ids.is_empty() {
        eprintln!(
            "Error: no patient directories found in {}",
            dataset.train_dir().display()
        );
        process::exit(1);
    }

    info!(
        "converting {} patients with a pool of {} workers",
        ids.len(),
        cli.pool_size
    );

    let report = match convert_all(&ids, Arc::new(dataset), &cli.output, cli.pool_size) {
        Ok(report) => report,
        Err(e) => {
            error!("conversion failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("{}", ConversionSummary::new(&report));

    if report.converted.is_empty() {
        process::exit(1);
    }
}

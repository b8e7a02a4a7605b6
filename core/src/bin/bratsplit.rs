use bratskit_core::cli::setup_logging;
use bratskit_core::partition::{plan_partition, write_partition};
use bratskit_core::BratsDataset;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

/// CLI tool for partitioning a BraTS training set into held-out id sets
#[derive(Parser, Debug)]
#[command(name = "bratsplit")]
#[command(about = "Partition BraTS patient ids into test/validation/train sets")]
#[command(version)]
struct Cli {
    /// BraTS root data set directory
    #[arg(long = "brats", value_name = "DIR")]
    brats_root: PathBuf,

    /// BraTS release year
    #[arg(long, default_value_t = 2018)]
    year: u16,

    /// Directory the id lists are written to
    #[arg(long, value_name = "DIR")]
    output: PathBuf,

    /// Size of the test set
    #[arg(long, default_value_t = 40)]
    test: usize,

    /// Size of the validation set
    #[arg(long, default_value_t = 40)]
    validation: usize,

    /// Seed for the shuffle; omit for a fresh random partition
    #[arg(long)]
    seed: Option<u64>,

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
    info!("found {} patients", ids.len());

    let partition = match plan_partition(&ids, cli.test, cli.validation, cli.seed) {
        Ok(partition) => partition,
        Err(e) => {
            error!("partition planning failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_partition(&partition, &cli.output) {
        error!("failed to write partition files: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!(
        "Partitioned {} patients: {} test, {} validation, {} train",
        ids.len(),
        partition.test.len(),
        partition.validation.len(),
        partition.train.len()
    );
}

//! Shared command-line plumbing for the bratskit binaries.

pub mod report;

use log::LevelFilter;
use std::fs::File;
use std::io;
use std::path::Path;

/// Initializes the logging pipeline for a binary
///
/// `level` is parsed case-insensitively (`off`, `error`, `warn`, `info`,
/// `debug`, `trace`); an unrecognized value falls back to `warn`. When
/// `log_file` is given, all output is redirected there instead of stderr.
pub fn setup_logging(level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(filter);
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

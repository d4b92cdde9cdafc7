mod classifier;
mod config;
mod error;
mod extractor;
mod metadata;
mod processor;
mod report;
#[cfg(test)]
mod test_support;
mod walker;

use crate::config::{AppConfig, SortMode};
use crate::error::AppError;
use crate::processor::SortOptions;
use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

/// Photo Sorter - organize images by EXIF date or camera
#[derive(Parser, Debug)]
#[command(name = "photo_sorter", version)]
struct Cli {
    /// Folder holding the images to sort
    input_folder: PathBuf,

    /// Metadata used to group images
    #[arg(long, value_enum)]
    by: Option<SortMode>,

    /// Report file name, written inside the input folder
    #[arg(long)]
    report: Option<String>,

    /// Keep files already present in the output tree instead of replacing them
    #[arg(long)]
    no_overwrite: bool,

    /// Compare SHA-256 digests of every copy with its source
    #[arg(long)]
    verify: bool,

    /// Increase verbosity (-v=INFO, -vv=DEBUG, -vvv=TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::new()?;

    env_logger::Builder::new()
        .filter_level(config.log_filter(cli.verbose))
        .init();

    info!("Starting photo_sorter");

    let mut options = SortOptions::from(&config);
    if let Some(mode) = cli.by {
        options.mode = mode;
    }
    if let Some(report) = cli.report {
        options.report_filename = report;
    }
    options.overwrite &= !cli.no_overwrite;
    options.verify_copies |= cli.verify;

    match processor::organize(&cli.input_folder, &options) {
        Ok(summary) => {
            for line in summary.summary_lines() {
                println!("{}", line);
            }
            info!("photo_sorter finished, {} images copied", summary.records.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(AppError::InvalidInput(path)) => {
            println!("Input folder doesn't exist: {}", path.display());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

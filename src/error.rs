use exif::Error as ExifError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("EXIF error: {0}")]
    Exif(#[from] ExifError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input folder doesn't exist: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("{} and its destination are the same file", .0.display())]
    SameFile(PathBuf),

    #[error("Copy of {} differs from its source {}", .destination.display(), .source_path.display())]
    CopyMismatch {
        source_path: PathBuf,
        destination: PathBuf,
    },
}

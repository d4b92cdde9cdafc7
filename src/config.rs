use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub const DEFAULT_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tiff", "heic"];

/// Which piece of metadata names the destination subfolder.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Date,
    Camera,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Date => f.write_str("date"),
            SortMode::Camera => f.write_str("camera"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub sort_by: SortMode,
    pub report_filename: String,
    pub allowed_extensions: HashSet<String>,
    pub log_level: String,
    pub overwrite: bool,
    pub verify_copies: bool,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir(Path::new("config"))
    }

    /// Layers defaults, `<dir>/default`, `<dir>/<RUN_MODE>`, `<dir>/local` and
    /// `PHOTO_SORTER_*` environment variables. Every file is optional.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("sort_by", "date")?
            .set_default("report_filename", "report.csv")?
            .set_default("allowed_extensions", DEFAULT_EXTENSIONS.to_vec())?
            .set_default("log_level", "warn")?
            .set_default("overwrite", true)?
            .set_default("verify_copies", false)?
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join(&env).to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join("local").to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("PHOTO_SORTER")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_extensions"),
            )
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;
        config.allowed_extensions = config
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Ok(config)
    }

    pub fn log_filter(&self, verbosity: u8) -> log::LevelFilter {
        let base = self
            .log_level
            .parse()
            .unwrap_or(log::LevelFilter::Warn);
        (0..verbosity).fold(base, |level, _| match level {
            log::LevelFilter::Off => log::LevelFilter::Error,
            log::LevelFilter::Error => log::LevelFilter::Warn,
            log::LevelFilter::Warn => log::LevelFilter::Info,
            log::LevelFilter::Info => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
    }
}

//! Application configuration

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Patient storage settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Path of the JSON snapshot holding every patient
    #[arg(long = "store", env = "PATIENT_STORE", default_value = "patients.json")]
    pub path: PathBuf,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,

    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

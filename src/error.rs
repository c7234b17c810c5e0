use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiarmergeError {
    #[error("Invalid interval: start {start}s, end {end}s")]
    InvalidInterval { start: f64, end: f64 },

    #[error("Malformed transcript in block {block}: {reason}")]
    MalformedTranscript { block: usize, reason: String },

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiarmergeError>;

use crate::config::settings::{AlignmentConfig, DiarmergeConfig};
use crate::error::{DiarmergeError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get XDG-compliant config directory
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "diarmerge")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| DiarmergeError::Config("Could not determine config directory".to_string()))
}

/// Get config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from the default path, falling back to defaults if absent
pub fn load_config() -> Result<DiarmergeConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<DiarmergeConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(DiarmergeConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: DiarmergeConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save config, creating parent directories as needed
pub fn save_config_to(config: &DiarmergeConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn load_config_with_env() -> Result<DiarmergeConfig> {
    let config = load_config()?;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Overlay `DIARMERGE_*` variables on top of file config
pub fn apply_env_overrides<F>(mut config: DiarmergeConfig, var: F) -> Result<DiarmergeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(label) = var("DIARMERGE_UNKNOWN_LABEL") {
        config.alignment.unknown_label = label;
    }
    if let Some(raw) = var("DIARMERGE_MAX_GAP_SECS") {
        let secs: f64 = raw.trim().parse().map_err(|_| {
            DiarmergeError::InvalidConfig(format!("DIARMERGE_MAX_GAP_SECS is not a number: {}", raw))
        })?;
        config.alignment.max_gap_secs = Some(secs);
    }
    if let Some(dir) = var("DIARMERGE_OUTPUT_DIR") {
        config.output.dir = Some(PathBuf::from(dir));
    }
    if let Some(level) = var("DIARMERGE_LOG_LEVEL") {
        config.logging.level = level;
    }

    validate_alignment(&config.alignment)?;
    Ok(config)
}

pub fn validate_alignment(alignment: &AlignmentConfig) -> Result<()> {
    if let Some(secs) = alignment.max_gap_secs {
        if !secs.is_finite() || secs < 0.0 {
            return Err(DiarmergeError::InvalidConfig(format!(
                "max_gap_secs must be a non-negative number, got {}",
                secs
            )));
        }
    }
    if alignment.unknown_label.trim().is_empty() {
        return Err(DiarmergeError::InvalidConfig(
            "unknown_label must not be empty".to_string(),
        ));
    }
    Ok(())
}

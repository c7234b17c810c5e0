use crate::notes::markdown::OutputFormat;
use crate::transcription::aligner::{AlignOptions, UNKNOWN_SPEAKER};
use crate::transcription::diarization::GapPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiarmergeConfig {
    #[serde(default)]
    pub alignment: AlignmentConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Label for captions that overlap no speaker
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,
    /// Give captions after the last speech to the last speaker
    #[serde(default = "default_true")]
    pub trailing_fallback: bool,
    /// Split same-speaker runs on pauses longer than this (None = always merge)
    pub max_gap_secs: Option<f64>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            unknown_label: UNKNOWN_SPEAKER.to_string(),
            trailing_fallback: true,
            max_gap_secs: None,
        }
    }
}

impl AlignmentConfig {
    pub fn align_options(&self) -> AlignOptions {
        AlignOptions {
            unknown_label: self.unknown_label.clone(),
            trailing_fallback: self.trailing_fallback,
        }
    }

    pub fn gap_policy(&self) -> GapPolicy {
        GapPolicy::from_max_gap(self.max_gap_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for merged notes (None = current directory)
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_unknown_label() -> String {
    UNKNOWN_SPEAKER.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creates() {
        let config = DiarmergeConfig::default();
        assert_eq!(config.alignment.unknown_label, "UNKNOWN");
        assert!(config.alignment.trailing_fallback);
        assert!(config.alignment.max_gap_secs.is_none());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_alignment_config_conversions() {
        let alignment = AlignmentConfig {
            unknown_label: "?".to_string(),
            trailing_fallback: false,
            max_gap_secs: Some(2.5),
        };
        assert_eq!(alignment.gap_policy(), GapPolicy::MaxGap(2.5));

        let options = alignment.align_options();
        assert_eq!(options.unknown_label, "?");
        assert!(!options.trailing_fallback);

        assert_eq!(AlignmentConfig::default().gap_policy(), GapPolicy::BridgeAll);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DiarmergeConfig = toml::from_str(
            r#"
            [alignment]
            max_gap_secs = 3.0

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.alignment.max_gap_secs, Some(3.0));
        assert_eq!(config.alignment.unknown_label, "UNKNOWN");
        assert!(config.alignment.trailing_fallback);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.dir.is_none());
        assert_eq!(config.logging.level, "info");
    }
}

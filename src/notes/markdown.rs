use crate::error::{DiarmergeError, Result};
use crate::transcription::OutputBlock;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Output encoding for merged notes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[[SPEAKER]]: text` lines in a Markdown file
    #[default]
    Text,
    /// JSON array of `{speaker_id, text}` objects
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "md",
            Self::Json => "json",
        }
    }
}

/// Parse a recording date in strict `YYYY-MM-DD` form
pub fn parse_recording_date(raw: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DiarmergeError::InvalidDate(raw.to_string()))?;
    // chrono accepts unpadded fields; the file name must not
    if date.format("%Y-%m-%d").to_string() != raw {
        return Err(DiarmergeError::InvalidDate(raw.to_string()));
    }
    Ok(date)
}

/// Writes speaker-attributed notes
pub struct NoteGenerator {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl NoteGenerator {
    pub fn new(output_dir: PathBuf, format: OutputFormat) -> Self {
        Self { output_dir, format }
    }

    /// `"<date> <audio_filename>.<ext>"`
    pub fn file_name(&self, date: NaiveDate, audio_filename: &str) -> String {
        format!(
            "{} {}.{}",
            date.format("%Y-%m-%d"),
            audio_filename,
            self.format.extension()
        )
    }

    pub fn render(&self, blocks: &[OutputBlock]) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(blocks.iter().map(|b| format!("{}\n", b)).collect()),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(blocks)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Render and write the notes, returning the written path
    pub fn generate(
        &self,
        date: NaiveDate,
        audio_filename: &str,
        blocks: &[OutputBlock],
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let content = self.render(blocks)?;
        let path = self.output_dir.join(self.file_name(date, audio_filename));
        fs::write(&path, content)?;

        tracing::debug!("Wrote {} blocks to {}", blocks.len(), path.display());
        Ok(path)
    }
}

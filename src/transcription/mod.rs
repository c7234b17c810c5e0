use serde::{Deserialize, Serialize};

pub mod aligner;
pub mod diarization;
pub mod interval;

use aligner::{AlignOptions, Aligner, Alignment};
use diarization::{coalesce_with, GapPolicy, SpeakerSegment};
use interval::{TimeInterval, Timed};

/// A caption block of transcribed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub interval: TimeInterval,
    /// Raw caption text, whitespace untouched
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(interval: TimeInterval, text: impl Into<String>) -> Self {
        Self {
            interval,
            text: text.into(),
        }
    }
}

impl Timed for TranscriptSegment {
    fn interval(&self) -> TimeInterval {
        self.interval
    }
}

/// Full transcript, in caption order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End time of the last caption, in seconds
    pub fn duration_secs(&self) -> f64 {
        self.segments.last().map(|s| s.end()).unwrap_or(0.0)
    }
}

/// A speaker-attributed block of text, the final merge output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBlock {
    pub speaker_id: String,
    pub text: String,
}

impl OutputBlock {
    pub fn new(speaker_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            text: text.into(),
        }
    }
}

impl std::fmt::Display for OutputBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[[{}]]: {}", self.speaker_id, self.text)
    }
}

/// Coalesce start-sorted speaker turns and attribute every caption to a speaker
pub fn merge_transcript(
    speakers: &[SpeakerSegment],
    transcript: &Transcript,
    policy: GapPolicy,
    options: AlignOptions,
) -> Alignment {
    let runs = coalesce_with(speakers, policy);
    if runs.is_empty() {
        tracing::warn!("No diarization segments; every caption will be unattributed");
    }
    Aligner::new(&runs, options).align(&transcript.segments)
}

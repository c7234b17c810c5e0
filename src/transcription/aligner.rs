use crate::transcription::diarization::CoalescedRun;
use crate::transcription::interval::{overlap, Timed};
use crate::transcription::{OutputBlock, TranscriptSegment};

pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// Knobs for speaker attribution
#[derive(Debug, Clone, PartialEq)]
pub struct AlignOptions {
    /// Label for captions no speaker run can claim
    pub unknown_label: String,
    /// Give captions past the end of all speech to the last speaker
    pub trailing_fallback: bool,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            unknown_label: UNKNOWN_SPEAKER.to_string(),
            trailing_fallback: true,
        }
    }
}

/// Why a caption ended up with its speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    Overlap,
    TrailingFallback,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub speaker_id: &'a str,
    pub attribution: Attribution,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignStats {
    pub segments: usize,
    pub blocks: usize,
    pub unknown: usize,
    pub trailing_fallback: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Alignment {
    pub blocks: Vec<OutputBlock>,
    pub stats: AlignStats,
}

/// Attributes transcript captions to coalesced speaker runs
pub struct Aligner<'a> {
    runs: &'a [CoalescedRun],
    options: AlignOptions,
    speech_end: Option<f64>,
}

impl<'a> Aligner<'a> {
    pub fn new(runs: &'a [CoalescedRun], options: AlignOptions) -> Self {
        let speech_end = runs.iter().map(|r| r.end()).reduce(f64::max);
        Self {
            runs,
            options,
            speech_end,
        }
    }

    /// Pick the run with the largest overlap; the earliest run wins ties.
    pub fn resolve_speaker(&self, segment: &TranscriptSegment) -> Resolution<'_> {
        let mut best: Option<&CoalescedRun> = None;
        let mut best_overlap = 0.0;

        for run in self.runs {
            let amount = overlap(&segment.interval, &run.interval);
            if amount > best_overlap {
                best_overlap = amount;
                best = Some(run);
            }
        }

        if let Some(run) = best {
            return Resolution {
                speaker_id: &run.speaker_id,
                attribution: Attribution::Overlap,
            };
        }

        if self.options.trailing_fallback {
            if let (Some(last), Some(speech_end)) = (self.runs.last(), self.speech_end) {
                if segment.start() >= speech_end {
                    return Resolution {
                        speaker_id: &last.speaker_id,
                        attribution: Attribution::TrailingFallback,
                    };
                }
            }
        }

        Resolution {
            speaker_id: &self.options.unknown_label,
            attribution: Attribution::Unknown,
        }
    }

    pub fn align(&self, transcript: &[TranscriptSegment]) -> Alignment {
        let mut blocks = Vec::new();
        let mut stats = AlignStats {
            segments: transcript.len(),
            ..Default::default()
        };
        let mut pending: Option<(&str, Vec<&str>)> = None;

        for segment in transcript {
            let resolution = self.resolve_speaker(segment);
            match resolution.attribution {
                Attribution::Unknown => stats.unknown += 1,
                Attribution::TrailingFallback => stats.trailing_fallback += 1,
                Attribution::Overlap => {}
            }

            match pending.as_mut() {
                Some((speaker, texts)) if *speaker == resolution.speaker_id => {
                    texts.push(&segment.text);
                }
                _ => {
                    if let Some((speaker, texts)) = pending.take() {
                        blocks.push(finish_block(speaker, &texts));
                    }
                    pending = Some((resolution.speaker_id, vec![segment.text.as_str()]));
                }
            }
        }

        if let Some((speaker, texts)) = pending {
            blocks.push(finish_block(speaker, &texts));
        }

        stats.blocks = blocks.len();
        tracing::info!(
            "Aligned {} captions into {} speaker blocks ({} unknown, {} trailing fallback)",
            stats.segments,
            stats.blocks,
            stats.unknown,
            stats.trailing_fallback
        );

        Alignment { blocks, stats }
    }
}

/// Align with default options
#[allow(dead_code)]
pub fn align(transcript: &[TranscriptSegment], runs: &[CoalescedRun]) -> Vec<OutputBlock> {
    Aligner::new(runs, AlignOptions::default())
        .align(transcript)
        .blocks
}

/// Collapse every whitespace run to one space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn finish_block(speaker: &str, texts: &[&str]) -> OutputBlock {
    OutputBlock::new(speaker, normalize_whitespace(&texts.join(" ")))
}

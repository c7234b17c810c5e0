use crate::transcription::interval::{TimeInterval, Timed};
use serde::{Deserialize, Serialize};

/// One labelled turn from the diarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    pub interval: TimeInterval,
    pub speaker_id: String,
}

impl SpeakerSegment {
    pub fn new(interval: TimeInterval, speaker_id: impl Into<String>) -> Self {
        Self {
            interval,
            speaker_id: speaker_id.into(),
        }
    }
}

impl Timed for SpeakerSegment {
    fn interval(&self) -> TimeInterval {
        self.interval
    }
}

/// Maximal run of consecutive segments sharing one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoalescedRun {
    pub interval: TimeInterval,
    pub speaker_id: String,
}

impl Timed for CoalescedRun {
    fn interval(&self) -> TimeInterval {
        self.interval
    }
}

/// How silence between two same-speaker segments is treated
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GapPolicy {
    /// Merge same-speaker neighbours no matter how far apart
    #[default]
    BridgeAll,
    /// Split the run when the gap exceeds this many seconds
    MaxGap(f64),
}

impl GapPolicy {
    pub fn from_max_gap(max_gap_secs: Option<f64>) -> Self {
        match max_gap_secs {
            Some(secs) => Self::MaxGap(secs),
            None => Self::BridgeAll,
        }
    }

    fn bridges(&self, gap: f64) -> bool {
        match self {
            Self::BridgeAll => true,
            Self::MaxGap(max) => gap <= *max,
        }
    }
}

/// Merge a start-sorted segment list into per-speaker runs, bridging all gaps
#[allow(dead_code)]
pub fn coalesce(segments: &[SpeakerSegment]) -> Vec<CoalescedRun> {
    coalesce_with(segments, GapPolicy::BridgeAll)
}

pub fn coalesce_with(segments: &[SpeakerSegment], policy: GapPolicy) -> Vec<CoalescedRun> {
    let Some((first, rest)) = segments.split_first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut start = first.start();
    let mut end = first.end();
    let mut speaker = first.speaker_id.as_str();

    for seg in rest {
        if seg.speaker_id == speaker && policy.bridges(seg.start() - end) {
            end = end.max(seg.end());
        } else {
            runs.push(CoalescedRun {
                interval: TimeInterval { start, end },
                speaker_id: speaker.to_string(),
            });
            start = seg.start();
            end = seg.end();
            speaker = seg.speaker_id.as_str();
        }
    }
    runs.push(CoalescedRun {
        interval: TimeInterval { start, end },
        speaker_id: speaker.to_string(),
    });

    tracing::debug!(
        "Coalesced {} diarization segments into {} speaker runs",
        segments.len(),
        runs.len()
    );

    runs
}

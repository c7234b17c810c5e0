use crate::error::Result;
use crate::transcription::diarization::SpeakerSegment;
use crate::transcription::interval::{sort_by_start, TimeInterval};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// `0.000s - 3.142s: SPEAKER_01`
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d{1,3})?)s\s*-\s*(\d+(?:\.\d{1,3})?)s:\s*(\S+)")
            .expect("diarization line pattern is valid")
    })
}

/// Parse one diarizer output line. Returns `None` for anything malformed.
pub fn parse_diarization_line(line: &str) -> Option<SpeakerSegment> {
    let caps = line_pattern().captures(line.trim())?;
    let start: f64 = caps[1].parse().ok()?;
    let end: f64 = caps[2].parse().ok()?;

    match TimeInterval::new(start, end) {
        Ok(interval) => Some(SpeakerSegment::new(interval, &caps[3])),
        Err(e) => {
            tracing::warn!("Skipping diarization line {:?}: {}", line.trim(), e);
            None
        }
    }
}

/// Parse diarizer output, skipping junk lines, sorted by start time
pub fn parse_diarization(content: &str) -> Vec<SpeakerSegment> {
    let mut segments = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_diarization_line(line) {
            Some(segment) => segments.push(segment),
            None => {
                tracing::debug!("Ignoring unrecognised diarization line: {:?}", line);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::info!("Skipped {} malformed diarization lines", skipped);
    }

    sort_by_start(&mut segments);
    segments
}

pub fn read_diarization(path: &Path) -> Result<Vec<SpeakerSegment>> {
    let content = fs::read_to_string(path)?;
    let segments = parse_diarization(&content);
    tracing::info!(
        "Read {} diarization segments from {}",
        segments.len(),
        path.display()
    );
    Ok(segments)
}

/// Render a labelled span the way the diarizer prints it
pub fn format_diarization_line(interval: &TimeInterval, speaker_id: &str) -> String {
    format!("{:.3}s - {:.3}s: {}", interval.start, interval.end, speaker_id)
}

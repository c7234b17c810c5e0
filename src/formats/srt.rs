use crate::error::{DiarmergeError, Result};
use crate::transcription::interval::TimeInterval;
use crate::transcription::{Transcript, TranscriptSegment};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// `HH:MM:SS,mmm`
fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})").expect("SRT timestamp pattern is valid")
    })
}

/// Convert an SRT timestamp to seconds
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    let caps = timestamp_pattern().captures(raw.trim())?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    let millis: u64 = caps[4].parse().ok()?;

    Some((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

/// Parse SRT captions. Any bad timing line fails the whole file;
/// zero-length captions are dropped.
pub fn parse_srt(content: &str) -> Result<Transcript> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        if !line.trim().is_empty() {
            block.push(line);
        } else if !block.is_empty() {
            blocks.push(std::mem::take(&mut block));
        }
    }

    // Last block may end at EOF without a blank line
    if !block.is_empty() {
        blocks.push(block);
    }

    let mut segments = Vec::with_capacity(blocks.len());
    for (i, lines) in blocks.iter().enumerate() {
        if let Some(segment) = parse_block(lines, i + 1)? {
            segments.push(segment);
        }
    }

    Ok(Transcript::new(segments))
}

pub fn read_srt(path: &Path) -> Result<Transcript> {
    let content = fs::read_to_string(path)?;
    let transcript = parse_srt(&content)?;
    tracing::info!(
        "Read {} captions ({:.1}s) from {}",
        transcript.len(),
        transcript.duration_secs(),
        path.display()
    );
    Ok(transcript)
}

fn parse_block(block: &[&str], number: usize) -> Result<Option<TranscriptSegment>> {
    let malformed = |reason: String| DiarmergeError::MalformedTranscript {
        block: number,
        reason,
    };

    let timing = block
        .get(1)
        .ok_or_else(|| malformed("missing timing line".to_string()))?;
    let (raw_start, raw_end) = timing
        .split_once("-->")
        .ok_or_else(|| malformed(format!("bad timing line {:?}", timing)))?;

    let start = parse_timestamp(raw_start)
        .ok_or_else(|| malformed(format!("bad start time {:?}", raw_start.trim())))?;
    let end = parse_timestamp(raw_end)
        .ok_or_else(|| malformed(format!("bad end time {:?}", raw_end.trim())))?;
    let text = block[2..].join(" ");

    if end == start {
        tracing::warn!(
            "Skipping zero-length caption in block {} at {:.3}s: {:?}",
            number,
            start,
            text
        );
        return Ok(None);
    }
    let interval = TimeInterval::new(start, end).map_err(|e| malformed(e.to_string()))?;

    Ok(Some(TranscriptSegment::new(interval, text)))
}

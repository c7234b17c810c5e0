pub mod diarization;
pub mod srt;

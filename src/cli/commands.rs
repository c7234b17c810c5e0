use crate::notes::markdown::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diarmerge")]
#[command(
    author,
    version,
    about = "Merge speaker diarization with an SRT transcript"
)]
#[command(
    long_about = "Attribute SRT captions to diarized speakers by time overlap and write speaker-labelled notes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a diarization file and an SRT transcript into notes
    Merge(MergeArgs),

    /// Print the coalesced speaker runs of a diarization file
    Coalesce {
        /// Diarizer output with lines like '0.0s - 3.1s: SPEAKER_00'
        diarization: PathBuf,

        /// Split same-speaker runs on pauses longer than this many seconds
        #[arg(long)]
        max_gap: Option<f64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Diarizer output with lines like '0.0s - 3.1s: SPEAKER_00'
    pub diarization: PathBuf,

    /// Whisper .srt transcription file
    pub srt: PathBuf,

    /// Recording date in YYYY-MM-DD format
    pub date: String,

    /// Original audio filename (without extension)
    pub audio_filename: String,

    /// Directory for the notes file (defaults to config, then current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print merged notes to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Split same-speaker runs on pauses longer than this many seconds
    #[arg(long)]
    pub max_gap: Option<f64>,

    /// Label for captions that match no speaker
    #[arg(long)]
    pub unknown_label: Option<String>,

    /// Leave captions after the last speech as unknown
    #[arg(long)]
    pub no_trailing_fallback: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print config file path
    Path,
    /// Initialize default configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

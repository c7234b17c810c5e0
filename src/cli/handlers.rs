use crate::cli::commands::*;
use crate::config;
use crate::config::settings::{AlignmentConfig, DiarmergeConfig};
use crate::error::{DiarmergeError, Result};
use crate::formats::diarization::{format_diarization_line, read_diarization};
use crate::formats::srt::read_srt;
use crate::notes::markdown::{parse_recording_date, NoteGenerator};
use crate::transcription::diarization::coalesce_with;
use crate::transcription::merge_transcript;
use std::path::{Path, PathBuf};

pub fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => {
            let config = config::loader::load_config_with_env()?;
            handle_merge(args, &config)
        }
        Commands::Coalesce {
            diarization,
            max_gap,
        } => {
            let config = config::loader::load_config_with_env()?;
            handle_coalesce(&diarization, max_gap, &config)
        }
        Commands::Config { action } => handle_config(action),
    }
}

fn handle_merge(args: MergeArgs, config: &DiarmergeConfig) -> Result<()> {
    let alignment_config = resolve_alignment(&args, &config.alignment)?;
    let date = parse_recording_date(&args.date)?;
    ensure_exists(&args.diarization)?;
    ensure_exists(&args.srt)?;

    let speakers = read_diarization(&args.diarization)?;
    let transcript = read_srt(&args.srt)?;
    if transcript.is_empty() {
        tracing::warn!("{} contains no captions", args.srt.display());
    }

    let alignment = merge_transcript(
        &speakers,
        &transcript,
        alignment_config.gap_policy(),
        alignment_config.align_options(),
    );
    if alignment.stats.unknown > 0 {
        tracing::warn!(
            "{} of {} captions matched no speaker and were labelled {}",
            alignment.stats.unknown,
            alignment.stats.segments,
            alignment_config.unknown_label
        );
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let format = args.format.unwrap_or(config.output.format);
    let generator = NoteGenerator::new(output_dir, format);

    if args.stdout {
        print!("{}", generator.render(&alignment.blocks)?);
        return Ok(());
    }

    let path = generator.generate(date, &args.audio_filename, &alignment.blocks)?;
    println!("Output written to: {}", path.display());
    Ok(())
}

fn handle_coalesce(
    diarization: &Path,
    max_gap: Option<f64>,
    config: &DiarmergeConfig,
) -> Result<()> {
    let mut alignment_config = config.alignment.clone();
    if max_gap.is_some() {
        alignment_config.max_gap_secs = max_gap;
    }
    config::loader::validate_alignment(&alignment_config)?;
    ensure_exists(diarization)?;

    let speakers = read_diarization(diarization)?;
    for run in coalesce_with(&speakers, alignment_config.gap_policy()) {
        println!("{}", format_diarization_line(&run.interval, &run.speaker_id));
    }
    Ok(())
}

/// Layer command-line flags over the configured alignment settings
fn resolve_alignment(args: &MergeArgs, base: &AlignmentConfig) -> Result<AlignmentConfig> {
    let mut resolved = base.clone();
    if let Some(label) = &args.unknown_label {
        resolved.unknown_label = label.clone();
    }
    if let Some(secs) = args.max_gap {
        resolved.max_gap_secs = Some(secs);
    }
    if args.no_trailing_fallback {
        resolved.trailing_fallback = false;
    }
    config::loader::validate_alignment(&resolved)?;
    Ok(resolved)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DiarmergeError::InputNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// `path` and `init` never parse the existing file, so they still work
/// when it is broken.
fn handle_config(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = config::loader::load_config_with_env()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", config::loader::config_path()?.display());
        }
        ConfigCommands::Init { force } => {
            let path = config::loader::config_path()?;
            if init_config(&path, force)? {
                println!("Configuration initialized at: {}", path.display());
            } else {
                println!("Config already exists at: {}", path.display());
                println!("Use --force to overwrite it with defaults.");
            }
        }
    }
    Ok(())
}

/// Write the default config to `path`. Returns false when a file is
/// already there and `force` is off.
fn init_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    config::loader::save_config_to(&DiarmergeConfig::default(), path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    const DIARIZATION: &str = "0.000s - 2.000s: SPEAKER_00\n2.000s - 4.000s: SPEAKER_01\n";
    const SRT: &str = "\
1
00:00:00,500 --> 00:00:01,500
Hallo,

2
00:00:01,600 --> 00:00:01,900
hallo

3
00:00:02,500 --> 00:00:03,500
Halli hallo!
";

    fn merge_args(dir: &Path, extra: &[&str]) -> MergeArgs {
        let diarization = dir.join("diarization.txt");
        let srt = dir.join("talk.srt");
        fs::write(&diarization, DIARIZATION).unwrap();
        fs::write(&srt, SRT).unwrap();

        let mut argv = vec![
            "diarmerge".to_string(),
            "merge".to_string(),
            diarization.display().to_string(),
            srt.display().to_string(),
            "2024-05-01".to_string(),
            "standup".to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));

        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Merge(args) => args,
            _ => panic!("expected merge command"),
        }
    }

    #[test]
    fn test_merge_writes_dated_notes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_dir = temp_dir.path().join("out");
        let out_arg = out_dir.display().to_string();
        let args = merge_args(temp_dir.path(), &["--output-dir", out_arg.as_str()]);

        handle_merge(args, &DiarmergeConfig::default()).unwrap();

        let content = fs::read_to_string(out_dir.join("2024-05-01 standup.md")).unwrap();
        assert_eq!(
            content,
            "[[SPEAKER_00]]: Hallo, hallo\n[[SPEAKER_01]]: Halli hallo!\n"
        );
    }

    #[test]
    fn test_merge_uses_configured_output_dir_and_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = merge_args(temp_dir.path(), &[]);

        let mut config = DiarmergeConfig::default();
        config.output.dir = Some(temp_dir.path().join("configured"));
        config.output.format = crate::notes::markdown::OutputFormat::Json;

        handle_merge(args, &config).unwrap();
        assert!(temp_dir
            .path()
            .join("configured")
            .join("2024-05-01 standup.json")
            .exists());
    }

    #[test]
    fn test_merge_rejects_bad_date() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut args = merge_args(temp_dir.path(), &[]);
        args.date = "01.05.2024".to_string();

        assert!(matches!(
            handle_merge(args, &DiarmergeConfig::default()),
            Err(DiarmergeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_merge_reports_missing_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut args = merge_args(temp_dir.path(), &[]);
        args.srt = temp_dir.path().join("missing.srt");

        assert!(matches!(
            handle_merge(args, &DiarmergeConfig::default()),
            Err(DiarmergeError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_cli_flags_override_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = merge_args(
            temp_dir.path(),
            &["--unknown-label", "NOBODY", "--max-gap", "0.5", "--no-trailing-fallback"],
        );

        let resolved = resolve_alignment(&args, &AlignmentConfig::default()).unwrap();
        assert_eq!(resolved.unknown_label, "NOBODY");
        assert_eq!(resolved.max_gap_secs, Some(0.5));
        assert!(!resolved.trailing_fallback);
    }

    #[test]
    fn test_coalesce_command_reads_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("diarization.txt");
        fs::write(&path, DIARIZATION).unwrap();

        handle_coalesce(&path, Some(1.0), &DiarmergeConfig::default()).unwrap();
        assert!(matches!(
            handle_coalesce(&path, Some(f64::NAN), &DiarmergeConfig::default()),
            Err(DiarmergeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_force_init_replaces_broken_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[alignment\nunknown_label = ").unwrap();
        assert!(config::loader::load_config_from(&path).is_err());

        assert!(init_config(&path, true).unwrap());

        let config = config::loader::load_config_from(&path).unwrap();
        let defaults = AlignmentConfig::default();
        assert_eq!(config.alignment.unknown_label, defaults.unknown_label);
        assert_eq!(config.alignment.max_gap_secs, defaults.max_gap_secs);
        assert!(config.alignment.trailing_fallback);
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[alignment\n").unwrap();

        assert!(!init_config(&path, false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[alignment\n");
    }

    #[test]
    fn test_merge_skips_zero_length_caption() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_dir = temp_dir.path().join("out");
        let out_arg = out_dir.display().to_string();
        let args = merge_args(temp_dir.path(), &["--output-dir", out_arg.as_str()]);
        fs::write(
            &args.srt,
            "1\n00:00:00,500 --> 00:00:01,500\nHallo\n\n\
             2\n00:00:03,000 --> 00:00:03,000\n\n\
             3\n00:00:02,500 --> 00:00:03,500\nHalli hallo!\n",
        )
        .unwrap();

        handle_merge(args, &DiarmergeConfig::default()).unwrap();

        let content = fs::read_to_string(out_dir.join("2024-05-01 standup.md")).unwrap();
        assert_eq!(content, "[[SPEAKER_00]]: Hallo\n[[SPEAKER_01]]: Halli hallo!\n");
    }

    #[test]
    fn test_negative_max_gap_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut args = merge_args(temp_dir.path(), &[]);
        args.max_gap = Some(-1.0);

        assert!(matches!(
            resolve_alignment(&args, &AlignmentConfig::default()),
            Err(DiarmergeError::InvalidConfig(_))
        ));
    }
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod formats;
mod notes;
mod transcription;

fn main() {
    let cli = cli::Cli::parse();

    // Config errors surface from the command that needs the config
    let config_level = config::loader::load_config_with_env()
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| "info".to_string());
    let default_level = match cli.verbose {
        0 => config_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::handle_command(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

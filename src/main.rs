use std::path::{Path, PathBuf};

use clap::Parser;
use levelup::cli::commands::Cli;
use levelup::cli::handlers;
use levelup::io::config_io;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    let cli = Cli::parse();

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = match config_io::read_config(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    let log_file = cli.log_file.as_deref().or(config.log.file.as_deref());
    let _log_guard = init_logging(level, log_file);
    tracing::info!(data_dir = %data_dir.display(), "levelup starting");

    let result = match cli.command {
        // No subcommand → launch TUI
        None => levelup::tui::run(&data_dir, &config),
        Some(command) => handlers::dispatch(command, &data_dir, cli.json),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "levelup failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize file-based logging.
///
/// Logs go to a file, never stdout, since the TUI owns the terminal. The
/// returned guard flushes buffered entries when dropped.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("levelup.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

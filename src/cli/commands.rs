use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "levelup", about = concat!("levelup v", env!("CARGO_PKG_VERSION"), " - track tasks, level up"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding tasks.json, stats.json and settings.json
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filter (overrides levelup.toml; RUST_LOG wins over both)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log file (overrides levelup.toml)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List active tasks
    List,
    /// Add a task
    Add(AddArgs),
    /// Set a task's progress (0-100)
    Progress(ProgressArgs),
    /// Remove a task
    Rm(RmArgs),
    /// Show active and completed counts
    Stats,
    /// Show settings, applying any given fields first
    Settings(SettingsArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Description
    #[arg(long)]
    pub desc: Option<String>,
    /// Who or what the task is waiting on
    #[arg(long)]
    pub wait_for: Option<String>,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Task ID or unique ID prefix
    pub id: String,
    /// New progress value
    pub value: u8,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID or unique ID prefix
    pub id: String,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Surprise mode: GIF, Image or CSS
    #[arg(long)]
    pub mode: Option<String>,
    /// GIF URL
    #[arg(long)]
    pub gif: Option<String>,
    /// Image URL
    #[arg(long)]
    pub img: Option<String>,
    /// Banner text (CSS mode)
    #[arg(long)]
    pub banner: Option<String>,
    /// Emoji for the celebration marquee
    #[arg(long)]
    pub marquee: Option<String>,
}

impl SettingsArgs {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.gif.is_none()
            && self.img.is_none()
            && self.banner.is_none()
            && self.marquee.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_progress() {
        let cli = Cli::try_parse_from(["levelup", "-C", "/tmp/x", "progress", "ab12", "50"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Progress(args)) => {
                assert_eq!(args.id, "ab12");
                assert_eq!(args.value, 50);
            }
            _ => panic!("expected progress"),
        }
    }

    #[test]
    fn rejects_non_numeric_progress() {
        assert!(Cli::try_parse_from(["levelup", "progress", "ab12", "lots"]).is_err());
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["levelup", "--log-level", "debug"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}

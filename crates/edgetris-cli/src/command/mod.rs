use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::play::PlayArg;

mod play;

const DEFAULT_LOG_FILE: &str = "edgetris.log";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// File the game log is written to
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(&args.log_file)?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

/// Sends tracing output to `path`; the terminal belongs to the UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let log_file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install the log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default_mode() {
        let args = CommandArgs::try_parse_from(["edgetris"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_log_file_after_subcommand() {
        let args =
            CommandArgs::try_parse_from(["edgetris", "play", "--log-file", "/tmp/game.log"])
                .unwrap();
        assert_eq!(args.log_file, PathBuf::from("/tmp/game.log"));
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }
}

use std::time::Duration;

use edgetris_engine::{GameSession, PieceSeed};
use rand::Rng as _;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

const DEFAULT_TICK_MS: u64 = 500;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Milliseconds between two steps of the traveling piece
    #[clap(
        long,
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,
    /// Seed of the piece sequence, 32 hex digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { tick_ms, seed } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let tick_interval = Duration::from_millis(*tick_ms);
    tracing::info!(seed = %seed.to_hex(), tick_ms = *tick_ms, "starting edgetris");

    let mut app = PlayApp::new(GameSession::with_seed(seed), tick_interval);
    Tui::new().run(&mut app)?;

    let stats = app.session().stats();
    tracing::info!(
        score = stats.score(),
        placed_pieces = stats.placed_pieces(),
        cleared_lines = stats.cleared_lines(),
        "exiting edgetris"
    );
    Ok(())
}

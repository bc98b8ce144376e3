mod logging;
mod poller;
mod settings;
mod stats;
mod webhook;

use crate::poller::{PollOptions, Poller};
use crate::settings::Settings;
use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

/// Posts Neptune's Pride player and team leaderboards to a Microsoft Teams webhook.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Flags {
    /// Settings file; created with defaults if missing.
    /// Defaults to neptunes-hooks/settings.toml in the user config directory.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Minutes to wait between polls.
    #[arg(short, long, default_value_t = 30)]
    poll: u64,

    /// Consecutive failed fetches tolerated before giving up.
    #[arg(long, default_value_t = 3)]
    max_failures: u32,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    once: bool,

    /// Report even if the current tick was already reported.
    #[arg(long)]
    force: bool,

    /// Verbose logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = Flags::parse();

    better_panic::install();
    logging::init(flags.debug, &settings::config_root().join("logs"));

    let settings_path = flags.settings.unwrap_or_else(settings::default_settings_path);
    let settings = Settings::load_or_init(&settings_path)
        .with_context(|| format!("loading {}", settings_path.display()))?;
    info!(
        "watching game {} (last reported tick {})",
        settings.neptunes_pride.game_number, settings.neptunes_pride.last_tick
    );

    let options = PollOptions {
        interval: Duration::from_secs(flags.poll.max(1) * 60),
        max_failures: flags.max_failures.max(1),
        once: flags.once,
        force: flags.force,
    };
    Poller::new(settings, settings_path, options).run().await?;

    Ok(())
}

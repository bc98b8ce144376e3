use crate::settings::{Settings, SettingsError};
use crate::stats::{self, StatsReport};
use crate::webhook::WebhookSink;
use chrono::Local;
use log::{debug, error, info, warn};
use np_api::Snapshot;
use np_api::client::NpApi;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct PollOptions {
    pub interval: Duration,
    /// Consecutive failed fetches tolerated before polling stops.
    pub max_failures: u32,
    /// Run a single cycle and exit.
    pub once: bool,
    /// Report even if the tick has already been processed.
    pub force: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self { interval: Duration::from_secs(30 * 60), max_failures: 3, once: false, force: false }
    }
}

/// What a single cycle did with a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Reported { turn: i64, has_teams: bool },
    UpToDate,
}

/// Drives fetch → compute → post, one cycle at a time.
pub struct Poller {
    api: NpApi,
    sink: Option<WebhookSink>,
    settings: Settings,
    settings_path: PathBuf,
    options: PollOptions,
}

impl Poller {
    pub fn new(settings: Settings, settings_path: PathBuf, options: PollOptions) -> Self {
        let sink = settings.webhooks.microsoft_teams_url().map(WebhookSink::new);
        if sink.is_none() {
            warn!("no Microsoft Teams webhook configured, reports will only be logged");
        }
        if !settings.players.has_teams() {
            info!("no teams assigned in the roster, team reports are off");
        }
        Self { api: NpApi::new(), sink, settings, settings_path, options }
    }

    #[cfg(test)]
    pub fn with_api(mut self, api: NpApi) -> Self {
        self.api = api;
        self
    }

    pub async fn run(mut self) -> Result<(), SettingsError> {
        let mut failures = 0;
        loop {
            let game = &self.settings.neptunes_pride;
            match self.api.fetch_snapshot(game.game_number, &game.api_code).await {
                Ok(snapshot) => {
                    failures = 0;
                    if let Some(now) = snapshot.now {
                        debug!("snapshot taken {}", now.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
                    }
                    self.process(&snapshot).await?;
                    if !snapshot.active {
                        info!("{} is over, stopping", snapshot.title);
                        break;
                    }
                }
                Err(e) => {
                    failures += 1;
                    warn!("skipping cycle ({failures}/{}): {e}", self.options.max_failures);
                    if failures >= self.options.max_failures {
                        error!("giving up after {failures} failed fetches");
                        break;
                    }
                }
            }

            if self.options.once {
                break;
            }

            debug!("waiting {} minutes for the next poll", self.options.interval.as_secs() / 60);
            tokio::select! {
                _ = sleep(self.options.interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, stopping");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handle one snapshot: grow the roster, then report if the tick is new.
    pub async fn process(&mut self, snapshot: &Snapshot) -> Result<CycleOutcome, SettingsError> {
        let added = register_new_players(&mut self.settings, snapshot);
        if added > 0 {
            info!("added {added} new player(s) to the roster");
            self.settings.save(&self.settings_path)?;
        }

        let game = &self.settings.neptunes_pride;
        if snapshot.tick <= game.last_tick && !self.options.force {
            info!("tick {} already reported, nothing to do", snapshot.tick);
            return Ok(CycleOutcome::UpToDate);
        }

        let turn = game.turn(snapshot.tick);
        info!("Turn {turn:02}");

        let roster = &self.settings.players;
        let players = stats::player_report(&snapshot.players, roster);
        let teams = stats::team_report(&snapshot.players, roster);
        log_report("player", &players);
        match &teams {
            Some(teams) => log_report("team", teams),
            None => debug!("no teams configured, skipping team report"),
        }

        if let Some(sink) = &self.sink {
            sink.push_reports(&players, teams.as_ref(), turn, &snapshot.title).await;
        }

        self.settings.neptunes_pride.last_tick = snapshot.tick;
        self.settings.save(&self.settings_path)?;

        Ok(CycleOutcome::Reported { turn, has_teams: teams.is_some() })
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Append snapshot players the roster hasn't seen yet. Returns how many were added.
fn register_new_players(settings: &mut Settings, snapshot: &Snapshot) -> usize {
    snapshot
        .players
        .iter()
        .filter(|p| settings.players.register(&p.name))
        .count()
}

fn log_report(kind: &str, report: &StatsReport) {
    for (title, leaders) in report.leaderboard.titled() {
        debug!("{kind} {title}: {}", leaders.join(", "));
    }
    debug!("{kind} overall: {}", report.overall.join(" and "));
}

//! Per-stat leaderboards for players and teams.
//!
//! Everything here is a pure function of one snapshot and the roster; nothing
//! is cached between poll cycles.

pub mod leaderboard;
pub mod overall;
pub mod roster;
pub mod teams;

use crate::stats::leaderboard::Leaderboard;
use crate::stats::roster::Roster;
use np_api::StatRecord;

/// A leaderboard plus whoever leads the most stats on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
    pub leaderboard: Leaderboard,
    pub overall: Vec<String>,
}

impl StatsReport {
    fn from_leaderboard(leaderboard: Leaderboard) -> Self {
        let overall = overall::resolve(&leaderboard);
        Self { leaderboard, overall }
    }
}

/// Player leaderboard, with leaders labelled from the roster.
pub fn player_report(players: &[StatRecord], roster: &Roster) -> StatsReport {
    let leaderboard = leaderboard::compute(players, |username| roster.label(username));
    StatsReport::from_leaderboard(leaderboard)
}

/// Team leaderboard, or `None` when the roster has no team structure.
pub fn team_report(players: &[StatRecord], roster: &Roster) -> Option<StatsReport> {
    let teams = teams::aggregate(players, roster);
    if teams.is_empty() {
        return None;
    }
    let leaderboard = leaderboard::compute(&teams, str::to_owned);
    Some(StatsReport::from_leaderboard(leaderboard))
}

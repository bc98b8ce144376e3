use crate::stats::roster::Roster;
use np_api::{Stat, StatRecord};
use std::collections::HashMap;

/// Team name used for players without a team.
pub const UNASSIGNED_TEAM: &str = "~";

/// Roll player records up into one synthetic record per team.
///
/// Players are visited in roster order; roster players missing from `records`
/// are skipped. Cumulative stats sum over active members only, tech levels take
/// the maximum over every member, and a team is active if any member is.
///
/// Returns an empty list when nobody has a team, i.e. the only group would be
/// [`UNASSIGNED_TEAM`].
pub fn aggregate(records: &[StatRecord], roster: &Roster) -> Vec<StatRecord> {
    let mut by_name: HashMap<&str, &StatRecord> = HashMap::new();
    for record in records {
        by_name.entry(record.name.as_str()).or_insert(record);
    }

    let mut teams: Vec<StatRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in roster.entries() {
        let Some(player) = by_name.get(entry.username.as_str()) else {
            continue;
        };
        let team_name = roster.team_of(&entry.username).unwrap_or(UNASSIGNED_TEAM);

        let slot = *index.entry(team_name.to_owned()).or_insert_with(|| {
            teams.push(StatRecord::new(team_name, false));
            teams.len() - 1
        });
        fold_member(&mut teams[slot], player);
    }

    if teams.iter().all(|t| t.name == UNASSIGNED_TEAM) {
        return Vec::new();
    }
    teams
}

fn fold_member(team: &mut StatRecord, player: &StatRecord) {
    team.active |= player.active;
    for stat in Stat::ALL {
        let combined = if stat.is_cumulative() {
            if player.active {
                team.get(stat) + player.get(stat)
            } else {
                team.get(stat)
            }
        } else {
            team.get(stat).max(player.get(stat))
        };
        team.set(stat, combined);
    }
}

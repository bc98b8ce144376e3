use crate::stats::leaderboard::Leaderboard;
use std::collections::HashMap;

/// Everyone who leads the greatest number of stats, in the order first seen.
pub fn resolve(leaderboard: &Leaderboard) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in leaderboard.entries() {
        for leader in &entry.leaders {
            match index.get(leader.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(leader.as_str(), counts.len());
                    counts.push((leader.as_str(), 1));
                }
            }
        }
    }

    let Some(best) = counts.iter().map(|(_, n)| *n).max() else {
        return Vec::new();
    };
    counts
        .into_iter()
        .filter(|(_, n)| *n == best)
        .map(|(name, _)| name.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::leaderboard::compute;
    use np_api::{Stat, StatRecord};

    fn identity(name: &str) -> String {
        name.to_owned()
    }

    // Leads every stat in `stats` with a value of 10; everything else is 0.
    fn leader_of(name: &str, stats: &[Stat]) -> StatRecord {
        stats
            .iter()
            .fold(StatRecord::new(name, true), |r, s| r.with(*s, 10))
    }

    #[test]
    fn single_leader_wins_alone() {
        let records = vec![
            leader_of("A", &[Stat::Stars, Stat::Ships, Stat::Economy]),
            leader_of("B", &[Stat::Science]),
        ];
        // The zero-valued stats are shared ties, which still leaves A ahead.
        let board = compute(&records, identity);
        assert_eq!(resolve(&board), vec!["A"]);
    }

    #[test]
    fn equal_counts_are_all_returned_in_discovery_order() {
        let a_stats = [Stat::Stars, Stat::Ships, Stat::Economy, Stat::EconomyPerTurn, Stat::Industry];
        let b_stats = [Stat::Scanning, Stat::HyperspaceRange, Stat::Terraforming, Stat::Experimentation, Stat::Weapons];
        let c_stats = [Stat::Science, Stat::Banking];
        let mut records = vec![leader_of("B", &b_stats), leader_of("A", &a_stats), leader_of("C", &c_stats)];
        // Break the zero-ties on the two unclaimed stats in C's favour without
        // lifting C to five.
        records[2].set(Stat::IndustryPerTurn, 1);
        records[2].set(Stat::Manufacturing, 1);

        let board = compute(&records, identity);
        // A appears first because Stars precedes Scanning.
        assert_eq!(resolve(&board), vec!["A", "B"]);
    }

    #[test]
    fn empty_leaderboard_has_no_overall_leader() {
        assert!(resolve(&Leaderboard::default()).is_empty());
        assert!(resolve(&compute(&[], identity)).is_empty());
    }
}

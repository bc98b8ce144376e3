use np_api::{Stat, StatRecord};

/// Max value reported for a stat when no active entity qualifies.
pub const NO_LEADER: i64 = -1;

/// The leaders of a single stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub stat: Stat,
    pub max_value: i64,
    /// Labels of every active entity sitting at `max_value`, in input order.
    pub leaders: Vec<String>,
}

impl LeaderboardEntry {
    /// `"Stars (1,234)"` for cumulative stats, `"Scanning (Lvl 7)"` for tech levels.
    pub fn title(&self) -> String {
        let value = format_thousands(self.max_value);
        if self.stat.is_cumulative() {
            format!("{} ({value})", self.stat.title())
        } else {
            format!("{} (Lvl {value})", self.stat.title())
        }
    }
}

/// One entry per stat, in [`Stat::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, stat: Stat) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.stat == stat)
    }

    /// (title, leaders) pairs, ready for display.
    pub fn titled(&self) -> impl Iterator<Item = (String, &[String])> {
        self.entries.iter().map(|e| (e.title(), e.leaders.as_slice()))
    }
}

/// Find, for every stat, the maximum among active records and everyone tied at it.
///
/// Inactive records never lead, whatever their values. `label` decorates each
/// leader's name for display; the comparison itself only looks at values.
pub fn compute<F>(records: &[StatRecord], label: F) -> Leaderboard
where
    F: Fn(&str) -> String,
{
    let active: Vec<&StatRecord> = records.iter().filter(|r| r.active).collect();

    let entries = Stat::ALL
        .into_iter()
        .map(|stat| {
            let mut max_value = NO_LEADER;
            let mut names: Vec<&str> = Vec::new();
            for record in &active {
                let value = record.get(stat);
                if value > max_value {
                    max_value = value;
                    names.clear();
                    names.push(&record.name);
                } else if value == max_value {
                    names.push(&record.name);
                }
            }
            LeaderboardEntry {
                stat,
                max_value,
                leaders: names.into_iter().map(&label).collect(),
            }
        })
        .collect();

    Leaderboard { entries }
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> String {
        name.to_owned()
    }

    fn player(name: &str, active: bool, stars: i64) -> StatRecord {
        StatRecord::new(name, active).with(Stat::Stars, stars)
    }

    #[test]
    fn inactive_players_never_lead() {
        let records = vec![player("P1", true, 100), player("P2", true, 150), player("P3", false, 200)];
        let board = compute(&records, identity);
        let stars = board.get(Stat::Stars).unwrap();
        assert_eq!(stars.title(), "Stars (150)");
        assert_eq!(stars.leaders, vec!["P2"]);
    }

    #[test]
    fn ties_keep_every_leader() {
        let records = vec![player("a", true, 7), player("b", true, 9), player("c", true, 9)];
        let board = compute(&records, identity);
        assert_eq!(board.get(Stat::Stars).unwrap().leaders, vec!["b", "c"]);
    }

    #[test]
    fn greater_value_resets_the_tie() {
        let records = vec![player("a", true, 5), player("b", true, 5), player("c", true, 6)];
        let board = compute(&records, identity);
        assert_eq!(board.get(Stat::Stars).unwrap().leaders, vec!["c"]);
    }

    #[test]
    fn zero_is_a_real_maximum() {
        let records = vec![player("a", true, 0)];
        let board = compute(&records, identity);
        let stars = board.get(Stat::Stars).unwrap();
        assert_eq!(stars.max_value, 0);
        assert_eq!(stars.leaders, vec!["a"]);
    }

    #[test]
    fn empty_input_uses_sentinel_for_every_stat() {
        let board = compute(&[], identity);
        assert_eq!(board.entries().len(), Stat::ALL.len());
        for entry in board.entries() {
            assert_eq!(entry.max_value, NO_LEADER);
            assert!(entry.leaders.is_empty());
        }
    }

    #[test]
    fn only_inactive_input_uses_sentinel() {
        let board = compute(&[player("gone", false, 300)], identity);
        assert_eq!(board.get(Stat::Stars).unwrap().max_value, NO_LEADER);
        assert!(board.get(Stat::Stars).unwrap().leaders.is_empty());
    }

    #[test]
    fn titles_distinguish_levels() {
        let records = vec![
            StatRecord::new("a", true)
                .with(Stat::Ships, 1234)
                .with(Stat::Scanning, 7),
        ];
        let board = compute(&records, identity);
        let titles: Vec<String> = board.titled().map(|(title, _)| title).collect();
        assert_eq!(titles[1], "Ships (1,234)");
        assert_eq!(titles[7], "Scanning (Lvl 7)");
        assert_eq!(titles[3], "$/Turn (0)");
    }

    #[test]
    fn labels_decorate_leaders() {
        let records = vec![player("a", true, 3)];
        let board = compute(&records, |name| format!("{name} [Red]"));
        assert_eq!(board.get(Stat::Stars).unwrap().leaders, vec!["a [Red]"]);
    }

    #[test]
    fn compute_is_repeatable() {
        let records = vec![player("a", true, 3), player("b", true, 3), player("c", false, 8)];
        assert_eq!(compute(&records, identity), compute(&records, identity));
    }

    #[test]
    fn lowering_a_non_leader_changes_nothing() {
        let mut records = vec![player("a", true, 10), player("b", true, 10), player("c", true, 4)];
        let before = compute(&records, identity);
        records[2].set(Stat::Stars, 1);
        let after = compute(&records, identity);
        assert_eq!(before.get(Stat::Stars), after.get(Stat::Stars));
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-1), "-1");
        assert_eq!(format_thousands(-12345), "-12,345");
    }
}

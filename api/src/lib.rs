pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the Neptune's Pride wire format
// ---------------------------------------------------------------------------

/// One poll of the game: header fields plus a stat record per player.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub title: String,
    /// The game's internal turn counter.
    pub tick: i64,
    /// False once the game is over.
    pub active: bool,
    /// Server time the snapshot was taken, when the API reports it.
    pub now: Option<DateTime<Utc>>,
    pub players: Vec<StatRecord>,
}

/// The tracked stats, in reporting order.
///
/// The order is significant: the first seven are cumulative (summed across a
/// team), the remaining seven are technology levels (combined via maximum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Stars,
    Ships,
    Economy,
    EconomyPerTurn,
    Industry,
    IndustryPerTurn,
    Science,
    Scanning,
    HyperspaceRange,
    Terraforming,
    Experimentation,
    Weapons,
    Banking,
    Manufacturing,
}

pub const STAT_COUNT: usize = 14;

impl Stat {
    pub const ALL: [Stat; STAT_COUNT] = [
        Stat::Stars,
        Stat::Ships,
        Stat::Economy,
        Stat::EconomyPerTurn,
        Stat::Industry,
        Stat::IndustryPerTurn,
        Stat::Science,
        Stat::Scanning,
        Stat::HyperspaceRange,
        Stat::Terraforming,
        Stat::Experimentation,
        Stat::Weapons,
        Stat::Banking,
        Stat::Manufacturing,
    ];

    /// Position within [`Stat::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in leaderboard titles.
    pub fn title(self) -> &'static str {
        match self {
            Stat::Stars => "Stars",
            Stat::Ships => "Ships",
            Stat::Economy => "Economy",
            Stat::EconomyPerTurn => "$/Turn",
            Stat::Industry => "Industry",
            Stat::IndustryPerTurn => "Ships/Turn",
            Stat::Science => "Science",
            Stat::Scanning => "Scanning",
            Stat::HyperspaceRange => "Hyperspace Range",
            Stat::Terraforming => "Terraforming",
            Stat::Experimentation => "Experimentation",
            Stat::Weapons => "Weapons",
            Stat::Banking => "Banking",
            Stat::Manufacturing => "Manufacturing",
        }
    }

    /// Cumulative stats add up across team members; the rest are tech levels.
    pub fn is_cumulative(self) -> bool {
        self.index() < 7
    }
}

/// One entity's (player or team) value for every tracked stat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatRecord {
    pub name: String,
    pub active: bool,
    values: [i64; STAT_COUNT],
}

impl StatRecord {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self { name: name.into(), active, values: [0; STAT_COUNT] }
    }

    pub fn get(&self, stat: Stat) -> i64 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: i64) {
        self.values[stat.index()] = value;
    }

    /// Builder-style [`StatRecord::set`].
    pub fn with(mut self, stat: Stat, value: i64) -> Self {
        self.set(stat, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_order_matches_all() {
        for (i, stat) in Stat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }

    #[test]
    fn first_seven_stats_are_cumulative() {
        let cumulative: Vec<Stat> = Stat::ALL.into_iter().filter(|s| s.is_cumulative()).collect();
        assert_eq!(
            cumulative,
            vec![
                Stat::Stars,
                Stat::Ships,
                Stat::Economy,
                Stat::EconomyPerTurn,
                Stat::Industry,
                Stat::IndustryPerTurn,
                Stat::Science,
            ]
        );
        assert!(!Stat::Scanning.is_cumulative());
        assert!(!Stat::Manufacturing.is_cumulative());
    }

    #[test]
    fn record_defaults_to_zero() {
        let record = StatRecord::new("alice", true).with(Stat::Weapons, 4);
        assert_eq!(record.get(Stat::Stars), 0);
        assert_eq!(record.get(Stat::Weapons), 4);
    }
}

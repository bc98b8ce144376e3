use serde::{Deserialize, Serialize};

/// A known player and their optional display name and team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl RosterEntry {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), name: None, team: None }
    }

    #[cfg(test)]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    #[cfg(test)]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Players in the order they were first seen. Read-only to the stats engine;
/// the poller appends newcomers before each cycle's computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn get(&self, username: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.username == username)
    }

    /// Add a previously unseen player. Returns false if already known.
    pub fn register(&mut self, username: &str) -> bool {
        if username.is_empty() || self.get(username).is_some() {
            return false;
        }
        self.entries.push(RosterEntry::new(username));
        true
    }

    pub fn display_name(&self, username: &str) -> Option<&str> {
        self.get(username).and_then(|e| non_blank(e.name.as_deref()))
    }

    pub fn team_of(&self, username: &str) -> Option<&str> {
        self.get(username).and_then(|e| non_blank(e.team.as_deref()))
    }

    pub fn has_teams(&self) -> bool {
        self.entries.iter().any(|e| non_blank(e.team.as_deref()).is_some())
    }

    /// `username (Name) [Team]`, omitting the parts the roster doesn't know.
    pub fn label(&self, username: &str) -> String {
        let mut label = username.to_owned();
        if let Some(name) = self.display_name(username) {
            label.push_str(&format!(" ({name})"));
        }
        if let Some(team) = self.team_of(username) {
            label.push_str(&format!(" [{team}]"));
        }
        label
    }
}

// Config files tend to carry `team = ""` for unassigned players.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_appends_only_new_players() {
        let mut roster = Roster::new(vec![RosterEntry::new("alice")]);
        assert!(!roster.register("alice"));
        assert!(roster.register("bob"));
        assert!(!roster.register(""));
        let names: Vec<&str> = roster.entries().iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn label_includes_known_name_and_team() {
        let roster = Roster::new(vec![
            RosterEntry::new("alice").with_name("Alice").with_team("Red"),
            RosterEntry::new("bob").with_team("Blue"),
            RosterEntry::new("carol"),
        ]);
        assert_eq!(roster.label("alice"), "alice (Alice) [Red]");
        assert_eq!(roster.label("bob"), "bob [Blue]");
        assert_eq!(roster.label("carol"), "carol");
        assert_eq!(roster.label("stranger"), "stranger");
    }

    #[test]
    fn blank_team_counts_as_unassigned() {
        let roster = Roster::new(vec![RosterEntry::new("alice").with_team("  ")]);
        assert_eq!(roster.team_of("alice"), None);
        assert!(!roster.has_teams());
    }
}

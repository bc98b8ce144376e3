/// Neptune's Pride API raw wire types: serde shapes for the `scanning_data` payload.
/// These map to the clean domain types via `extract` in client.rs.
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiResponse {
    pub scanning_data: Option<ScanningData>,
    /// Set instead of `scanning_data` for a bad game number or API code.
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScanningData {
    pub name: String,
    pub tick: i64,
    pub game_over: i64,
    /// Milliseconds since the Unix epoch.
    pub now: Option<i64>,
    /// Keyed by player uid ("0", "1", ...).
    #[serde(default)]
    pub players: BTreeMap<String, NpPlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NpPlayer {
    pub alias: String,
    /// Non-zero once the player has conceded or been knocked out.
    pub conceded: i64,
    pub total_stars: i64,
    /// Total ship count across carriers and stars.
    pub total_strength: i64,
    pub total_economy: i64,
    pub total_industry: i64,
    pub total_science: i64,
    pub tech: BTreeMap<String, NpTech>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NpTech {
    pub level: i64,
}

/// Form body for `POST /api`.
#[derive(Debug, serde::Serialize)]
pub struct ScanRequest<'a> {
    pub api_version: &'a str,
    pub game_number: i64,
    pub code: &'a str,
}

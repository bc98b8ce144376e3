use crate::wire::{ApiResponse, NpPlayer, ScanRequest, ScanningData};
use crate::{Snapshot, Stat, StatRecord};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

const NP_API: &str = "https://np.ironhelmet.com/api";
const API_VERSION: &str = "0.1";

/// Neptune's Pride API client.
#[derive(Debug, Clone)]
pub struct NpApi {
    client: Client,
    url: String,
    timeout: Duration,
}

impl Default for NpApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("neptunes-hooks/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            url: NP_API.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Every variant means "no snapshot this cycle"; none of them is fatal.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error for {1}: {0}")]
    Network(#[source] reqwest::Error, String),
    #[error("API error for {1}: {0}")]
    Api(#[source] reqwest::Error, String),
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
}

impl NpApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another endpoint (a local mock server in tests).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pull the current scanning data for a game and normalise it.
    pub async fn fetch_snapshot(&self, game_number: i64, code: &str) -> ApiResult<Snapshot> {
        let request = ScanRequest { api_version: API_VERSION, game_number, code };
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .form(&request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, self.url.clone()))?;

        let body = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, self.url.clone()))?
            .text()
            .await
            .map_err(|e| ApiError::Network(e, self.url.clone()))?;

        parse_snapshot(&body)
    }
}

// ---------------------------------------------------------------------------
// Mapping: Neptune's Pride wire types → clean domain types
// ---------------------------------------------------------------------------

/// Decode a raw `/api` response body into a [`Snapshot`].
pub fn parse_snapshot(body: &str) -> ApiResult<Snapshot> {
    let raw: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::DataUnavailable(format!("undecodable response: {e}")))?;

    if let Some(message) = raw.error {
        return Err(ApiError::DataUnavailable(format!("server refused request: {message}")));
    }
    let data = raw
        .scanning_data
        .ok_or_else(|| ApiError::DataUnavailable("response has no scanning_data".into()))?;
    extract(data)
}

/// Normalise scanning data into one [`StatRecord`] per player, ordered by uid.
pub fn extract(data: ScanningData) -> ApiResult<Snapshot> {
    let mut players: Vec<(u32, NpPlayer)> = data
        .players
        .into_iter()
        .map(|(uid, player)| {
            uid.parse::<u32>()
                .map(|uid| (uid, player))
                .map_err(|_| ApiError::DataUnavailable(format!("invalid player uid `{uid}`")))
        })
        .collect::<ApiResult<_>>()?;
    players.sort_by_key(|(uid, _)| *uid);

    let players = players
        .iter()
        .map(|(_, player)| map_player(player))
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(Snapshot {
        title: data.name,
        tick: data.tick,
        active: data.game_over == 0,
        now: data.now.and_then(DateTime::<Utc>::from_timestamp_millis),
        players,
    })
}

fn map_player(player: &NpPlayer) -> ApiResult<StatRecord> {
    let level = |tech: &str| -> ApiResult<i64> {
        player.tech.get(tech).map(|t| t.level).ok_or_else(|| {
            ApiError::DataUnavailable(format!("player `{}` has no `{tech}` tech", player.alias))
        })
    };

    let banking = level("banking")?;
    let manufacturing = level("manufacturing")?;

    Ok(StatRecord::new(player.alias.clone(), player.conceded == 0)
        .with(Stat::Stars, player.total_stars)
        .with(Stat::Ships, player.total_strength)
        .with(Stat::Economy, player.total_economy)
        .with(Stat::EconomyPerTurn, economy_per_turn(player.total_economy, banking))
        .with(Stat::Industry, player.total_industry)
        .with(Stat::IndustryPerTurn, industry_per_turn(player.total_industry, manufacturing))
        .with(Stat::Science, player.total_science)
        .with(Stat::Scanning, level("scanning")?)
        .with(Stat::HyperspaceRange, level("propulsion")?)
        .with(Stat::Terraforming, level("terraforming")?)
        .with(Stat::Experimentation, level("research")?)
        .with(Stat::Weapons, level("weapons")?)
        .with(Stat::Banking, banking)
        .with(Stat::Manufacturing, manufacturing))
}

/// Credits earned at the next production: 10 per economy plus 75 per banking level.
fn economy_per_turn(economy: i64, banking: i64) -> i64 {
    economy * 10 + banking * 75
}

/// Ships built per production, floored.
fn industry_per_turn(industry: i64, manufacturing: i64) -> i64 {
    (industry * (manufacturing + 5)).div_euclid(2)
}

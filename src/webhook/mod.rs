pub mod card;

use crate::stats::StatsReport;
use crate::webhook::card::{Audience, WebhookMessage, stats_card};
use log::{error, info};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("could not reach {1}: {0}")]
    Network(#[source] reqwest::Error, String),
    #[error("{1} rejected the card: {0}")]
    Rejected(#[source] reqwest::Error, String),
}

/// Posts cards to one Microsoft Teams incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("neptunes-hooks/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub async fn post(&self, message: &WebhookMessage) -> Result<(), WebhookError> {
        self.client
            .post(&self.url)
            .timeout(self.timeout)
            .json(message)
            .send()
            .await
            .map_err(|e| WebhookError::Network(e, self.url.clone()))?
            .error_for_status()
            .map_err(|e| WebhookError::Rejected(e, self.url.clone()))?;
        Ok(())
    }

    /// Post the player card and, when teams are in use, the team card.
    ///
    /// Failures are logged and swallowed so one bad post never stops polling.
    /// Returns how many cards were delivered.
    pub async fn push_reports(
        &self,
        players: &StatsReport,
        teams: Option<&StatsReport>,
        turn: i64,
        game_name: &str,
    ) -> usize {
        let mut cards = vec![(Audience::Players, stats_card(players, Audience::Players, turn, game_name))];
        if let Some(teams) = teams {
            cards.push((Audience::Teams, stats_card(teams, Audience::Teams, turn, game_name)));
        }

        let mut delivered = 0;
        for (audience, card) in cards {
            match self.post(&WebhookMessage::from(card)).await {
                Ok(()) => {
                    info!("pushed {audience:?} stats for turn {turn:02}");
                    delivered += 1;
                }
                Err(e) => error!("failed to push {audience:?} stats: {e}"),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{player_report, roster::Roster};
    use np_api::{Stat, StatRecord};

    fn report() -> StatsReport {
        let records = vec![StatRecord::new("alice", true).with(Stat::Stars, 3)];
        player_report(&records, &Roster::default())
    }

    #[tokio::test]
    async fn posts_player_and_team_cards() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_header("content-type", "application/json")
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        let sink = WebhookSink::new(format!("{}/hook", server.url()));
        let report = report();
        let delivered = sink.push_reports(&report, Some(&report), 3, "Galaxy").await;

        mock.assert_async().await;
        assert_eq!(delivered, 2);
    }

    #[tokio::test]
    async fn team_card_is_skipped_without_teams() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(mockito::Matcher::Regex("Player Stats".into()))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let sink = WebhookSink::new(format!("{}/hook", server.url()));
        assert_eq!(sink.push_reports(&report(), None, 3, "Galaxy").await, 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_posts_are_reported_not_raised() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("POST", "/hook").with_status(400).create_async().await;

        let sink = WebhookSink::new(format!("{}/hook", server.url()));
        let err = sink
            .post(&WebhookMessage::from(stats_card(&report(), Audience::Players, 1, "G")))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Rejected(_, _)));
        assert_eq!(sink.push_reports(&report(), None, 1, "G").await, 0);
    }

    #[tokio::test]
    async fn unreachable_webhook_delivers_nothing() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .unwrap()
            .port();

        let sink = WebhookSink::new(format!("http://127.0.0.1:{port}/hook"));
        let err = sink
            .post(&WebhookMessage::from(stats_card(&report(), Audience::Players, 1, "G")))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Network(_, _)));
        let report = report();
        assert_eq!(sink.push_reports(&report, Some(&report), 1, "G").await, 0);
    }
}

/// Microsoft Teams "MessageCard" shapes, serialised as the connector expects.
use crate::stats::StatsReport;
use serde::Serialize;

const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.teams.card.o365connector";

/// Who a card ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Players,
    Teams,
}

impl Audience {
    fn singular(self) -> &'static str {
        match self {
            Audience::Players => "Player",
            Audience::Teams => "Team",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Audience::Players => "Players",
            Audience::Teams => "Teams",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WebhookMessage {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: &'static str,
    pub content: MessageCard,
}

#[derive(Debug, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: &'static str,
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Section {
    #[serde(rename_all = "camelCase")]
    Activity { activity_title: String, activity_subtitle: String },
    Facts { facts: Vec<Fact> },
    Text { text: String },
}

#[derive(Debug, Serialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

/// Build the summary card for one report.
pub fn stats_card(report: &StatsReport, audience: Audience, turn: i64, game_name: &str) -> MessageCard {
    let facts = report
        .leaderboard
        .titled()
        .map(|(title, leaders)| {
            let mut leaders = leaders.to_vec();
            leaders.sort();
            Fact { name: title, value: leaders.join(", ") }
        })
        .collect();

    let sections = vec![
        Section::Activity {
            activity_title: format!("Welcome to Turn {turn:02}"),
            activity_subtitle: format!(
                "I've crunched the numbers and here are the top {} for each stat.",
                audience.plural()
            ),
        },
        Section::Facts { facts },
        Section::Text {
            text: format!(
                "Looking at the above table it appears everyone should keep a close eye on **{}** \
                 as they seem to be all over this leaderboard",
                report.overall.join(" and ")
            ),
        },
    ];

    MessageCard {
        card_type: "MessageCard",
        context: "http://schema.org/extensions",
        title: format!("{game_name} - {} Stats", audience.singular()),
        sections,
    }
}

impl From<MessageCard> for WebhookMessage {
    fn from(card: MessageCard) -> Self {
        Self {
            message_type: "message",
            attachments: vec![Attachment { content_type: CARD_CONTENT_TYPE, content: card }],
        }
    }
}

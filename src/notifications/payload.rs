use serde::{Deserialize, Serialize};

/// Inbound push message as delivered by the messaging service.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct PushPayload {
    /// Topic path the message was published on, e.g. `/topics/free-games`.
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub data: PushData,

    #[serde(default)]
    pub notification: Option<PushNotification>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct PushData {
    #[serde(default)]
    #[serde(rename = "offerId")]
    pub offer_id: Option<String>,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    #[serde(rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct PushNotification {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    FreeGame,
    Generic,
}

impl PushPayload {
    pub fn kind(&self) -> NotificationKind {
        let from_free_games_topic = match &self.from {
            Some(from) => from.contains("free-games"),
            None => false,
        };

        if from_free_games_topic
            || self.data.topic.as_deref() == Some("free-games")
            || self.data.kind.as_deref() == Some("free_game")
        {
            NotificationKind::FreeGame
        } else {
            NotificationKind::Generic
        }
    }
}

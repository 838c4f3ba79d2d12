use serde::{Deserialize, Serialize};

use crate::{log_event, logging::LogEvent};

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct PushEvent {
    pub kind: String,
    pub offer_id: Option<String>,
    pub enriched: bool,
    pub error: Option<String>,
}

impl PushEvent {
    pub fn free_game(offer_id: Option<&str>, enriched: bool, error: Option<String>) {
        log_event!(LogEvent::Push(PushEvent {
            kind: "free_game".to_owned(),
            offer_id: offer_id.map(str::to_owned),
            enriched,
            error,
        }));
    }

    pub fn generic(offer_id: Option<&str>) {
        log_event!(LogEvent::Push(PushEvent {
            kind: "generic".to_owned(),
            offer_id: offer_id.map(str::to_owned),
            ..Default::default()
        }));
    }
}

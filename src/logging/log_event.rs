use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CycleEvent, FetchEvent, PushEvent};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum LogEvent {
    Fetch(FetchEvent),
    Cycle(CycleEvent),
    Push(PushEvent),
}

impl LogEvent {
    pub fn encode(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("{}", e);
                String::default()
            }
        }
    }
}

#[macro_export]
macro_rules! log_event {
    ($event:expr) => {
        ::tracing::debug!(event = $event.encode())
    };
}

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::Status;

/// Lifecycle event for one refresh cycle. Created when the cycle starts and
/// logged exactly once with its outcome.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CycleEvent {
    #[serde(skip)]
    start: Option<SystemTime>,

    pub games: usize,
    pub thumbnails_ok: usize,
    pub thumbnails_failed: usize,
    pub latency_ms: u64,
    pub outcome: String,
}

impl CycleEvent {
    pub fn new() -> Self {
        CycleEvent {
            start: Some(SystemTime::now()),
            games: 0,
            thumbnails_ok: 0,
            thumbnails_failed: 0,
            latency_ms: 0,
            outcome: String::default(),
        }
    }

    pub fn log_success(mut self, games: usize, thumbnails_ok: usize, thumbnails_failed: usize) {
        self.games = games;
        self.thumbnails_ok = thumbnails_ok;
        self.thumbnails_failed = thumbnails_failed;
        self.finish("success");
        info!(
            games,
            thumbnails_ok, thumbnails_failed, "refresh cycle succeeded"
        );
    }

    pub fn log_empty(mut self) {
        self.finish("empty");
        info!("no active free games, keeping previous snapshot");
    }

    pub fn log_offline(mut self) {
        self.finish("offline");
        info!("no network connectivity, skipping cycle");
    }

    pub fn log_retry(mut self, status: &Status) {
        self.finish("retry");
        error!("refresh cycle failed, will retry: {status}");
    }

    fn finish(&mut self, outcome: &str) {
        self.outcome = outcome.to_owned();
        self.latency_ms = match self.start.take() {
            Some(start) => SystemTime::now()
                .duration_since(start)
                .unwrap_or_default()
                .as_millis() as u64,
            None => 0,
        };
        log_cycle(self);
    }
}

impl Default for CycleEvent {
    fn default() -> Self {
        CycleEvent::new()
    }
}

fn log_cycle(event: &CycleEvent) {
    use crate::{log_event, logging::LogEvent};
    log_event!(LogEvent::Cycle(event.clone()));
}

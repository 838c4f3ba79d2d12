use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::error;

use crate::{
    api::ImageFetcher,
    library::SharedPrefs,
    logging::CycleEvent,
    traits::{Connectivity, OfferSource},
    widgets::UpdateBroadcast,
    worker::{run_cycle, TaskResult},
};

/// Default refresh period. The storefront rotates giveaways on the order of
/// days; 15 minutes keeps widgets fresh without hammering the API.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(15 * 60);

const RETRY_BACKOFF: Duration = Duration::from_secs(60);
const MAX_BACKOFF_STEPS: u32 = 4;

/// Owns the periodic refresh task. At most one schedule exists at a time;
/// asking again while one is pending keeps the existing schedule.
pub struct RefreshScheduler {
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        RefreshScheduler { handle: None }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(&self.handle, Some(handle) if !handle.is_finished())
    }

    /// Returns false when an existing schedule was kept.
    pub fn ensure_scheduled<S>(
        &mut self,
        api: Arc<S>,
        images: Arc<ImageFetcher>,
        prefs: Arc<SharedPrefs>,
        broadcast: Arc<UpdateBroadcast>,
        period: Duration,
    ) -> bool
    where
        S: OfferSource + Connectivity + Send + Sync + 'static,
    {
        if self.is_scheduled() {
            return false;
        }

        self.handle = Some(tokio::spawn(run_periodic(
            api, images, prefs, broadcast, period,
        )));
        true
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        RefreshScheduler::new()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_periodic<S>(
    api: Arc<S>,
    images: Arc<ImageFetcher>,
    prefs: Arc<SharedPrefs>,
    broadcast: Arc<UpdateBroadcast>,
    period: Duration,
) where
    S: OfferSource + Connectivity + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut consecutive_retries = 0u32;

    loop {
        interval.tick().await;

        if !api.is_online().await {
            CycleEvent::new().log_offline();
            continue;
        }

        match run_cycle(
            api.as_ref(),
            images.as_ref(),
            prefs.as_ref(),
            broadcast.as_ref(),
            Utc::now(),
        )
        .await
        {
            TaskResult::Success => consecutive_retries = 0,
            TaskResult::Retry => {
                consecutive_retries += 1;
                let backoff = RETRY_BACKOFF * consecutive_retries.min(MAX_BACKOFF_STEPS);
                tokio::time::sleep(backoff).await;
            }
            TaskResult::Failure(reason) => {
                error!("refresh worker stopped: {reason}");
                break;
            }
        }
    }
}

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use clap::Parser;
use freegames_backend::{
    api::{EgdataApi, ImageFetcher},
    library::SharedPrefs,
    widgets::UpdateBroadcast,
    worker::{run_cycle, RefreshScheduler, TaskResult, REFRESH_PERIOD},
    Status, Tracing,
};
use tracing::info;

#[derive(Parser)]
struct Opts {
    #[clap(long, default_value = "https://api.egdata.app")]
    base_url: String,

    /// Directory of the shared key-value store read by widget renderers.
    #[clap(long, default_value = "/tmp/freegames/widget")]
    store_dir: String,

    /// Refresh period in minutes; 0 falls back to the default.
    #[clap(long, default_value = "15")]
    period_minutes: u64,

    /// Run a single refresh cycle and exit.
    #[clap(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();
    Tracing::setup("refresh-worker")?;

    let api = Arc::new(EgdataApi::new(&opts.base_url)?);
    let images = Arc::new(ImageFetcher::new()?);
    let prefs = Arc::new(SharedPrefs::new(&opts.store_dir));
    let broadcast = Arc::new(UpdateBroadcast::new());

    if opts.once {
        let result = run_cycle(
            api.as_ref(),
            images.as_ref(),
            prefs.as_ref(),
            broadcast.as_ref(),
            Utc::now(),
        )
        .await;
        info!("refresh cycle finished: {result:?}");
        return match result {
            TaskResult::Failure(reason) => Err(Status::internal(reason)),
            _ => Ok(()),
        };
    }

    let period = match opts.period_minutes {
        0 => REFRESH_PERIOD,
        minutes => Duration::from_secs(minutes * 60),
    };

    let mut scheduler = RefreshScheduler::new();
    scheduler.ensure_scheduled(api, images, prefs, broadcast, period);
    info!("refresh worker scheduled every {period:?}");

    tokio::signal::ctrl_c().await?;
    scheduler.cancel();
    Ok(())
}

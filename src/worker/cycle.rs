use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::instrument;

use crate::{
    api::{ImageFetcher, OfferListing},
    documents::{FreeGameOffer, WidgetSnapshot},
    images::{
        apply_bottom_blur_and_gradient, center_crop, solid_placeholder, BLUR_RADIUS,
        BOTTOM_SPLIT_FRACTION,
    },
    library::{store, SharedPrefs},
    logging::{counter, error_counter, offer_description, CycleEvent, FetchEvent},
    traits::OfferSource,
    widgets::UpdateBroadcast,
};

/// The widget lays out at most this many offers.
pub const MAX_WIDGET_GAMES: usize = 6;

const WIDGET_BACKGROUND_WIDTH: u32 = 1000;
const WIDGET_BACKGROUND_HEIGHT: u32 = 563;

const PREVIEW_UPDATE_MIN_INTERVAL_MS: i64 = 60 * 60 * 1000;

/// Outcome of one refresh cycle. Scheduling and backoff are entirely the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// The snapshot was replaced and broadcast, or there was nothing to do.
    Success,
    /// Transient failure; run again next period.
    Retry,
    /// Non-transient failure; scheduling more cycles will not help.
    Failure(String),
}

/// Keeps offers whose giveaway window contains `now`, in API response order,
/// truncated to the widget capacity. Entries without a giveaway are dropped.
pub fn filter_active_offers(
    listings: Vec<OfferListing>,
    now: DateTime<Utc>,
) -> Vec<FreeGameOffer> {
    listings
        .into_iter()
        .filter_map(|listing| {
            let giveaway = listing.giveaway.clone()?;
            match giveaway.start_date <= now && now < giveaway.end_date {
                true => Some(FreeGameOffer {
                    thumbnail_url: listing.thumbnail_url(),
                    id: listing.id,
                    title: listing.title,
                    start_date: giveaway.start_date,
                    end_date: giveaway.end_date,
                }),
                false => None,
            }
        })
        .take(MAX_WIDGET_GAMES)
        .collect_vec()
}

/// One full refresh cycle: fetch → filter → process thumbnails → commit →
/// broadcast. Either the whole snapshot lands and widgets are signalled, or
/// nothing changes.
#[instrument(level = "trace", skip(api, images, prefs, broadcast))]
pub async fn run_cycle<S>(
    api: &S,
    images: &ImageFetcher,
    prefs: &SharedPrefs,
    broadcast: &UpdateBroadcast,
    now: DateTime<Utc>,
) -> TaskResult
where
    S: OfferSource + Sync,
{
    let event = CycleEvent::new();

    if let Err(status) = prefs.ensure_root() {
        return TaskResult::Failure(status.to_string());
    }

    let listings = api.free_games().await;
    let games = filter_active_offers(listings, now);
    if games.is_empty() {
        event.log_empty();
        return TaskResult::Success;
    }

    let results = futures::future::join_all(
        games
            .iter()
            .map(|game| process_thumbnail(images, prefs, game)),
    )
    .await;
    let thumbnails_ok = results.iter().filter(|ok| **ok).count();
    let thumbnails_failed = results.len() - thumbnails_ok;

    let snapshot = WidgetSnapshot::new(games, now);
    if let Err(status) = store::write(prefs, &snapshot) {
        event.log_retry(&status);
        return TaskResult::Retry;
    }

    broadcast.notify_all();
    update_preview_if_needed(prefs, now);

    event.log_success(snapshot.games.len(), thumbnails_ok, thumbnails_failed);
    TaskResult::Success
}

/// Downloads and post-processes one offer's cover art into the shared store.
/// Fetch and decode failures degrade to a placeholder; returns false when the
/// art is a placeholder or could not be written.
async fn process_thumbnail(
    images: &ImageFetcher,
    prefs: &SharedPrefs,
    game: &FreeGameOffer,
) -> bool {
    let (art, fetched) = match &game.thumbnail_url {
        Some(url) => match images.fetch_rgba(url).await {
            Ok(art) => {
                FetchEvent::fetch_image(url, None);
                (art, true)
            }
            Err(status) => {
                FetchEvent::fetch_image(url, Some(status.to_string()));
                (placeholder(), false)
            }
        },
        None => (placeholder(), false),
    };

    let art = center_crop(&art, WIDGET_BACKGROUND_WIDTH, WIDGET_BACKGROUND_HEIGHT);
    let art = apply_bottom_blur_and_gradient(&art, BLUR_RADIUS, BOTTOM_SPLIT_FRACTION);

    match store::write_thumbnail(prefs, &game.id, &art) {
        Ok(()) => fetched,
        Err(status) => {
            error_counter("thumbnail_write_fail", &offer_description(game), &status);
            false
        }
    }
}

fn placeholder() -> image::RgbaImage {
    solid_placeholder(WIDGET_BACKGROUND_WIDTH, WIDGET_BACKGROUND_HEIGHT)
}

/// Refreshes the widget-picker preview at most once per hour, tracked through
/// the shared store. Returns true when a refresh was recorded.
pub fn update_preview_if_needed(prefs: &SharedPrefs, now: DateTime<Utc>) -> bool {
    let last_update = prefs
        .read(store::LAST_PREVIEW_UPDATE)
        .ok()
        .flatten()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0);

    if now.timestamp_millis() - last_update <= PREVIEW_UPDATE_MIN_INTERVAL_MS {
        return false;
    }

    match prefs.commit(store::LAST_PREVIEW_UPDATE, &now.timestamp_millis().to_string()) {
        Ok(()) => {
            counter("preview_update", "widget preview refreshed");
            true
        }
        Err(status) => {
            error_counter("preview_update_fail", "widget preview refresh", &status);
            false
        }
    }
}

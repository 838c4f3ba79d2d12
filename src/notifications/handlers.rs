use std::{convert::Infallible, sync::Arc};

use chrono::Utc;
use tracing::instrument;

use crate::{logging::PushEvent, traits::OfferSource};

use super::{NotificationContent, NotificationKind, PushPayload};

#[instrument(level = "trace", skip(payload, api))]
pub async fn push_notification<S>(
    payload: PushPayload,
    api: Arc<S>,
) -> Result<impl warp::Reply, Infallible>
where
    S: OfferSource + Send + Sync,
{
    let content = build_notification(&payload, api.as_ref()).await;
    Ok(warp::reply::json(&content))
}

/// Classifies the payload and produces notification content, enriching
/// free-game messages with offer detail when the API cooperates.
pub async fn build_notification<S>(payload: &PushPayload, api: &S) -> NotificationContent
where
    S: OfferSource + Send + Sync,
{
    match payload.kind() {
        NotificationKind::FreeGame => match payload.data.offer_id.clone() {
            Some(offer_id) => match api.offer(&offer_id).await {
                Ok(detail) => {
                    PushEvent::free_game(Some(&offer_id), true, None);
                    NotificationContent::from_offer(&offer_id, &detail, Utc::now())
                }
                Err(status) => {
                    PushEvent::free_game(Some(&offer_id), false, Some(status.to_string()));
                    NotificationContent::fallback(payload, Some(&offer_id))
                }
            },
            None => {
                PushEvent::free_game(None, false, None);
                NotificationContent::fallback(payload, None)
            }
        },
        NotificationKind::Generic => {
            PushEvent::generic(payload.data.offer_id.as_deref());
            NotificationContent::standard(payload)
        }
    }
}

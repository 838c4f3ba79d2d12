use std::{convert::Infallible, sync::Arc};

use tracing::warn;
use warp::{self, Filter};

use crate::traits::OfferSource;

use super::{handlers, PushPayload};

/// Returns a Filter with all available routes.
pub fn routes<S>(
    api: Arc<S>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    S: OfferSource + Send + Sync + 'static,
{
    post_push(api).or_else(|e| async {
        warn! {"Rejected route: {:?}", e};
        Err(e)
    })
}

/// POST /push
fn post_push<S>(
    api: Arc<S>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    S: OfferSource + Send + Sync + 'static,
{
    warp::path!("push")
        .and(warp::post())
        .and(json_body::<PushPayload>())
        .and(with_api(api))
        .and_then(handlers::push_notification)
}

fn json_body<T: serde::de::DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(32 * 1024).and(warp::body::json())
}

pub fn with_api<S>(api: Arc<S>) -> impl Filter<Extract = (Arc<S>,), Error = Infallible> + Clone
where
    S: OfferSource + Send + Sync + 'static,
{
    warp::any().map(move || Arc::clone(&api))
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{instrument, warn};

use super::{OfferDetail, OfferListing};
use crate::{logging::FetchEvent, traits::{Connectivity, OfferSource}, Status};

/// Client for the free-games listing API.
pub struct EgdataApi {
    base_url: String,
    client: reqwest::Client,
}

impl EgdataApi {
    pub fn new(base_url: &str) -> Result<EgdataApi, Status> {
        Ok(EgdataApi {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
                .build()?,
        })
    }

    /// Fetches the full free-games listing. Network errors and non-200
    /// responses degrade to an empty listing; the caller treats that as "no
    /// update this cycle".
    #[instrument(level = "trace", skip(self))]
    pub async fn get_free_games(&self) -> Vec<OfferListing> {
        let uri = format!("{}{FREE_GAMES_PATH}", self.base_url);

        let resp = match self.client.get(&uri).send().await {
            Ok(resp) => resp,
            Err(e) => {
                FetchEvent::list_offers(&uri, 0, Some(e.to_string()));
                return vec![];
            }
        };
        if resp.status() != StatusCode::OK {
            FetchEvent::list_offers(&uri, 0, Some(format!("http status {}", resp.status())));
            return vec![];
        }

        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                FetchEvent::list_offers(&uri, 0, Some(e.to_string()));
                return vec![];
            }
        };

        let offers = parse_listing(&text);
        FetchEvent::list_offers(&uri, offers.len(), None);
        offers
    }

    /// Fetches detail for a single offer, used to enrich push notifications.
    #[instrument(level = "trace", skip(self))]
    pub async fn get_offer(&self, offer_id: &str) -> Result<OfferDetail, Status> {
        let uri = format!("{}{OFFERS_PATH}/{offer_id}", self.base_url);

        let resp = self.client.get(&uri).send().await?;
        match resp.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                FetchEvent::get_offer(offer_id, Some("not found".to_owned()));
                return Err(Status::not_found(format!("offer '{offer_id}' was not found")));
            }
            status => {
                FetchEvent::get_offer(offer_id, Some(format!("http status {status}")));
                return Err(Status::internal(format!(
                    "offer '{offer_id}' request failed with status {status}"
                )));
            }
        }

        let text = resp.text().await?;
        let detail = serde_json::from_str::<OfferDetail>(&text).map_err(|e| {
            let msg = format!("({offer_id}) Parse error: {e}\n API response: {text}");
            Status::internal(msg)
        })?;

        FetchEvent::get_offer(offer_id, None);
        Ok(detail)
    }
}

/// Parses the listing array, skipping records that do not match the offer
/// shape instead of failing the whole response.
fn parse_listing(text: &str) -> Vec<OfferListing> {
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(text) {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to parse free-games listing: {e}");
            return vec![];
        }
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<OfferListing>(record) {
            Ok(offer) => Some(offer),
            Err(e) => {
                warn!("Skipping malformed offer record: {e}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl OfferSource for EgdataApi {
    async fn free_games(&self) -> Vec<OfferListing> {
        self.get_free_games().await
    }

    async fn offer(&self, offer_id: &str) -> Result<OfferDetail, Status> {
        self.get_offer(offer_id).await
    }
}

#[async_trait]
impl Connectivity for EgdataApi {
    /// Cheap reachability probe used by the scheduler's network constraint.
    async fn is_online(&self) -> bool {
        let uri = format!("{}{FREE_GAMES_PATH}", self.base_url);
        match self.client.head(&uri).send().await {
            Ok(resp) => !resp.status().is_server_error(),
            Err(_) => false,
        }
    }
}

const FREE_GAMES_PATH: &str = "/free-games";
const OFFERS_PATH: &str = "/offers";
const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_listing_skips_malformed_records() {
        let text = r#"[
            {
                "id": "good",
                "title": "Good Game",
                "giveaway": {
                    "startDate": "2024-12-24T16:00:00.000Z",
                    "endDate": "2024-12-31T16:00:00.000Z"
                }
            },
            {"id": "no-giveaway", "title": "Listed Only"},
            {"id": "bad-dates", "giveaway": {"startDate": "soon", "endDate": "later"}},
            42
        ]"#;

        let offers = parse_listing(text);
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].id, "good");
        assert!(offers[0].giveaway.is_some());
        assert_eq!(offers[1].id, "no-giveaway");
        assert!(offers[1].giveaway.is_none());
    }

    #[test]
    fn parse_listing_rejects_non_array_payload() {
        assert!(parse_listing(r#"{"error": "maintenance"}"#).is_empty());
        assert!(parse_listing("not json").is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = EgdataApi::new("https://api.example.com/").unwrap();
        assert_eq!(api.base_url, "https://api.example.com");
    }
}

use serde::{Deserialize, Serialize};

use crate::{log_event, logging::LogEvent};

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct FetchEvent {
    pub list_offers: Option<ListOffers>,
    pub get_offer: Option<GetOffer>,
    pub fetch_image: Option<FetchImage>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct ListOffers {
    uri: String,
    offer_count: usize,
    error: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct GetOffer {
    offer_id: String,
    error: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct FetchImage {
    url: String,
    error: Option<String>,
}

impl FetchEvent {
    pub fn list_offers(uri: &str, offer_count: usize, error: Option<String>) {
        log_event!(LogEvent::Fetch(FetchEvent {
            list_offers: Some(ListOffers {
                uri: uri.to_owned(),
                offer_count,
                error,
            }),
            ..Default::default()
        }));
    }

    pub fn get_offer(offer_id: &str, error: Option<String>) {
        log_event!(LogEvent::Fetch(FetchEvent {
            get_offer: Some(GetOffer {
                offer_id: offer_id.to_owned(),
                error,
            }),
            ..Default::default()
        }));
    }

    pub fn fetch_image(url: &str, error: Option<String>) {
        log_event!(LogEvent::Fetch(FetchEvent {
            fetch_image: Some(FetchImage {
                url: url.to_owned(),
                error,
            }),
            ..Default::default()
        }));
    }
}

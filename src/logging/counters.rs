use tracing::info;

use crate::{documents::FreeGameOffer, Status};

pub fn counter(name: &str, description: &str) {
    info!(
        labels.log_type = "counters",
        labels.counter = name,
        description
    );
}

pub fn error_counter(name: &str, description: &str, status: &Status) {
    info!(
        labels.log_type = "counters",
        labels.counter_type = "error",
        labels.status = status.to_string(),
        labels.counter = name,
        description
    );
}

pub fn offer_description(offer: &FreeGameOffer) -> String {
    format!(
        "'{}', id: {}, free until: {}",
        offer.title, offer.id, offer.end_date
    )
}

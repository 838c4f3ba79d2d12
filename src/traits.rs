use async_trait::async_trait;

use crate::{
    api::{OfferDetail, OfferListing},
    Status,
};

/// Seam over the storefront listing API, mainly to keep the refresh cycle and
/// push handlers testable without a network.
#[async_trait]
pub trait OfferSource {
    /// Current free-games listing; empty on any transport failure.
    async fn free_games(&self) -> Vec<OfferListing>;

    async fn offer(&self, offer_id: &str) -> Result<OfferDetail, Status>;
}

/// Network constraint probe consulted before each scheduled cycle.
#[async_trait]
pub trait Connectivity {
    async fn is_online(&self) -> bool;
}

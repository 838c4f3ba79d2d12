mod egdata;
mod egdata_data;

pub use egdata::EgdataApi;
pub use egdata_data::{Giveaway, KeyImage, OfferDetail, OfferListing, Seller};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::date_format;

/// One entry of the `/free-games` listing response.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OfferListing {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub key_images: Vec<KeyImage>,

    /// Absent for entries that are listed but have no scheduled giveaway.
    #[serde(default)]
    pub giveaway: Option<Giveaway>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Giveaway {
    #[serde(with = "date_format::iso_millis")]
    pub start_date: DateTime<Utc>,

    #[serde(with = "date_format::iso_millis")]
    pub end_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct KeyImage {
    #[serde(default)]
    #[serde(rename = "type")]
    pub image_type: String,

    #[serde(default)]
    pub url: String,
}

impl OfferListing {
    /// Widget thumbnail pick: tall box art first, plain thumbnail as a
    /// fallback, else the first image carrying a URL.
    pub fn thumbnail_url(&self) -> Option<String> {
        select_image(&self.key_images, &TALL_RANK)
    }
}

/// Offer detail response used to enrich push notifications.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub seller: Option<Seller>,

    #[serde(default)]
    pub key_images: Vec<KeyImage>,

    #[serde(default)]
    pub price: Option<PriceInfo>,

    #[serde(default)]
    pub promotions: Option<Promotions>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct Seller {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default)]
    pub total_price: Option<TotalPrice>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TotalPrice {
    #[serde(default)]
    pub discount_price: Option<i64>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Promotions {
    #[serde(default)]
    pub promotional_offers: Vec<PromotionalOfferGroup>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromotionalOfferGroup {
    #[serde(default)]
    pub promotional_offers: Vec<PromotionalOffer>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromotionalOffer {
    #[serde(default)]
    #[serde(with = "date_format::iso_millis_opt")]
    pub end_date: Option<DateTime<Utc>>,
}

impl OfferDetail {
    /// An offer is only treated as free when its discounted total is zero.
    pub fn is_free(&self) -> bool {
        matches!(
            self.price
                .as_ref()
                .and_then(|price| price.total_price.as_ref())
                .and_then(|total| total.discount_price),
            Some(0)
        )
    }

    pub fn seller_name(&self) -> &str {
        match &self.seller {
            Some(seller) => &seller.name,
            None => "",
        }
    }

    /// End of the first promotion window, when the API reports one.
    pub fn promotion_end(&self) -> Option<DateTime<Utc>> {
        self.promotions
            .as_ref()?
            .promotional_offers
            .first()?
            .promotional_offers
            .first()?
            .end_date
    }

    /// Wide art for the expanded notification background.
    pub fn wide_image_url(&self) -> Option<String> {
        select_image(&self.key_images, &WIDE_RANK)
    }

    /// Small art for the collapsed notification row; falls back to the wide
    /// pick when no dedicated thumbnail is listed.
    pub fn thumbnail_url(&self) -> Option<String> {
        match select_ranked(&self.key_images, &THUMB_RANK) {
            Some(url) => Some(url),
            None => self.wide_image_url(),
        }
    }
}

// Image type preference tables. Lower rank wins; images whose type is not
// listed are only used as a last resort.
static TALL_RANK: phf::Map<&'static str, u32> = phf::phf_map! {
    "OfferImageTall" => 0,
    "DieselGameBoxTall" => 1,
    "Tall" => 2,
    "Thumbnail" => 3,
};

static WIDE_RANK: phf::Map<&'static str, u32> = phf::phf_map! {
    "DieselStoreFrontWide" => 0,
    "OfferImageWide" => 1,
    "featuredMedia" => 2,
    "DieselGameBoxWide" => 3,
};

static THUMB_RANK: phf::Map<&'static str, u32> = phf::phf_map! {
    "Thumbnail" => 0,
    "DieselStoreFrontTall" => 1,
    "OfferImageTall" => 2,
};

fn select_ranked(images: &[KeyImage], ranks: &phf::Map<&'static str, u32>) -> Option<String> {
    images
        .iter()
        .enumerate()
        .filter(|(_, image)| !image.url.is_empty())
        .filter_map(|(index, image)| {
            ranks
                .get(image.image_type.as_str())
                .map(|rank| (*rank, index, image))
        })
        .min_by_key(|(rank, index, _)| (*rank, *index))
        .map(|(_, _, image)| image.url.clone())
}

fn select_image(images: &[KeyImage], ranks: &phf::Map<&'static str, u32>) -> Option<String> {
    match select_ranked(images, ranks) {
        Some(url) => Some(url),
        None => images
            .iter()
            .find(|image| !image.url.is_empty())
            .map(|image| image.url.clone()),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::date_format;

/// A single active giveaway entry as stored in the widget snapshot.
///
/// Field names serialize in camelCase to match the JSON contract read by the
/// widget renderers.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreeGameOffer {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(with = "date_format::iso_millis")]
    pub start_date: DateTime<Utc>,

    #[serde(with = "date_format::iso_millis")]
    pub end_date: DateTime<Utc>,
}

impl FreeGameOffer {
    /// `true` if the giveaway window `[start_date, end_date)` contains `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now < self.end_date
    }
}

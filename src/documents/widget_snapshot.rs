use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FreeGameOffer;
use crate::util::date_format;

/// Document stored under the shared `widget_data` key. Holds everything the
/// widget renderers need for a render pass.
///
/// Replaced wholesale on every refresh cycle; no history is kept.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    #[serde(default)]
    pub games: Vec<FreeGameOffer>,

    #[serde(with = "date_format::iso_millis")]
    pub last_update: DateTime<Utc>,
}

impl WidgetSnapshot {
    pub fn new(games: Vec<FreeGameOffer>, last_update: DateTime<Utc>) -> Self {
        WidgetSnapshot { games, last_update }
    }
}

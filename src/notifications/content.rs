use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{api::OfferDetail, util::deep_link::DeepLink};

use super::PushPayload;

const STORE_NAME: &str = "Epic Games Store";

/// Rich notification layout content. Everything a platform shell needs to
/// render the collapsed and expanded notification views; delivery is the
/// caller's problem.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct NotificationContent {
    pub offer_id: Option<String>,
    pub title: String,
    pub body: String,

    /// Short line under the body, e.g. `"Ends tomorrow"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wide_image_url: Option<String>,

    pub is_free: bool,
    pub deep_link: String,
}

impl NotificationContent {
    /// Rich free-game notification built from fetched offer detail.
    pub fn from_offer(offer_id: &str, detail: &OfferDetail, now: DateTime<Utc>) -> Self {
        let title = match detail.title.is_empty() {
            false => detail.title.clone(),
            true => "Free Game".to_owned(),
        };

        NotificationContent {
            offer_id: Some(offer_id.to_owned()),
            body: format!("{title} is now free on {STORE_NAME}"),
            summary: Some(match detail.promotion_end() {
                Some(end) => humanize_end_date(end, now),
                None => format!("Free on {STORE_NAME}"),
            }),
            thumbnail_url: detail.thumbnail_url(),
            wide_image_url: detail.wide_image_url(),
            is_free: detail.is_free(),
            deep_link: DeepLink::offer(offer_id).to_uri(),
            title,
        }
    }

    /// Free-game notification when offer detail could not be fetched; falls
    /// back to whatever the payload itself carries.
    pub fn fallback(payload: &PushPayload, offer_id: Option<&str>) -> Self {
        NotificationContent {
            offer_id: offer_id.map(str::to_owned),
            title: payload_title(payload).unwrap_or_else(|| "Free Game Available!".to_owned()),
            body: payload_body(payload)
                .unwrap_or_else(|| format!("A new game is free on {STORE_NAME}")),
            deep_link: offer_deep_link(offer_id),
            ..Default::default()
        }
    }

    /// Non-free-game notification, rendered with the payload's own text.
    pub fn standard(payload: &PushPayload) -> Self {
        let offer_id = payload.data.offer_id.as_deref();
        NotificationContent {
            offer_id: offer_id.map(str::to_owned),
            title: payload_title(payload).unwrap_or_else(|| "EGData".to_owned()),
            body: payload_body(payload).unwrap_or_default(),
            deep_link: offer_deep_link(offer_id),
            ..Default::default()
        }
    }
}

fn payload_title(payload: &PushPayload) -> Option<String> {
    payload
        .notification
        .as_ref()
        .and_then(|notification| notification.title.clone())
        .or_else(|| payload.data.title.clone())
}

fn payload_body(payload: &PushPayload) -> Option<String> {
    payload
        .notification
        .as_ref()
        .and_then(|notification| notification.body.clone())
        .or_else(|| payload.data.body.clone())
}

fn offer_deep_link(offer_id: Option<&str>) -> String {
    match offer_id {
        Some(offer_id) => DeepLink::offer(offer_id).to_uri(),
        None => DeepLink::FreeGames.to_uri(),
    }
}

/// `"Ends today"` / `"Ends tomorrow"` / `"Ends in N days"` up to a week out,
/// then the date itself.
pub fn humanize_end_date(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (end - now).num_days();
    match days {
        d if d <= 0 => "Ends today".to_owned(),
        1 => "Ends tomorrow".to_owned(),
        d if d <= 7 => format!("Ends in {d} days"),
        _ => end.format("Ends %b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn end_date_today() {
        assert_eq!(
            humanize_end_date(at(2024, 12, 30, 18), at(2024, 12, 30, 10)),
            "Ends today"
        );
    }

    #[test]
    fn end_date_tomorrow() {
        assert_eq!(
            humanize_end_date(at(2024, 12, 31, 16), at(2024, 12, 30, 10)),
            "Ends tomorrow"
        );
    }

    #[test]
    fn end_date_within_a_week() {
        assert_eq!(
            humanize_end_date(at(2025, 1, 4, 10), at(2024, 12, 30, 10)),
            "Ends in 5 days"
        );
    }

    #[test]
    fn end_date_far_out_uses_calendar_date() {
        assert_eq!(
            humanize_end_date(at(2025, 3, 6, 10), at(2024, 12, 30, 10)),
            "Ends Mar 6"
        );
    }

    #[test]
    fn from_offer_builds_rich_content() {
        let detail: OfferDetail = serde_json::from_str(
            r#"{
                "id": "abc",
                "title": "Some Game",
                "price": {"totalPrice": {"discountPrice": 0}},
                "keyImages": [
                    {"type": "OfferImageWide", "url": "https://cdn.example.com/wide.jpg"},
                    {"type": "Thumbnail", "url": "https://cdn.example.com/thumb.jpg"}
                ],
                "promotions": {
                    "promotionalOffers": [
                        {"promotionalOffers": [{"endDate": "2024-12-31T16:00:00.000Z"}]}
                    ]
                }
            }"#,
        )
        .unwrap();

        let content =
            NotificationContent::from_offer("abc", &detail, at(2024, 12, 30, 10));

        assert_eq!(content.title, "Some Game");
        assert_eq!(content.body, "Some Game is now free on Epic Games Store");
        assert_eq!(content.summary.as_deref(), Some("Ends tomorrow"));
        assert_eq!(
            content.thumbnail_url.as_deref(),
            Some("https://cdn.example.com/thumb.jpg")
        );
        assert_eq!(
            content.wide_image_url.as_deref(),
            Some("https://cdn.example.com/wide.jpg")
        );
        assert!(content.is_free);
        assert_eq!(content.deep_link, "egdata://offer/abc");
    }

    #[test]
    fn fallback_uses_payload_text() {
        let payload: PushPayload = serde_json::from_str(
            r#"{
                "data": {"offerId": "abc", "topic": "free-games"},
                "notification": {"title": "Free now", "body": "Grab it"}
            }"#,
        )
        .unwrap();

        let content = NotificationContent::fallback(&payload, Some("abc"));
        assert_eq!(content.title, "Free now");
        assert_eq!(content.body, "Grab it");
        assert_eq!(content.deep_link, "egdata://offer/abc");
    }

    #[test]
    fn fallback_defaults_without_payload_text() {
        let content = NotificationContent::fallback(&PushPayload::default(), None);
        assert_eq!(content.title, "Free Game Available!");
        assert_eq!(content.body, "A new game is free on Epic Games Store");
        assert_eq!(content.deep_link, "egdata://free-games");
    }

    #[test]
    fn standard_notification_keeps_payload_text() {
        let payload: PushPayload = serde_json::from_str(
            r#"{"data": {"title": "News", "body": "Sale starts Friday"}}"#,
        )
        .unwrap();

        let content = NotificationContent::standard(&payload);
        assert_eq!(content.title, "News");
        assert_eq!(content.body, "Sale starts Friday");
        assert_eq!(content.deep_link, "egdata://free-games");
    }
}

use image::RgbaImage;
use tracing::instrument;

use crate::{documents::WidgetSnapshot, Status};

use super::SharedPrefs;

/// Key holding the JSON snapshot read by every widget renderer.
pub const WIDGET_DATA: &str = "widget_data";

/// Key holding the epoch-millis timestamp of the last widget-picker preview
/// refresh.
pub const LAST_PREVIEW_UPDATE: &str = "last_preview_update";

#[instrument(name = "store::read", level = "trace", skip(prefs))]
pub fn read(prefs: &SharedPrefs) -> Result<WidgetSnapshot, Status> {
    match prefs.read(WIDGET_DATA)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Err(Status::not_found(format!(
            "shared entry '{WIDGET_DATA}' was not found"
        ))),
    }
}

#[instrument(name = "store::write", level = "trace", skip(prefs, snapshot))]
pub fn write(prefs: &SharedPrefs, snapshot: &WidgetSnapshot) -> Result<(), Status> {
    prefs.commit(WIDGET_DATA, &serde_json::to_string(snapshot)?)
}

/// Processed cover art for one offer, stored next to the snapshot so render
/// passes never reach for the network.
#[instrument(name = "store::write_thumbnail", level = "trace", skip(prefs, image))]
pub fn write_thumbnail(
    prefs: &SharedPrefs,
    offer_id: &str,
    image: &RgbaImage,
) -> Result<(), Status> {
    let mut encoded = std::io::Cursor::new(Vec::new());
    image.write_to(&mut encoded, image::ImageFormat::Png)?;
    prefs.commit_bytes(&thumbnail_key(offer_id), encoded.get_ref())
}

#[instrument(name = "store::read_thumbnail", level = "trace", skip(prefs))]
pub fn read_thumbnail(prefs: &SharedPrefs, offer_id: &str) -> Result<Option<RgbaImage>, Status> {
    match prefs.read_bytes(&thumbnail_key(offer_id))? {
        Some(bytes) => Ok(Some(image::load_from_memory(&bytes)?.to_rgba8())),
        None => Ok(None),
    }
}

fn thumbnail_key(offer_id: &str) -> String {
    format!("thumb_{offer_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::FreeGameOffer;
    use chrono::{TimeZone, Utc};
    use image::Rgba;

    fn snapshot() -> WidgetSnapshot {
        WidgetSnapshot::new(
            vec![FreeGameOffer {
                id: "offer-1".to_owned(),
                title: "Some Game".to_owned(),
                thumbnail_url: Some("https://cdn.example.com/tall.jpg".to_owned()),
                start_date: Utc.with_ymd_and_hms(2024, 12, 24, 16, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2024, 12, 31, 16, 0, 0).unwrap(),
            }],
            Utc.with_ymd_and_hms(2024, 12, 30, 8, 15, 0).unwrap(),
        )
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());

        write(&prefs, &snapshot()).unwrap();
        assert_eq!(read(&prefs).unwrap(), snapshot());
    }

    #[test]
    fn read_before_any_write_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());
        assert!(matches!(read(&prefs), Err(Status::NotFound(_))));
    }

    #[test]
    fn write_replaces_snapshot_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());

        write(&prefs, &snapshot()).unwrap();
        let empty = WidgetSnapshot::new(vec![], Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        write(&prefs, &empty).unwrap();

        assert_eq!(read(&prefs).unwrap(), empty);
    }

    #[test]
    fn thumbnail_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());

        let art = RgbaImage::from_pixel(4, 3, Rgba([200, 100, 50, 255]));
        write_thumbnail(&prefs, "offer-1", &art).unwrap();

        let loaded = read_thumbnail(&prefs, "offer-1").unwrap().unwrap();
        assert_eq!(loaded, art);
    }

    #[test]
    fn missing_thumbnail_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());
        assert!(read_thumbnail(&prefs, "missing").unwrap().is_none());
    }
}

use image::RgbaImage;

use crate::{
    documents::FreeGameOffer,
    images::ThumbnailCache,
    library::{store, SharedPrefs},
    Status,
};

/// Widget factory lifecycle, platform-agnostic: load data once per render
/// pass, hand out items by position, release resources when the host tears
/// the widget down.
pub trait WidgetDataSource {
    fn load(&mut self) -> Result<(), Status>;
    fn count(&self) -> usize;
    fn item_at(&self, index: usize) -> Option<&FreeGameOffer>;
    fn dispose(&mut self);
}

/// Data source backed by the shared snapshot store. All reads are local;
/// render passes never touch the network.
pub struct SnapshotDataSource {
    prefs: SharedPrefs,
    games: Vec<FreeGameOffer>,
    cache: ThumbnailCache,
}

impl SnapshotDataSource {
    pub fn new(prefs: SharedPrefs) -> Self {
        SnapshotDataSource {
            prefs,
            games: vec![],
            cache: ThumbnailCache::new(CACHE_CAPACITY),
        }
    }

    /// Processed cover art for an offer, from cache or the shared store.
    /// `None` means the renderer should fall back to a placeholder.
    pub fn thumbnail(&mut self, offer_id: &str) -> Option<&RgbaImage> {
        if self.cache.get(offer_id).is_none() {
            match store::read_thumbnail(&self.prefs, offer_id) {
                Ok(Some(art)) => self.cache.insert(offer_id, art),
                Ok(None) | Err(_) => return None,
            }
        }
        self.cache.get(offer_id)
    }
}

impl WidgetDataSource for SnapshotDataSource {
    fn load(&mut self) -> Result<(), Status> {
        let snapshot = store::read(&self.prefs)?;
        self.games = snapshot.games;
        Ok(())
    }

    fn count(&self) -> usize {
        self.games.len()
    }

    fn item_at(&self, index: usize) -> Option<&FreeGameOffer> {
        self.games.get(index)
    }

    fn dispose(&mut self) {
        self.games.clear();
        self.cache.clear();
    }
}

const CACHE_CAPACITY: usize = 6;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::WidgetSnapshot;
    use chrono::{TimeZone, Utc};
    use image::Rgba;

    fn offer(id: &str) -> FreeGameOffer {
        FreeGameOffer {
            id: id.to_owned(),
            title: format!("Game {id}"),
            start_date: Utc.with_ymd_and_hms(2024, 12, 24, 16, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 12, 31, 16, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    fn seeded_source(dir: &std::path::Path) -> SnapshotDataSource {
        let prefs = SharedPrefs::new(dir);
        let snapshot = WidgetSnapshot::new(
            vec![offer("a"), offer("b")],
            Utc.with_ymd_and_hms(2024, 12, 30, 8, 0, 0).unwrap(),
        );
        store::write(&prefs, &snapshot).unwrap();
        store::write_thumbnail(&prefs, "a", &RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])))
            .unwrap();
        SnapshotDataSource::new(SharedPrefs::new(dir))
    }

    #[test]
    fn load_exposes_snapshot_items_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = seeded_source(dir.path());

        source.load().unwrap();
        assert_eq!(source.count(), 2);
        assert_eq!(source.item_at(0).unwrap().id, "a");
        assert_eq!(source.item_at(1).unwrap().id, "b");
        assert!(source.item_at(2).is_none());
    }

    #[test]
    fn load_fails_before_first_snapshot_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = SnapshotDataSource::new(SharedPrefs::new(dir.path()));
        assert!(source.load().is_err());
    }

    #[test]
    fn thumbnail_loads_from_store_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = seeded_source(dir.path());

        assert!(source.thumbnail("a").is_some());
        assert_eq!(source.cache.len(), 1);

        // Second hit comes from the cache, even if the backing file vanishes.
        SharedPrefs::new(dir.path()).remove("thumb_a").unwrap();
        assert!(source.thumbnail("a").is_some());
    }

    #[test]
    fn missing_thumbnail_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = seeded_source(dir.path());
        assert!(source.thumbnail("b").is_none());
    }

    #[test]
    fn dispose_releases_items_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = seeded_source(dir.path());

        source.load().unwrap();
        source.thumbnail("a");
        source.dispose();

        assert_eq!(source.count(), 0);
        assert!(source.cache.is_empty());
    }
}

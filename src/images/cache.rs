use std::collections::{HashMap, VecDeque};

use image::RgbaImage;

/// Bounded in-memory cache for processed cover art, keyed by offer id.
///
/// Owned by the renderer data source; when full, the oldest entry is evicted
/// first. The snapshot holds at most a handful of offers, so the default
/// capacity comfortably covers one render pass.
pub struct ThumbnailCache {
    capacity: usize,
    entries: HashMap<String, RgbaImage>,
    order: VecDeque<String>,
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        ThumbnailCache {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, offer_id: &str) -> Option<&RgbaImage> {
        self.entries.get(offer_id)
    }

    pub fn insert(&mut self, offer_id: impl Into<String>, image: RgbaImage) {
        let offer_id = offer_id.into();

        if self.entries.insert(offer_id.clone(), image).is_none() {
            self.order.push_back(offer_id);
        }

        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

use std::time::Duration;

use image::RgbaImage;
use reqwest::StatusCode;
use tracing::instrument;

use crate::Status;

/// Downloads and decodes cover art for widget backgrounds and notifications.
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    pub fn new() -> Result<ImageFetcher, Status> {
        Ok(ImageFetcher {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(10))
                .build()?,
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn fetch_rgba(&self, url: &str) -> Result<RgbaImage, Status> {
        let resp = self.client.get(url).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(Status::internal(format!(
                "image request for '{url}' failed with status {}",
                resp.status()
            )));
        }

        let bytes = resp.bytes().await?;
        let image = image::load_from_memory(&bytes)?;
        Ok(image.to_rgba8())
    }
}

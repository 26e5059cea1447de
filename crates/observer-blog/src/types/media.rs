//! Media attachments.

use std::collections::HashMap;

use serde::Deserialize;

/// Uploaded image with its resolved URLs.
///
/// Only lives for the duration of one publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Media id assigned by WordPress.
    pub id: String,
    /// Full-size URL.
    pub full: String,
    /// Thumbnail URL, if WordPress generated one.
    pub thumbnail: Option<String>,
}

/// Media as returned by `GET media/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MediaResponse {
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub media_details: Option<MediaDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MediaDetails {
    #[serde(default)]
    pub sizes: HashMap<String, MediaSize>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MediaSize {
    pub source_url: String,
}

impl MediaResponse {
    fn size_url(&self, size: &str) -> Option<&str> {
        self.media_details
            .as_ref()
            .and_then(|details| details.sizes.get(size))
            .map(|s| s.source_url.as_str())
    }

    /// Build the image descriptor, or `None` if no URL can be resolved.
    pub(crate) fn into_image(self, id: &str) -> Option<Image> {
        let full = self
            .size_url("full")
            .or(self.source_url.as_deref())?
            .to_owned();
        let thumbnail = self.size_url("thumbnail").map(str::to_owned);
        Some(Image {
            id: id.to_owned(),
            full,
            thumbnail,
        })
    }
}

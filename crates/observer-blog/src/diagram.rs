//! Publishing chart images as WordPress media.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::client::RemoteResourceClient;
use crate::error::BlogError;
use crate::types::Image;

/// Uploads chart images and resolves their public URLs.
pub struct DiagramPublisher<'a> {
    client: &'a dyn RemoteResourceClient,
}

impl<'a> DiagramPublisher<'a> {
    /// Create a publisher on top of `client`.
    #[must_use]
    pub fn new(client: &'a dyn RemoteResourceClient) -> Self {
        Self { client }
    }

    /// Upload `data` as `{prefix}-{today}.png` and resolve its URLs.
    ///
    /// Either both steps succeed or an error is returned; a media item
    /// uploaded before a failed resolve is left behind.
    pub async fn publish(&self, data: &[u8], prefix: &str) -> Result<Image, BlogError> {
        let filename = diagram_filename(prefix, Local::now().date_naive());
        let id = self.client.create_media(&filename, data).await?;
        let image = self.client.read_media(&id).await?;
        info!("Published diagram '{}' as media {}", filename, image.id);
        Ok(image)
    }
}

/// Upload filename for a diagram published on `date`.
#[must_use]
pub fn diagram_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.png", date.format("%Y-%m-%d"))
}

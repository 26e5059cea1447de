//! Media operations.

use reqwest::Method;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, LOCATION};
use tracing::info;

use super::{WordPressClient, check_status, read_json};
use crate::error::BlogError;
use crate::types::{Image, MediaResponse};

impl WordPressClient {
    pub(crate) async fn upload_media(&self, filename: &str, data: &[u8]) -> Result<String, BlogError> {
        info!("Uploading media '{}' ({} bytes)", filename, data.len());

        let response = self
            .request(Method::POST, "media")
            .header(CONTENT_TYPE, guess_content_type(filename))
            .header(CONTENT_DISPOSITION, format!("attachment; filename={filename}"))
            .body(data.to_vec())
            .send()
            .await?;
        let response = check_status(response, "media").await?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let id = media_id_from_location(location).ok_or_else(|| BlogError::Remote {
            status,
            message: format!("no media id in Location header '{location}'"),
        })?;
        info!("Created media {} for '{}'", id, filename);
        Ok(id.to_owned())
    }

    pub(crate) async fn get_media(&self, id: &str) -> Result<Image, BlogError> {
        let path = format!("media/{id}");
        info!("Reading {}", path);

        let response = self.request(Method::GET, &path).send().await?;
        let response = check_status(response, &path).await?;
        let status = response.status().as_u16();

        let media: MediaResponse = read_json(response).await?;
        media.into_image(id).ok_or_else(|| BlogError::Remote {
            status,
            message: format!("{path} has no source URL"),
        })
    }

    pub(crate) async fn force_delete_media(&self, id: &str) -> Result<(), BlogError> {
        let path = format!("media/{id}");
        info!("Deleting {}", path);

        let response = self
            .request(Method::DELETE, &path)
            .query(&[("force", "true")])
            .send()
            .await?;
        check_status(response, &path).await?;
        Ok(())
    }
}

/// Last path segment of the `Location` header, e.g. `.../media/12345` → `12345`.
fn media_id_from_location(location: &str) -> Option<&str> {
    let path = location.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn guess_content_type(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::RemoteResourceClient;
    use crate::testing::{MockResponse, MockServer};

    #[test]
    fn test_media_id_from_location() {
        assert_eq!(
            media_id_from_location("https://blog.example.com/wp-json/wp/v2/media/12345"),
            Some("12345")
        );
        assert_eq!(media_id_from_location("some-test-id/12345"), Some("12345"));
        assert_eq!(media_id_from_location("/media/77/"), Some("77"));
        assert_eq!(media_id_from_location("/media/77?context=edit"), Some("77"));
        assert_eq!(media_id_from_location(""), None);
        assert_eq!(media_id_from_location("/"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("verlauf-2024-05-01.png"), "image/png");
        assert_eq!(guess_content_type("photo.jpeg"), "image/jpeg");
        assert_eq!(guess_content_type("data.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_create_media_uploads_raw_bytes() {
        let server = MockServer::start().await;
        server.enqueue(
            MockResponse::status(201)
                .with_header("Location", "https://blog.example.com/wp-json/wp/v2/media/12345")
                .with_body(r#"{"id": 12345}"#),
        );
        let client = WordPressClient::with_defaults(&server.base_url(), "u", "p").unwrap();

        let id = client
            .create_media("verlauf-2024-05-01.png", b"\x89PNG")
            .await
            .unwrap();

        assert_eq!(id, "12345");
        let request = &server.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/media");
        assert_eq!(
            request.header("content-disposition").as_deref(),
            Some("attachment; filename=verlauf-2024-05-01.png")
        );
        assert_eq!(request.header("content-type").as_deref(), Some("image/png"));
        assert_eq!(request.body, b"\x89PNG".to_vec());
    }

    #[tokio::test]
    async fn test_create_media_without_location_fails() {
        let server = MockServer::start().await;
        server.enqueue(MockResponse::status(201).with_body(r#"{"id": 12345}"#));
        let client = WordPressClient::with_defaults(&server.base_url(), "u", "p").unwrap();

        let err = client.create_media("x.png", b"").await.unwrap_err();

        assert!(matches!(err, BlogError::Remote { status: 201, .. }));
    }

    #[tokio::test]
    async fn test_read_media_resolves_urls() {
        let server = MockServer::start().await;
        server.enqueue(MockResponse::json(
            r#"{"id": 12345, "source_url": "https://blog.example.com/uploads/verlauf.png",
                "media_details": {"sizes": {"thumbnail": {"source_url": "https://blog.example.com/uploads/verlauf-150x150.png"}}}}"#,
        ));
        let client = WordPressClient::with_defaults(&server.base_url(), "u", "p").unwrap();

        let image = client.read_media("12345").await.unwrap();

        assert_eq!(image.id, "12345");
        assert_eq!(image.full, "https://blog.example.com/uploads/verlauf.png");
        assert_eq!(
            image.thumbnail.as_deref(),
            Some("https://blog.example.com/uploads/verlauf-150x150.png")
        );
        assert_eq!(server.requests()[0].path, "/media/12345");
    }

    #[tokio::test]
    async fn test_delete_media_forces() {
        let server = MockServer::start().await;
        server.enqueue(MockResponse::json(r#"{"deleted": true}"#));
        let client = WordPressClient::with_defaults(&server.base_url(), "u", "p").unwrap();

        client.delete_media("634535").await.unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.path, "/media/634535?force=true");
    }
}

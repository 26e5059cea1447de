//! WordPress REST API client.
//!
//! [`RemoteResourceClient`] is the narrow contract the publisher needs:
//! read and overwrite documents, create, resolve and delete media. Every call
//! is exactly one HTTP round trip. There are no retries at this layer.
//!
//! [`WordPressClient`] implements it over the WordPress REST API with
//! application-password (basic) authentication.

mod documents;
mod media;

use std::time::Duration;

use async_trait::async_trait;
use observer_config::WordPressConfig;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::BlogError;
use crate::types::{DocumentRef, Image};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Remote operations used by the publish pipeline.
#[async_trait]
pub trait RemoteResourceClient: Send + Sync {
    /// Read the current body of a document.
    async fn read_document(&self, document: &DocumentRef) -> Result<String, BlogError>;

    /// Overwrite the body of a document.
    async fn write_document(&self, document: &DocumentRef, body: &str) -> Result<(), BlogError>;

    /// Upload binary content and return the id WordPress assigned to it.
    async fn create_media(&self, filename: &str, data: &[u8]) -> Result<String, BlogError>;

    /// Resolve the public URLs of an uploaded media item.
    async fn read_media(&self, id: &str) -> Result<Image, BlogError>;

    /// Delete a media item, bypassing the trash.
    async fn delete_media(&self, id: &str) -> Result<(), BlogError>;
}

/// WordPress REST API client.
pub struct WordPressClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl WordPressClient {
    /// Create a client for the REST root `base_url`
    /// (e.g. `https://blog.example.com/wp-json/wp/v2`).
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, BlogError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Create client from the `[wordpress]` config section.
    pub fn from_config(config: &WordPressConfig) -> Result<Self, BlogError> {
        Self::new(
            &config.base_url,
            &config.username,
            &config.password,
            config.timeout(),
        )
    }

    /// Create client with the default timeout.
    pub fn with_defaults(base_url: &str, username: &str, password: &str) -> Result<Self, BlogError> {
        Self::new(
            base_url,
            username,
            password,
            Duration::from_secs(DEFAULT_TIMEOUT),
        )
    }

    /// Get the REST root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated request for a path relative to the REST root.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
    }
}

#[async_trait]
impl RemoteResourceClient for WordPressClient {
    async fn read_document(&self, document: &DocumentRef) -> Result<String, BlogError> {
        self.get_document(document).await
    }

    async fn write_document(&self, document: &DocumentRef, body: &str) -> Result<(), BlogError> {
        self.post_document(document, body).await
    }

    async fn create_media(&self, filename: &str, data: &[u8]) -> Result<String, BlogError> {
        self.upload_media(filename, data).await
    }

    async fn read_media(&self, id: &str) -> Result<Image, BlogError> {
        self.get_media(id).await
    }

    async fn delete_media(&self, id: &str) -> Result<(), BlogError> {
        self.force_delete_media(id).await
    }
}

/// Map error statuses to [`BlogError`], passing successful responses through.
async fn check_status(response: Response, resource: &str) -> Result<Response, BlogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(BlogError::NotFound {
            resource: resource.to_owned(),
        });
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "(unable to read error body)".to_owned());
    Err(BlogError::Remote {
        status: status.as_u16(),
        message,
    })
}

/// Decode a JSON body; undecodable payloads are remote errors, not transport errors.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BlogError> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|err| BlogError::Remote {
        status,
        message: format!("malformed response: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockResponse, MockServer};

    fn client_for(server: &MockServer) -> WordPressClient {
        WordPressClient::with_defaults(&server.base_url(), "observer", "app password").unwrap()
    }

    #[tokio::test]
    async fn test_requests_are_authenticated() {
        let server = MockServer::start().await;
        server.enqueue(MockResponse::json(r#"{"content": {"rendered": "<p>x</p>"}}"#));
        let client = client_for(&server);

        client
            .read_document(&DocumentRef::content_block("146"))
            .await
            .unwrap();

        let request = server.requests().remove(0);
        // "observer:app password" in base64
        assert_eq!(
            request.header("authorization").as_deref(),
            Some("Basic b2JzZXJ2ZXI6YXBwIHBhc3N3b3Jk")
        );
        assert_eq!(request.header("accept").as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let server = MockServer::start().await;
        server.enqueue(MockResponse::status(404).with_body(r#"{"code": "rest_post_invalid_id"}"#));
        let client = client_for(&server);

        let err = client
            .read_document(&DocumentRef::page("999"))
            .await
            .unwrap_err();

        assert!(matches!(err, BlogError::NotFound { ref resource } if resource == "pages/999"));
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;
        server.enqueue(MockResponse::status(401).with_body("rest_cannot_edit"));
        let client = client_for(&server);

        let err = client
            .write_document(&DocumentRef::page("148"), "<p>new</p>")
            .await
            .unwrap_err();

        match err {
            BlogError::Remote { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "rest_cannot_edit");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let base_url = MockServer::unused_base_url().await;
        let client = WordPressClient::with_defaults(&base_url, "observer", "secret").unwrap();

        let err = client.delete_media("1").await.unwrap_err();

        assert!(matches!(err, BlogError::Transport(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            WordPressClient::with_defaults("https://blog.example.com/wp-json/wp/v2/", "u", "p")
                .unwrap();
        assert_eq!(client.base_url(), "https://blog.example.com/wp-json/wp/v2");
    }
}

//! Content block and page operations.

use reqwest::Method;
use serde_json::json;
use tracing::info;

use super::{WordPressClient, check_status, read_json};
use crate::error::BlogError;
use crate::types::{DocumentRef, DocumentResponse};

impl WordPressClient {
    pub(crate) async fn get_document(&self, document: &DocumentRef) -> Result<String, BlogError> {
        let path = document.path();
        info!("Reading {}", path);

        let response = self.request(Method::GET, &path).send().await?;
        let response = check_status(response, &path).await?;
        let status = response.status().as_u16();

        let document: DocumentResponse = read_json(response).await?;
        document.into_body().ok_or_else(|| BlogError::Remote {
            status,
            message: format!("{path} has no content"),
        })
    }

    pub(crate) async fn post_document(
        &self,
        document: &DocumentRef,
        body: &str,
    ) -> Result<(), BlogError> {
        let path = document.path();
        info!("Updating {} ({} bytes)", path, body.len());

        let response = self
            .request(Method::POST, &path)
            .json(&json!({ "content": body }))
            .send()
            .await?;
        check_status(response, &path).await?;
        Ok(())
    }
}

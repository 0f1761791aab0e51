//! Meeting processing server adapter
//!
//! Implements the ProcessingServicePort over HTTP. Every artifact kind is a
//! single POST of `{"url": <recording>}` to its endpoint; the server answers
//! with `{"success": true, "downloadUrl": "..."}` once the artifact exists.

use crate::config::ProcessingConfig;
use crate::domain::models::ArtifactKind;
use crate::error::{AppError, Result};
use crate::ports::processing::{ArtifactPayload, ProcessingServicePort};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Processing server implementation
pub struct HttpProcessingService {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProcessingResponse {
    success: bool,
    #[serde(rename = "downloadUrl")]
    download_url: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl HttpProcessingService {
    /// Create a new service client from validated settings
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the endpoint for one artifact kind
    pub fn endpoint_url(&self, kind: ArtifactKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }
}

/// Classify a completed HTTP exchange into a download location or a failure
fn interpret_response(status: StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        return Err(AppError::Transport(format!(
            "Processing server returned {}: {}",
            status,
            body.trim()
        )));
    }

    let parsed: ProcessingResponse = serde_json::from_str(body).map_err(|e| {
        AppError::Protocol(format!("Failed to parse processing response: {}", e))
    })?;

    if !parsed.success {
        let reason = parsed
            .message
            .or(parsed.error)
            .unwrap_or_else(|| "service reported failure".to_string());
        return Err(AppError::ServiceFailure(reason));
    }

    match parsed.download_url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(AppError::Protocol(
            "Response reported success without a downloadUrl".to_string(),
        )),
    }
}

#[async_trait]
impl ProcessingServicePort for HttpProcessingService {
    async fn request_artifact(&self, kind: ArtifactKind, source_link: &str) -> Result<String> {
        let url = self.endpoint_url(kind);
        log::info!("Requesting {} from {}", kind, url);

        let payload = ArtifactPayload {
            url: source_link.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Transport(format!("{} request timed out: {}", kind, e))
                } else {
                    AppError::Transport(format!("{} request failed: {}", kind, e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read {} response: {}", kind, e)))?;

        log::debug!("{} response ({}): {}", kind, status, body);

        let download_url = interpret_response(status, &body)?;
        log::info!("{} ready at {}", kind, download_url);
        Ok(download_url)
    }
}

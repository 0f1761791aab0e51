/// Processing service port trait
///
/// Defines the interface for the remote service that generates meeting artifacts.
/// Implementations: HTTP processing server
use crate::domain::models::ArtifactKind;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Payload sent to every artifact endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactPayload {
    /// The meeting recording URL
    pub url: String,
}

/// Port trait for the artifact processing service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessingServicePort: Send + Sync {
    /// Requests generation of one artifact for a recording.
    ///
    /// Returns the download location on success. Errors carry the failure
    /// taxonomy: `Transport`, `Protocol` or `ServiceFailure`.
    async fn request_artifact(&self, kind: ArtifactKind, source_link: &str) -> Result<String>;
}

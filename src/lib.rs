//! Meeting Artifacts
//!
//! Requests transcripts and summaries of recorded meetings from a remote
//! processing service and keeps one request/result state machine per
//! artifact kind.

pub mod adapters;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod meeting;
pub mod ports;

pub use config::ProcessingConfig;
pub use controller::{Activation, ArtifactRequestController};
pub use domain::{ArtifactKind, ArtifactRequest, ArtifactSnapshot, FailureKind, RequestState};
pub use error::{AppError, Result};
pub use meeting::MeetingArtifacts;

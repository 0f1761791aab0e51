//! Mock implementations for testing

use crate::domain::models::ArtifactKind;
use crate::error::{AppError, Result};
use crate::ports::opener::UrlOpenerPort;
use crate::ports::processing::ProcessingServicePort;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Mock processing service with scripted responses.
///
/// A gated service holds every call until `release` hands out a permit,
/// which lets tests observe the `Requesting` window.
#[derive(Clone, Default)]
pub struct MockProcessingService {
    calls: Arc<Mutex<Vec<(ArtifactKind, String)>>>,
    responses: Arc<Mutex<VecDeque<Result<String>>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockProcessingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    /// Queue the outcome of the next call
    pub fn push_response(&self, response: Result<String>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Let `count` held calls proceed
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(ArtifactKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessingServicePort for MockProcessingService {
    async fn request_artifact(&self, kind: ArtifactKind, source_link: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, source_link.to_string()));

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| AppError::Other(e.to_string()))?
                .forget();
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Transport("no scripted response".to_string())))
    }
}

/// Opener that records every URL instead of launching anything
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpenerPort for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no opener available",
            )));
        }
        Ok(())
    }
}

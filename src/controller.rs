//! Per-artifact request controller
//!
//! Drives one `ArtifactRequest` through Idle -> Requesting -> Ready/Failed.
//! The request state lives in a watch channel so hosts can render the label
//! reactively; the transition into `Requesting` happens under the channel's
//! lock, which is what keeps a second activation from issuing a second call.

use crate::config::ProcessingConfig;
use crate::domain::models::{
    ArtifactKind, ArtifactRequest, ArtifactSnapshot, FailureRecord, RequestState,
};
use crate::error::{AppError, Result};
use crate::ports::{ProcessingServicePort, UrlOpenerPort};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What an activation did
#[derive(Debug)]
pub enum Activation {
    /// A request was issued; the handle resolves once its outcome is applied
    Requested(JoinHandle<()>),
    /// The cached location was opened, no request issued
    CacheHit { result_url: String },
    /// A request is already outstanding; nothing happened
    InFlight,
    /// No async runtime to issue the request on; the request is now `Failed`
    Unavailable,
}

enum Decision {
    Request(Handle),
    Open(String),
    Unavailable,
    Ignore,
}

/// State shared with spawned request tasks
struct Shared {
    request: watch::Sender<ArtifactRequest>,
    disposed: AtomicBool,
}

impl Shared {
    fn apply(&self, kind: ArtifactKind, outcome: Result<String>) {
        let outcome = outcome.and_then(|url| {
            if url.trim().is_empty() {
                Err(AppError::Protocol(
                    "Service returned an empty download location".to_string(),
                ))
            } else {
                Ok(url)
            }
        });

        if let Err(error) = &outcome {
            log::error!(
                "{} request failed ({}): {}",
                kind,
                error.failure_kind(),
                error
            );
        }

        let applied = self.request.send_if_modified(|request| {
            if self.disposed.load(Ordering::Acquire) {
                return false;
            }
            match &outcome {
                Ok(url) => request.complete(url.clone()),
                Err(error) => request.fail(FailureRecord::from(error)),
            }
        });

        if !applied {
            log::debug!("Discarding {} outcome for a torn-down controller", kind);
        } else if let Ok(url) = &outcome {
            log::info!("{} ready at {}", kind, url);
        }
    }
}

/// Request/result state machine for one artifact kind of one meeting
pub struct ArtifactRequestController {
    kind: ArtifactKind,
    source_link: String,
    shared: Arc<Shared>,
    service: Arc<dyn ProcessingServicePort>,
    opener: Arc<dyn UrlOpenerPort>,
    request_timeout: Duration,
}

impl ArtifactRequestController {
    /// Create an idle controller bound to `source_link`
    pub fn new(
        kind: ArtifactKind,
        source_link: impl Into<String>,
        service: Arc<dyn ProcessingServicePort>,
        opener: Arc<dyn UrlOpenerPort>,
        config: &ProcessingConfig,
    ) -> Self {
        let source_link = source_link.into();
        let (request, _) = watch::channel(ArtifactRequest::new(kind, source_link.clone()));

        Self {
            kind,
            source_link,
            shared: Arc::new(Shared {
                request,
                disposed: AtomicBool::new(false),
            }),
            service,
            opener,
            request_timeout: config.request_timeout(),
        }
    }

    /// Overrides the request timeout (builder pattern)
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn source_link(&self) -> &str {
        &self.source_link
    }

    pub fn state(&self) -> RequestState {
        self.shared.request.borrow().state()
    }

    pub fn label(&self) -> &'static str {
        self.shared.request.borrow().label()
    }

    pub fn result_url(&self) -> Option<String> {
        self.shared.request.borrow().result_url().map(str::to_string)
    }

    pub fn snapshot(&self) -> ArtifactSnapshot {
        self.shared.request.borrow().snapshot()
    }

    /// Receiver notified on every transition
    pub fn subscribe(&self) -> watch::Receiver<ArtifactRequest> {
        self.shared.request.subscribe()
    }

    /// Activate the artifact.
    ///
    /// Ready opens the cached location, Idle/Failed issues one request on the
    /// current Tokio runtime, Requesting is a no-op. Never fails or panics;
    /// failures end up in the request state.
    pub fn activate(&self) -> Activation {
        let mut decision = Decision::Ignore;
        let runtime = Handle::try_current().map_err(|e| {
            AppError::Transport(format!("No async runtime to issue the request on: {}", e))
        });

        self.shared.request.send_if_modified(|request| match request.state() {
            RequestState::Ready => {
                if let Some(url) = request.result_url() {
                    decision = Decision::Open(url.to_string());
                }
                false
            }
            RequestState::Requesting => false,
            RequestState::Idle | RequestState::Failed => {
                if !request.begin_request() {
                    return false;
                }
                match runtime {
                    Ok(handle) => decision = Decision::Request(handle),
                    Err(error) => {
                        log::error!(
                            "{} request failed ({}): {}",
                            self.kind,
                            error.failure_kind(),
                            error
                        );
                        request.fail(FailureRecord::from(&error));
                        decision = Decision::Unavailable;
                    }
                }
                true
            }
        });

        match decision {
            Decision::Open(result_url) => {
                if let Err(e) = self.opener.open_url(&result_url) {
                    log::warn!("Failed to open {} at {}: {}", self.kind, result_url, e);
                }
                Activation::CacheHit { result_url }
            }
            Decision::Ignore => {
                log::debug!("{} request already in flight, ignoring activation", self.kind);
                Activation::InFlight
            }
            Decision::Unavailable => Activation::Unavailable,
            Decision::Request(handle) => Activation::Requested(self.spawn_request(&handle)),
        }
    }

    fn spawn_request(&self, runtime: &Handle) -> JoinHandle<()> {
        let kind = self.kind;
        let source_link = self.source_link.clone();
        let shared = Arc::clone(&self.shared);
        let service = Arc::clone(&self.service);
        let timeout = self.request_timeout;

        log::info!("Requesting {} for {}", kind, source_link);

        runtime.spawn(async move {
            let outcome =
                match tokio::time::timeout(timeout, service.request_artifact(kind, &source_link))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(AppError::Transport(format!(
                        "{} request timed out after {:?}",
                        kind, timeout
                    ))),
                };
            shared.apply(kind, outcome);
        })
    }
}

impl Drop for ArtifactRequestController {
    fn drop(&mut self) {
        // Under the channel lock so an in-flight outcome either lands before
        // teardown or not at all
        self.shared.request.send_if_modified(|_| {
            self.shared.disposed.store(true, Ordering::Release);
            false
        });
    }
}

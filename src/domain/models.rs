/// Domain models for Meeting Artifacts
///
/// These models describe the per-artifact request state machine and are
/// independent of any transport or rendering.
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Label shown while a request is outstanding
pub const PROCESSING_LABEL: &str = "Processing…";
/// Label shown once a result location is cached
pub const DOWNLOAD_LABEL: &str = "Download";
/// Label shown after any failure
pub const FAILED_LABEL: &str = "Failed";

/// Kind of artifact derived from a meeting recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Transcript,
    Summary,
}

/// Static description of how to request one artifact kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub kind: ArtifactKind,
    /// Path on the processing service, appended to the base URL
    pub endpoint: &'static str,
    /// Label shown while idle
    pub idle_label: &'static str,
}

/// One row per artifact kind. New kinds only need a row here and a variant.
pub const DESCRIPTORS: [ArtifactDescriptor; ArtifactKind::COUNT] = [
    ArtifactDescriptor {
        kind: ArtifactKind::Transcript,
        endpoint: "/api/transcript",
        idle_label: "Transcript",
    },
    ArtifactDescriptor {
        kind: ArtifactKind::Summary,
        endpoint: "/api/summary",
        idle_label: "Summary",
    },
];

impl ArtifactKind {
    pub const COUNT: usize = 2;
    pub const ALL: [ArtifactKind; Self::COUNT] = [ArtifactKind::Transcript, ArtifactKind::Summary];

    /// Position of this kind in `ALL` and `DESCRIPTORS`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the descriptor row for this kind
    pub fn descriptor(self) -> &'static ArtifactDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn endpoint(self) -> &'static str {
        self.descriptor().endpoint
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Transcript => write!(f, "transcript"),
            ArtifactKind::Summary => write!(f, "summary"),
        }
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transcript" => Ok(ArtifactKind::Transcript),
            "summary" => Ok(ArtifactKind::Summary),
            other => Err(AppError::InvalidInput(format!(
                "Unknown artifact kind: {}",
                other
            ))),
        }
    }
}

/// Lifecycle state of one artifact request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Idle,
    Requesting,
    Ready,
    Failed,
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Idle => write!(f, "idle"),
            RequestState::Requesting => write!(f, "requesting"),
            RequestState::Ready => write!(f, "ready"),
            RequestState::Failed => write!(f, "failed"),
        }
    }
}

/// Display label for a kind in a given state
pub fn label_for(kind: ArtifactKind, state: RequestState) -> &'static str {
    match state {
        RequestState::Idle => kind.descriptor().idle_label,
        RequestState::Requesting => PROCESSING_LABEL,
        RequestState::Ready => DOWNLOAD_LABEL,
        RequestState::Failed => FAILED_LABEL,
    }
}

/// Failure taxonomy kept for diagnostics only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Protocol,
    ServiceFailure,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Protocol => write!(f, "protocol"),
            FailureKind::ServiceFailure => write!(f, "service_failure"),
        }
    }
}

/// Diagnostic record of the most recent failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureRecord {
    pub kind: FailureKind,
    pub message: String,
    pub occurred_at: i64, // Unix timestamp
}

impl FailureRecord {
    /// Creates a new failure record stamped with the current time
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            occurred_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl From<&AppError> for FailureRecord {
    fn from(error: &AppError) -> Self {
        FailureRecord::new(error.failure_kind(), error.to_string())
    }
}

/// State of one artifact request bound to a meeting recording.
///
/// `result_url` is only ever set while the state is `Ready`; every transition
/// goes through the methods below to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRequest {
    kind: ArtifactKind,
    source_link: String,
    state: RequestState,
    result_url: Option<String>,
    last_failure: Option<FailureRecord>,
}

impl ArtifactRequest {
    /// Creates an idle request with no cached result
    pub fn new(kind: ArtifactKind, source_link: impl Into<String>) -> Self {
        Self {
            kind,
            source_link: source_link.into(),
            state: RequestState::Idle,
            result_url: None,
            last_failure: None,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn endpoint(&self) -> &'static str {
        self.kind.endpoint()
    }

    pub fn source_link(&self) -> &str {
        &self.source_link
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    pub fn last_failure(&self) -> Option<&FailureRecord> {
        self.last_failure.as_ref()
    }

    pub fn label(&self) -> &'static str {
        label_for(self.kind, self.state)
    }

    /// Idle/Failed -> Requesting. Returns false and leaves the state alone otherwise.
    pub fn begin_request(&mut self) -> bool {
        match self.state {
            RequestState::Idle | RequestState::Failed => {
                self.state = RequestState::Requesting;
                self.last_failure = None;
                true
            }
            RequestState::Requesting | RequestState::Ready => false,
        }
    }

    /// Requesting -> Ready. An empty location is treated as a protocol failure.
    pub fn complete(&mut self, result_url: String) -> bool {
        if self.state != RequestState::Requesting {
            return false;
        }
        if result_url.trim().is_empty() {
            return self.fail(FailureRecord::new(
                FailureKind::Protocol,
                "Service returned an empty download location",
            ));
        }
        self.state = RequestState::Ready;
        self.result_url = Some(result_url);
        true
    }

    /// Requesting -> Failed
    pub fn fail(&mut self, failure: FailureRecord) -> bool {
        if self.state != RequestState::Requesting {
            return false;
        }
        self.state = RequestState::Failed;
        self.result_url = None;
        self.last_failure = Some(failure);
        true
    }

    pub fn snapshot(&self) -> ArtifactSnapshot {
        ArtifactSnapshot {
            kind: self.kind,
            state: self.state,
            label: self.label().to_string(),
            result_url: self.result_url.clone(),
            last_failure: self.last_failure.clone(),
        }
    }
}

/// Read-only view of a request, handed to hosts for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactSnapshot {
    pub kind: ArtifactKind,
    pub state: RequestState,
    pub label: String,
    pub result_url: Option<String>,
    pub last_failure: Option<FailureRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requesting(kind: ArtifactKind) -> ArtifactRequest {
        let mut request = ArtifactRequest::new(kind, "https://x/rec1");
        assert!(request.begin_request());
        request
    }

    #[test]
    fn test_descriptor_table() {
        assert_eq!(ArtifactKind::Transcript.endpoint(), "/api/transcript");
        assert_eq!(ArtifactKind::Summary.endpoint(), "/api/summary");
        for (i, kind) in ArtifactKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(kind.descriptor().kind, kind);
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            "transcript".parse::<ArtifactKind>().unwrap(),
            ArtifactKind::Transcript
        );
        assert_eq!(
            " Summary ".parse::<ArtifactKind>().unwrap(),
            ArtifactKind::Summary
        );
        assert!(matches!(
            "minutes".parse::<ArtifactKind>(),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(
            serde_json::to_string(&ArtifactKind::Transcript).unwrap(),
            "\"transcript\""
        );
    }

    #[test]
    fn test_new_request_is_idle() {
        let request = ArtifactRequest::new(ArtifactKind::Summary, "https://x/rec1");
        assert_eq!(request.state(), RequestState::Idle);
        assert_eq!(request.result_url(), None);
        assert_eq!(request.label(), "Summary");
        assert_eq!(request.source_link(), "https://x/rec1");
        assert_eq!(request.endpoint(), "/api/summary");
    }

    #[test]
    fn test_labels_follow_state() {
        for kind in ArtifactKind::ALL {
            assert_eq!(
                label_for(kind, RequestState::Idle),
                kind.descriptor().idle_label
            );
            assert_eq!(label_for(kind, RequestState::Requesting), "Processing…");
            assert_eq!(label_for(kind, RequestState::Ready), "Download");
            assert_eq!(label_for(kind, RequestState::Failed), "Failed");
        }
    }

    #[test]
    fn test_begin_request_is_guarded() {
        let mut request = requesting(ArtifactKind::Transcript);
        assert!(!request.begin_request());
        assert_eq!(request.state(), RequestState::Requesting);
    }

    #[test]
    fn test_complete_caches_location() {
        let mut request = requesting(ArtifactKind::Transcript);
        assert!(request.complete("https://files/t1.txt".to_string()));
        assert_eq!(request.state(), RequestState::Ready);
        assert_eq!(request.result_url(), Some("https://files/t1.txt"));
        assert_eq!(request.label(), "Download");

        // Ready is not re-requested
        assert!(!request.begin_request());
        assert_eq!(request.result_url(), Some("https://files/t1.txt"));
    }

    #[test]
    fn test_empty_location_fails() {
        let mut request = requesting(ArtifactKind::Summary);
        assert!(request.complete("  ".to_string()));
        assert_eq!(request.state(), RequestState::Failed);
        assert_eq!(request.result_url(), None);
        assert_eq!(
            request.last_failure().map(|f| f.kind),
            Some(FailureKind::Protocol)
        );
    }

    #[test]
    fn test_fail_then_retry_clears_record() {
        let mut request = requesting(ArtifactKind::Summary);
        let error = AppError::Transport("status 500".to_string());
        assert!(request.fail(FailureRecord::from(&error)));
        assert_eq!(request.state(), RequestState::Failed);
        assert_eq!(request.label(), "Failed");
        assert_eq!(request.result_url(), None);
        assert_eq!(
            request.last_failure().map(|f| f.kind),
            Some(FailureKind::Transport)
        );

        assert!(request.begin_request());
        assert_eq!(request.state(), RequestState::Requesting);
        assert!(request.last_failure().is_none());
    }

    #[test]
    fn test_outcomes_ignored_outside_requesting() {
        let mut request = ArtifactRequest::new(ArtifactKind::Transcript, "https://x/rec1");
        assert!(!request.complete("https://files/t1.txt".to_string()));
        assert!(!request.fail(FailureRecord::new(FailureKind::Transport, "late")));
        assert_eq!(request.state(), RequestState::Idle);
        assert_eq!(request.result_url(), None);
    }

    #[test]
    fn test_snapshot_mirrors_request() {
        let mut request = requesting(ArtifactKind::Transcript);
        request.complete("https://files/t1.txt".to_string());
        let snapshot = request.snapshot();
        assert_eq!(snapshot.kind, ArtifactKind::Transcript);
        assert_eq!(snapshot.state, RequestState::Ready);
        assert_eq!(snapshot.label, "Download");
        assert_eq!(snapshot.result_url.as_deref(), Some("https://files/t1.txt"));
    }
}

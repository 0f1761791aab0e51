/// Domain layer - core business models
///
/// These models are platform-agnostic and represent the artifact request state machine.
pub mod models;

pub use models::{
    label_for, ArtifactDescriptor, ArtifactKind, ArtifactRequest, ArtifactSnapshot, FailureKind,
    FailureRecord, RequestState, DESCRIPTORS,
};

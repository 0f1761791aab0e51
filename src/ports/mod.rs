/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod opener;
pub mod processing;

#[cfg(test)]
pub mod mocks;

pub use opener::UrlOpenerPort;
pub use processing::{ArtifactPayload, ProcessingServicePort};

/// Adapters - platform-specific implementations
///
/// These modules implement the port traits for specific platforms and services.
pub mod opener;
pub mod services;

pub use opener::SystemUrlOpener;
pub use services::HttpProcessingService;

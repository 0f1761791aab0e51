//! External service adapters
//!
//! This module contains adapters for external APIs including:
//! - The meeting processing server (transcripts and summaries)

pub mod processing;

pub use processing::HttpProcessingService;

//! Per-page download orchestration and filename handling.
//!
//! # Features
//!
//! - One-page pipeline: metadata fetch, media download, streaming save
//! - Filename sanitization for endpoint-supplied titles
//! - Page-scoped failures: a bad page never aborts the batch

mod engine;
mod error;
mod filename;

pub use engine::{DownloadEngine, PageOutcome, RunStats};
pub use error::PageError;
pub use filename::sanitize_title;

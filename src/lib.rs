//! Vidfetch Core Library
//!
//! Fetches paginated episode metadata from a GraphQL-style endpoint and
//! downloads the referenced media files, rotating request identity to stay
//! ahead of blocking.
//!
//! # Architecture
//!
//! - [`identity`] - user-agent pool and per-request header synthesis
//! - [`http`] - resilient HTTP client with bounded retry and streaming saves
//! - [`fetch`] - page fetcher: payload build, block handling, schema validation
//! - [`download`] - per-page orchestration: media download and persistence

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod fetch;
pub mod http;
pub mod identity;
#[cfg(test)]
pub mod test_support;

// Re-export commonly used types
pub use download::{DownloadEngine, PageError, PageOutcome, RunStats, sanitize_title};
pub use fetch::{
    EpisodeQuery, EpisodeResponse, FetchOutcome, NoDataReason, PageFetcher, ValidatedEpisode,
    ValidationFailure,
};
pub use http::{HttpClient, HttpError, RetryDecision, RetryPolicy, save_body};
pub use identity::{
    BrowserUaGenerator, HeaderSet, PoolError, SourceError, UserAgentPool, UserAgentSource,
};

//! Resilient HTTP transport.
//!
//! # Features
//!
//! - One shared session per run: connection pool, cookies, gzip
//! - Bounded retry with exponential backoff for transient 5xx statuses
//! - Streaming response persistence with partial-file cleanup
//!
//! Note: error handling uses explicit `Result<T, HttpError>` signatures;
//! do NOT define module-local `Result` aliases.

mod client;
mod constants;
mod error;
mod retry;

pub use client::{HttpClient, save_body};
pub use constants::{CONNECT_TIMEOUT_SECS, MEDIA_TIMEOUT_SECS, PAGE_TIMEOUT_SECS};
pub use error::HttpError;
pub use retry::{MAX_ATTEMPTS, RETRYABLE_STATUSES, RetryDecision, RetryPolicy, is_retryable_status};

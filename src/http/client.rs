//! HTTP client wrapper with bounded retry and streaming saves.
//!
//! [`HttpClient`] wraps one `reqwest` session (cookie store, gzip, connect
//! timeout) behind the retry policy. Responses come back with their status
//! intact once the retry budget settles; callers interpret status codes,
//! so a 403 block signal is not an error at this layer.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

use super::constants::{CONNECT_TIMEOUT_SECS, MEDIA_TIMEOUT_SECS, PAGE_TIMEOUT_SECS};
use super::error::HttpError;
use super::retry::{RetryDecision, RetryPolicy};
use crate::identity::HeaderSet;

/// HTTP client for metadata requests and media downloads.
///
/// Built once per run and reused, so every page shares one connection pool
/// and one cookie store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
    page_timeout: Duration,
    media_timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default retry policy and timeouts.
    ///
    /// Session configuration:
    /// - Connect timeout: 5 seconds
    /// - Gzip decompression: enabled
    /// - Cookie store: enabled, so session cookies persist across pages
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(RetryPolicy::default())
    }

    /// Creates a client with an explicit retry policy.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn with_policy(policy: RetryPolicy) -> Self {
        Self::with_timeouts(
            policy,
            Duration::from_secs(PAGE_TIMEOUT_SECS),
            Duration::from_secs(MEDIA_TIMEOUT_SECS),
        )
    }

    /// Creates a client with explicit per-request timeouts. Tests use
    /// millisecond values here.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(policy: RetryPolicy, page_timeout: Duration, media_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .gzip(true)
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            policy,
            page_timeout,
            media_timeout,
        }
    }

    /// POSTs a JSON payload with the given identity headers.
    ///
    /// Transient server statuses {500, 502, 503, 504} are retried per the
    /// policy; the final response is returned whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Timeout`] or [`HttpError::Network`] when no
    /// response arrives at all.
    pub async fn post_json<T: Serialize>(
        &self,
        url: &str,
        payload: &T,
        headers: &HeaderSet,
    ) -> Result<Response, HttpError> {
        self.execute(url, self.page_timeout, || {
            headers.apply(self.client.post(url)).json(payload)
        })
        .await
    }

    /// GETs a media URL with the same retry behavior as [`Self::post_json`].
    ///
    /// No identity headers are attached; media hosts key off the session
    /// cookies already collected.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Timeout`] or [`HttpError::Network`] when no
    /// response arrives at all.
    pub async fn get_media(&self, url: &str) -> Result<Response, HttpError> {
        self.execute(url, self.media_timeout, || self.client.get(url)).await
    }

    /// Sends a request built by `build`, retrying the transient 5xx subset
    /// until the policy gives up.
    async fn execute(
        &self,
        url: &str,
        timeout: Duration,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, HttpError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            debug!(url, attempt, "sending request");
            let response = build().timeout(timeout).send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::timeout(url)
                } else {
                    HttpError::network(url, e)
                }
            })?;

            let status = response.status().as_u16();
            match self.policy.should_retry(status, attempt) {
                RetryDecision::Retry { delay, attempt: next } => {
                    warn!(
                        url,
                        status,
                        next_attempt = next,
                        delay_ms = delay.as_millis(),
                        "transient server error; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp { .. } => return Ok(response),
            }
        }
    }
}

/// Streams a response body to `path`, removing the file again when the
/// stream or a write fails partway.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`HttpError::Io`] for file system failures and
/// [`HttpError::Network`] when the body stream breaks.
pub async fn save_body(response: Response, path: &Path) -> Result<u64, HttpError> {
    let url = response.url().to_string();
    let mut file = File::create(path)
        .await
        .map_err(|e| HttpError::io(path, e))?;

    match stream_to_file(&mut file, response, &url, path).await {
        Ok(bytes) => {
            info!(path = %path.display(), bytes, "file saved");
            Ok(bytes)
        }
        Err(error) => {
            debug!(path = %path.display(), "removing partial file after failed save");
            let _ = tokio::fs::remove_file(path).await;
            Err(error)
        }
    }
}

/// Streams the response body into an open file via a buffered writer.
async fn stream_to_file(
    file: &mut File,
    response: Response,
    url: &str,
    path: &Path,
) -> Result<u64, HttpError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written = 0u64;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| HttpError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| HttpError::io(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| HttpError::io(path, e))?;
    Ok(bytes_written)
}

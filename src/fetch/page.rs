//! Page fetcher: one POST round-trip from payload to validated episode.
//!
//! Block signals, undecodable bodies, and shape failures are all absorbed
//! here as "no data" outcomes; only transport failures and unexpected
//! statuses escape as errors.

use reqwest::StatusCode;
use tracing::{debug, error, warn};

use super::schema::{EpisodeQuery, EpisodeResponse, ValidatedEpisode, ValidationFailure};
use crate::http::{HttpClient, HttpError};
use crate::identity::{HeaderSet, UserAgentPool};

/// Outcome of fetching one page's metadata.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A validated episode ready for download.
    Episode(ValidatedEpisode),
    /// The page yielded no usable data; nothing should be downloaded.
    NoData(NoDataReason),
}

/// Why a page produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoDataReason {
    /// The endpoint answered 403; the user-agent pool was rotated.
    Blocked,
    /// The body could not be decoded as the expected JSON shape.
    Undecodable,
    /// The decoded body failed shape validation.
    Invalid(ValidationFailure),
}

/// Fetches per-page metadata from one endpoint.
///
/// Holds the HTTP session and the user-agent pool for the whole run.
/// Fetching takes `&mut self` because a block signal rotates the pool.
#[derive(Debug)]
pub struct PageFetcher {
    client: HttpClient,
    pool: UserAgentPool,
    endpoint: String,
}

impl PageFetcher {
    /// Creates a fetcher for `endpoint` with a default client.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, pool: UserAgentPool) -> Self {
        Self::with_client(endpoint, pool, HttpClient::new())
    }

    /// Creates a fetcher with an explicit client. Tests use this to point
    /// the endpoint at a local server with fast retry delays.
    #[must_use]
    pub fn with_client(
        endpoint: impl Into<String>,
        pool: UserAgentPool,
        client: HttpClient,
    ) -> Self {
        Self {
            client,
            pool,
            endpoint: endpoint.into(),
        }
    }

    /// The shared HTTP client, for media downloads over the same session.
    #[must_use]
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Read access to the user-agent pool.
    #[must_use]
    pub fn pool(&self) -> &UserAgentPool {
        &self.pool
    }

    /// Fetches and validates the metadata for `page`.
    ///
    /// A 403 answer rotates the user-agent pool and yields
    /// [`NoDataReason::Blocked`]. Undecodable bodies and shape failures are
    /// logged here and yield their own no-data reasons.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for network failures, timeouts, and non-2xx
    /// statuses other than 403.
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&mut self, page: u32) -> Result<FetchOutcome, HttpError> {
        let payload = EpisodeQuery::new(page);
        let headers = HeaderSet::synthesize(&mut self.pool, &self.endpoint);
        let response = self
            .client
            .post_json(&self.endpoint, &payload, &headers)
            .await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            warn!(page, "received 403; rotating the user agent pool");
            self.pool.refresh();
            return Ok(FetchOutcome::NoData(NoDataReason::Blocked));
        }
        if !status.is_success() {
            return Err(HttpError::status(&self.endpoint, status.as_u16()));
        }

        let decoded = match response.json::<EpisodeResponse>().await {
            Ok(decoded) => decoded,
            Err(error) => {
                error!(page, %error, "response body was not decodable");
                return Ok(FetchOutcome::NoData(NoDataReason::Undecodable));
            }
        };

        match decoded.into_episode() {
            Ok(episode) => {
                debug!(page, media_url = %episode.photo_url, "page metadata validated");
                Ok(FetchOutcome::Episode(episode))
            }
            Err(failure) => {
                error!(page, %failure, "page data failed validation");
                Ok(FetchOutcome::NoData(NoDataReason::Invalid(failure)))
            }
        }
    }
}

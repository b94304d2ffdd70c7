//! User-agent pool with periodic refresh and block-triggered rotation.
//!
//! The pool holds up to [`POOL_CAP`] plausible browser user-agent strings
//! and is replaced wholesale on refresh: a fresh batch from the
//! [`UserAgentSource`] is merged with the static fallback list,
//! deduplicated, shuffled, and truncated. Draws are uniformly random, and a
//! draw first refreshes the pool when it is older than [`REFRESH_INTERVAL`].

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{info, warn};

/// Maximum number of user agents kept in the pool.
pub const POOL_CAP: usize = 100;

/// Number of user agents requested from the source per refresh.
const GENERATOR_BATCH: usize = 100;

/// Pool age after which the next draw triggers a refresh.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(3600);

/// Static fallback user agents, merged into every refresh and used alone
/// when the dynamic source fails.
pub const FALLBACK_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    // Firefox on Linux
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    // Edge on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.51",
];

/// Error from a [`UserAgentSource`] batch request.
#[derive(Debug, Error)]
#[error("user agent source unavailable: {reason}")]
pub struct SourceError {
    reason: String,
}

impl SourceError {
    /// Creates a source error with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors from pool construction.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Neither the dynamic source nor the fallback list produced any agents.
    #[error("no user agents available from the source or the fallback list")]
    Exhausted,
}

/// Source of fresh user-agent strings.
///
/// The built-in [`BrowserUaGenerator`] synthesizes strings locally; tests
/// inject failing or fixed-output sources through this seam.
pub trait UserAgentSource {
    /// Produces up to `count` fresh user-agent strings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source cannot produce a batch.
    fn batch(&mut self, count: usize) -> Result<Vec<String>, SourceError>;
}

// ==================== Built-in Generator ====================

const CHROME_PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
];

const FIREFOX_PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10.15",
    "X11; Linux x86_64",
];

const SAFARI_VERSIONS: &[&str] = &["16.6", "17.2", "17.3", "17.4"];

/// Synthesizes plausible user-agent strings for recent Chrome, Firefox,
/// Safari, and Edge releases on common platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserUaGenerator;

impl UserAgentSource for BrowserUaGenerator {
    fn batch(&mut self, count: usize) -> Result<Vec<String>, SourceError> {
        let mut rng = rand::thread_rng();
        Ok((0..count).map(|_| random_user_agent(&mut rng)).collect())
    }
}

fn random_user_agent(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..4u8) {
        0 => {
            let platform = CHROME_PLATFORMS[rng.gen_range(0..CHROME_PLATFORMS.len())];
            let major = rng.gen_range(118..=125);
            format!(
                "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36"
            )
        }
        1 => {
            let platform = FIREFOX_PLATFORMS[rng.gen_range(0..FIREFOX_PLATFORMS.len())];
            let major = rng.gen_range(115..=126);
            format!("Mozilla/5.0 ({platform}; rv:{major}.0) Gecko/20100101 Firefox/{major}.0")
        }
        2 => {
            let version = SAFARI_VERSIONS[rng.gen_range(0..SAFARI_VERSIONS.len())];
            format!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{version} Safari/605.1.15"
            )
        }
        _ => {
            let major = rng.gen_range(118..=125);
            let build = rng.gen_range(2000..=2600);
            format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36 Edg/{major}.0.{build}.64"
            )
        }
    }
}

// ==================== Pool ====================

/// Rotating pool of user-agent strings.
///
/// Owned by the page fetcher for the lifetime of a run. Draws take
/// `&mut self` because a draw against a stale pool refreshes it first.
pub struct UserAgentPool {
    agents: Vec<String>,
    fallback: Vec<String>,
    source: Box<dyn UserAgentSource + Send>,
    last_refresh: Option<Instant>,
    refresh_interval: Duration,
}

impl std::fmt::Debug for UserAgentPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAgentPool")
            .field("agents", &self.agents.len())
            .field("last_refresh", &self.last_refresh)
            .finish_non_exhaustive()
    }
}

impl UserAgentPool {
    /// Creates a pool backed by `source` and the built-in fallback list,
    /// performing the initial refresh.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] when the source fails and the
    /// fallback list is empty. With the built-in fallback this cannot
    /// happen.
    pub fn new(source: impl UserAgentSource + Send + 'static) -> Result<Self, PoolError> {
        let fallback = FALLBACK_USER_AGENTS
            .iter()
            .map(|agent| (*agent).to_string())
            .collect();
        Self::with_fallback(source, fallback)
    }

    /// Creates a pool with an explicit fallback list.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] when neither the source nor the
    /// fallback list yields any agents.
    pub fn with_fallback(
        source: impl UserAgentSource + Send + 'static,
        fallback: Vec<String>,
    ) -> Result<Self, PoolError> {
        let mut pool = Self {
            agents: Vec::new(),
            fallback,
            source: Box::new(source),
            last_refresh: None,
            refresh_interval: REFRESH_INTERVAL,
        };
        pool.refresh();
        if pool.agents.is_empty() {
            return Err(PoolError::Exhausted);
        }
        Ok(pool)
    }

    /// Replaces the pool with a fresh batch: source output merged with the
    /// fallback list, deduplicated, shuffled, truncated to [`POOL_CAP`].
    ///
    /// A source failure keeps the current pool and its age, so the next
    /// stale draw tries again; the fallback list seeds the pool only when
    /// it is empty.
    pub fn refresh(&mut self) {
        match self.source.batch(GENERATOR_BATCH) {
            Ok(fresh) => {
                let mut combined: Vec<String> = fresh
                    .into_iter()
                    .chain(self.fallback.iter().cloned())
                    .collect::<HashSet<_>>()
                    .into_iter()
                    .collect();
                if combined.is_empty() {
                    warn!("user agent source produced no agents");
                    return;
                }
                combined.shuffle(&mut rand::thread_rng());
                combined.truncate(POOL_CAP);
                self.agents = combined;
                self.last_refresh = Some(Instant::now());
                info!(agents = self.agents.len(), "user agent pool refreshed");
            }
            Err(error) => {
                warn!(%error, "user agent refresh failed");
                if self.agents.is_empty() {
                    self.agents = self.fallback.clone();
                }
            }
        }
    }

    /// Returns a uniformly random agent, refreshing first when the pool is
    /// older than its refresh interval.
    ///
    /// The pool is never empty after construction, so a draw always
    /// succeeds.
    pub fn next_agent(&mut self) -> &str {
        if self.is_stale() {
            self.refresh();
        }
        let index = rand::thread_rng().gen_range(0..self.agents.len());
        &self.agents[index]
    }

    fn is_stale(&self) -> bool {
        self.last_refresh
            .is_none_or(|at| at.elapsed() > self.refresh_interval)
    }

    /// Current number of agents in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// True when the pool holds no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Read-only view of the current agents, for diagnostics and tests.
    #[must_use]
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    #[cfg(test)]
    pub(crate) fn set_refresh_interval(&mut self, interval: Duration) {
        self.refresh_interval = interval;
    }
}

//! Per-request header synthesis.
//!
//! Every outbound metadata request carries a freshly drawn browser-like
//! header set. Nothing is memoized between calls; two consecutive requests
//! are free to present entirely different identities.

use rand::Rng;
use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, DNT, REFERER, USER_AGENT};

use super::pool::UserAgentPool;

const ACCEPT_VARIANTS: [&str; 2] = [
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
];

const ACCEPT_LANGUAGE_VARIANTS: [&str; 2] = ["en-US,en;q=0.9", "zh-CN,zh;q=0.9,en;q=0.8"];

const SEARCH_REFERERS: [&str; 2] = ["https://www.google.com/", "https://www.bing.com/"];

/// One request's worth of randomized browser-like headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    /// User agent drawn from the pool.
    pub user_agent: String,
    /// One of two realistic Accept lines.
    pub accept: &'static str,
    /// One of two realistic Accept-Language lines.
    pub accept_language: &'static str,
    /// A search engine or the target origin itself.
    pub referer: String,
    /// Do-Not-Track flag, "0" or "1".
    pub dnt: &'static str,
}

impl HeaderSet {
    /// Draws a fresh header set: a pool agent plus uniformly chosen Accept,
    /// Accept-Language, Referer, and DNT values.
    ///
    /// Drawing may refresh the pool when it has grown stale.
    pub fn synthesize(pool: &mut UserAgentPool, target_origin: &str) -> Self {
        let user_agent = pool.next_agent().to_string();
        let mut rng = rand::thread_rng();
        let accept = ACCEPT_VARIANTS[rng.gen_range(0..ACCEPT_VARIANTS.len())];
        let accept_language = ACCEPT_LANGUAGE_VARIANTS[rng.gen_range(0..ACCEPT_LANGUAGE_VARIANTS.len())];
        let referer = match rng.gen_range(0..3u8) {
            0 => SEARCH_REFERERS[0].to_string(),
            1 => SEARCH_REFERERS[1].to_string(),
            _ => target_origin.to_string(),
        };
        let dnt = if rng.gen_range(0..=1) == 1 { "1" } else { "0" };
        Self {
            user_agent,
            accept,
            accept_language,
            referer,
            dnt,
        }
    }

    /// Attaches the header set to an outgoing request.
    #[must_use]
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, self.accept)
            .header(ACCEPT_LANGUAGE, self.accept_language)
            .header(REFERER, &self.referer)
            .header(DNT, self.dnt)
    }
}

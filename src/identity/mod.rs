//! Request identity: user-agent pool and per-request header synthesis.
//!
//! Every metadata request presents a freshly randomized browser-like
//! identity. The pool refreshes itself on a timer and rotates wholesale
//! when the endpoint starts answering 403.

mod headers;
mod pool;

pub use headers::HeaderSet;
pub use pool::{
    BrowserUaGenerator, FALLBACK_USER_AGENTS, POOL_CAP, PoolError, REFRESH_INTERVAL, SourceError,
    UserAgentPool, UserAgentSource,
};

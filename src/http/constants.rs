//! Timeout configuration for outbound requests.

/// Connect timeout for all outbound requests (seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Total timeout for metadata page requests (seconds).
pub const PAGE_TIMEOUT_SECS: u64 = 15;

/// Total timeout for media downloads (seconds).
pub const MEDIA_TIMEOUT_SECS: u64 = 30;

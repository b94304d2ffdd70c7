//! Socket availability guard for network-bound tests.
//!
//! Sandboxed environments sometimes deny binding local sockets. Tests that
//! need a mock server call [`start_mock_server_or_skip`] and return early
//! when the environment cannot support them, unless
//! `VIDFETCH_REQUIRE_SOCKET_TESTS` insists they must run.

use std::net::TcpListener;

use wiremock::MockServer;

/// True when the environment demands socket-bound tests actually run.
#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var("VIDFETCH_REQUIRE_SOCKET_TESTS")
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Checks whether a local socket can be bound.
///
/// Returns true when the test should be skipped. Panics instead when
/// `VIDFETCH_REQUIRE_SOCKET_TESTS` is set, so CI cannot silently skip.
///
/// # Panics
///
/// Panics when binding fails and socket tests are required.
#[must_use]
#[track_caller]
pub fn should_skip_socket_bound_test() -> bool {
    match TcpListener::bind("127.0.0.1:0") {
        Ok(_) => false,
        Err(error) => {
            assert!(
                !socket_tests_required(),
                "socket-bound test cannot run: {error}"
            );
            eprintln!("skipping socket-bound test: {error}");
            true
        }
    }
}

/// Starts a mock server, or returns `None` when sockets are unavailable
/// and the test should skip itself.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        return None;
    }
    Some(MockServer::start().await)
}

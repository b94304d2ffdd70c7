//! End-to-end pipeline tests over a local mock endpoint.
//!
//! Each test stands up a wiremock server playing both the metadata
//! endpoint and the media host, then drives the engine exactly the way the
//! binary does: one page at a time over one shared session.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::TempDir;
use vidfetch_core::{
    BrowserUaGenerator, DownloadEngine, HttpClient, NoDataReason, PageFetcher, PageOutcome,
    RetryPolicy, RunStats, UserAgentPool,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use support::socket_guard::start_mock_server_or_skip;

fn episode_body(media_url: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "visionTubeEpisode": {
                "photo": { "photoUrl": media_url },
                "tags": [
                    { "name": "drama" },
                    { "name": "hd" },
                    { "name": title }
                ]
            }
        }
    })
}

fn fast_client() -> HttpClient {
    HttpClient::with_policy(RetryPolicy::new(
        3,
        Duration::from_millis(10),
        Duration::from_millis(40),
        2.0,
    ))
}

fn engine_for(mock_server: &MockServer, output_dir: &std::path::Path) -> DownloadEngine {
    let pool = UserAgentPool::new(BrowserUaGenerator).expect("pool construction");
    let fetcher = PageFetcher::with_client(
        format!("{}/seasons/demo", mock_server.uri()),
        pool,
        fast_client(),
    );
    DownloadEngine::new(fetcher, output_dir)
}

/// Fails the first `fail_count` requests with the given status, then
/// answers 200 with the configured body.
struct FlakyResponder {
    request_count: Arc<AtomicUsize>,
    fail_count: usize,
    fail_status: u16,
    success_body: serde_json::Value,
}

impl Respond for FlakyResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.request_count.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_count {
            ResponseTemplate::new(self.fail_status)
        } else {
            ResponseTemplate::new(200).set_body_json(self.success_body.clone())
        }
    }
}

// ==================== Happy Path ====================

#[tokio::test]
async fn processes_page_end_to_end_and_writes_one_file() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let media_url = format!("{}/media/ep7.mp4", mock_server.uri());
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(episode_body(&media_url, "Seven Cities")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/ep7.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"video bytes".as_slice()))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());

    let outcome = engine.process(7).await;
    let PageOutcome::Saved { path: saved } = outcome else {
        panic!("expected Saved, got: {outcome:?}");
    };
    assert_eq!(
        saved.file_name().and_then(|n| n.to_str()),
        Some("Seven Cities_7.mp4")
    );
    assert_eq!(std::fs::read(&saved).expect("saved file"), b"video bytes");

    let entries = std::fs::read_dir(temp_dir.path()).expect("read dir").count();
    assert_eq!(entries, 1, "exactly one file should be written");
}

#[tokio::test]
async fn title_is_sanitized_in_the_saved_filename() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let media_url = format!("{}/media/ep3.mp4", mock_server.uri());
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(episode_body(&media_url, "My:Movie*Title?")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/ep3.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".as_slice()))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());

    let PageOutcome::Saved { path: saved } = engine.process(3).await else {
        panic!("expected Saved");
    };
    assert_eq!(
        saved.file_name().and_then(|n| n.to_str()),
        Some("MyMovieTitle_3.mp4")
    );
}

// ==================== No-Data Pages ====================

#[tokio::test]
async fn blocked_page_writes_nothing() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());

    let outcome = engine.process(4).await;
    assert!(matches!(
        outcome,
        PageOutcome::NoData {
            reason: NoDataReason::Blocked
        }
    ));
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).expect("read dir").count(),
        0,
        "a blocked page must write nothing"
    );
}

#[tokio::test]
async fn malformed_payload_writes_nothing() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());

    let outcome = engine.process(4).await;
    assert!(matches!(
        outcome,
        PageOutcome::NoData {
            reason: NoDataReason::Invalid(_)
        }
    ));
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).expect("read dir").count(),
        0
    );
}

// ==================== Transient Server Errors ====================

#[tokio::test]
async fn transient_503_recovers_transparently() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let media_url = format!("{}/media/ep5.mp4", mock_server.uri());
    let request_count = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .respond_with(FlakyResponder {
            request_count: Arc::clone(&request_count),
            fail_count: 1,
            fail_status: 503,
            success_body: episode_body(&media_url, "Recovered"),
        })
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/ep5.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".as_slice()))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());

    let outcome = engine.process(5).await;
    assert!(matches!(outcome, PageOutcome::Saved { .. }));
    assert_eq!(request_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn persistent_500_fails_page_after_three_attempts() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let request_count = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .respond_with(FlakyResponder {
            request_count: Arc::clone(&request_count),
            fail_count: usize::MAX,
            fail_status: 500,
            success_body: serde_json::json!({}),
        })
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());

    let outcome = engine.process(5).await;
    assert!(matches!(outcome, PageOutcome::Failed(_)));
    assert_eq!(request_count.load(Ordering::SeqCst), 3);
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).expect("read dir").count(),
        0
    );
}

// ==================== Batch Continuity ====================

#[tokio::test]
async fn failed_page_does_not_stop_the_next_one() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let good_media = format!("{}/media/ep2.mp4", mock_server.uri());
    let bad_media = format!("{}/media/ep1.mp4", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .and(wiremock::matchers::body_partial_json(
            serde_json::json!({"variables": {"episodeNumber": 1}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(episode_body(&bad_media, "Broken")))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/seasons/demo"))
        .and(wiremock::matchers::body_partial_json(
            serde_json::json!({"variables": {"episodeNumber": 2}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(episode_body(&good_media, "Working")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/ep1.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/ep2.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".as_slice()))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("temp dir");
    let mut engine = engine_for(&mock_server, temp_dir.path());
    let mut stats = RunStats::default();

    for page in 1..=2 {
        let outcome = engine.process(page).await;
        stats.record(&outcome);
    }

    assert_eq!(stats.pages, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.saved, 1);
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).expect("read dir").count(),
        1
    );
}

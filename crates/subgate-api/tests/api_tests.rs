//! API integration tests.
//!
//! Drive the router with in-memory collaborators; no external processes or
//! network access are involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use subgate_api::{create_router, ApiConfig, AppState};
use subgate_media::{MediaError, MediaResult, MetadataProvider, SubtitleFetcher};
use subgate_models::{VideoMetadata, VideoReference};

/// Metadata document from the end-to-end scenario.
const METADATA_DOC: &str = r#"{"title":"T","subtitles":{"en":[{"ext":"vtt","url":"http://x/en.vtt"}]},"automatic_captions":{},"language":"en"}"#;

const SAMPLE_VTT: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nhello there\n\n00:00:03.000 --> 00:00:05.000\nhello there\ngeneral kenobi\n";

/// What the fake provider answers with.
enum ProviderBehavior {
    Metadata(&'static str),
    Subtitle(&'static str),
    Timeout,
    NoSubtitle,
}

/// Counting in-memory metadata provider.
struct FakeProvider {
    calls: AtomicUsize,
    behavior: ProviderBehavior,
}

impl FakeProvider {
    fn new(behavior: ProviderBehavior) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            behavior,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for FakeProvider {
    async fn fetch_metadata(&self, _video: &VideoReference) -> MediaResult<VideoMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            ProviderBehavior::Metadata(doc) => Ok(serde_json::from_str(doc).unwrap()),
            ProviderBehavior::Timeout => Err(MediaError::Timeout(30)),
            _ => Err(MediaError::provider("unexpected metadata call")),
        }
    }

    async fn fetch_subtitle(
        &self,
        _video: &VideoReference,
        lang: &str,
        _format: &str,
    ) -> MediaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            ProviderBehavior::Subtitle(vtt) => Ok(vtt.to_string()),
            ProviderBehavior::Timeout => Err(MediaError::Timeout(30)),
            ProviderBehavior::NoSubtitle => Err(MediaError::not_found(format!(
                "no vtt subtitle produced for language {}: no diagnostic",
                lang
            ))),
            _ => Err(MediaError::provider("unexpected subtitle call")),
        }
    }
}

/// Counting in-memory subtitle fetcher.
struct FakeFetcher {
    calls: AtomicUsize,
    body: Option<&'static str>,
}

impl FakeFetcher {
    fn new(body: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            body,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubtitleFetcher for FakeFetcher {
    async fn fetch(&self, _url: &str) -> MediaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.body {
            Some(body) => Ok(body.to_string()),
            None => Err(MediaError::fetch("upstream returned 404 Not Found")),
        }
    }
}

fn test_router(provider: Arc<FakeProvider>, fetcher: Arc<FakeFetcher>) -> Router {
    let state = AppState::with_collaborators(ApiConfig::default(), provider, fetcher);
    create_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(
        FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC)),
        FakeFetcher::new(None),
    );

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_subtitles_end_to_end() {
    let provider = FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC));
    let app = test_router(Arc::clone(&provider), FakeFetcher::new(None));

    let (status, body) = get(app, "/subtitles?url=abc123def45").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "T");

    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["lang"], "en");
    assert_eq!(tracks[0]["url"], "http://x/en.vtt");
    assert_eq!(tracks[0]["ext"], "vtt");
    assert_eq!(tracks[0]["type"], "manual");

    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_subtitles_zero_tracks_is_success() {
    let provider = FakeProvider::new(ProviderBehavior::Metadata(
        r#"{"title":"No captions here","subtitles":{},"automatic_captions":{}}"#,
    ));
    let app = test_router(provider, FakeFetcher::new(None));

    let (status, body) = get(app, "/subtitles?url=abc123def45").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "No captions here");
    assert!(body["tracks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_subtitles_missing_url_is_rejected_before_provider() {
    let provider = FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC));
    let app = test_router(Arc::clone(&provider), FakeFetcher::new(None));

    let (status, body) = get(app, "/subtitles").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("url"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_subtitles_provider_timeout_is_terminal() {
    let provider = FakeProvider::new(ProviderBehavior::Timeout);
    let app = test_router(Arc::clone(&provider), FakeFetcher::new(None));

    let (status, body) = get(app, "/subtitles?url=abc123def45").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("timed out"));

    // No retry: the collaborator was invoked exactly once
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_download_as_transcript() {
    let provider = FakeProvider::new(ProviderBehavior::Subtitle(SAMPLE_VTT));
    let app = test_router(Arc::clone(&provider), FakeFetcher::new(None));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download?url=abc123def45&lang=en&format=txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"subtitles.en.txt\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(body, "[00:01] hello there\n[00:03] general kenobi");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_download_raw_vtt() {
    let provider = FakeProvider::new(ProviderBehavior::Subtitle(SAMPLE_VTT));
    let app = test_router(provider, FakeFetcher::new(None));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download?url=abc123def45")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), SAMPLE_VTT);
}

#[tokio::test]
async fn test_download_rejects_unknown_format() {
    let provider = FakeProvider::new(ProviderBehavior::Subtitle(SAMPLE_VTT));
    let app = test_router(Arc::clone(&provider), FakeFetcher::new(None));

    let (status, body) = get(app, "/download?url=abc123def45&format=srt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("format"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_download_missing_url_is_rejected_before_provider() {
    let provider = FakeProvider::new(ProviderBehavior::Subtitle(SAMPLE_VTT));
    let app = test_router(Arc::clone(&provider), FakeFetcher::new(None));

    let (status, body) = get(app, "/download?lang=en&format=txt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("url"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_download_missing_subtitle_is_404() {
    let provider = FakeProvider::new(ProviderBehavior::NoSubtitle);
    let app = test_router(provider, FakeFetcher::new(None));

    let (status, body) = get(app, "/download?url=abc123def45&lang=xx").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("xx"));
}

#[tokio::test]
async fn test_proxy_strips_when_txt_requested() {
    let fetcher = FakeFetcher::new(Some(SAMPLE_VTT));
    let app = test_router(
        FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC)),
        Arc::clone(&fetcher),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/proxy?url=http://x/en.vtt&format=txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(bytes.to_vec()).unwrap(),
        "hello there\nhello there\ngeneral kenobi"
    );
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_proxy_raw_passthrough() {
    let fetcher = FakeFetcher::new(Some(SAMPLE_VTT));
    let app = test_router(
        FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC)),
        fetcher,
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/proxy?url=http://x/en.vtt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), SAMPLE_VTT);
}

#[tokio::test]
async fn test_proxy_missing_url_is_rejected_before_fetch() {
    let fetcher = FakeFetcher::new(Some(SAMPLE_VTT));
    let app = test_router(
        FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC)),
        Arc::clone(&fetcher),
    );

    let (status, body) = get(app, "/proxy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("url"));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_proxy_fetch_failure_is_500() {
    let fetcher = FakeFetcher::new(None);
    let app = test_router(
        FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC)),
        fetcher,
    );

    let (status, body) = get(app, "/proxy?url=http://x/missing.vtt").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Fetch failed"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_router(
        FakeProvider::new(ProviderBehavior::Metadata(METADATA_DOC)),
        FakeFetcher::new(None),
    );

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/subtitles")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

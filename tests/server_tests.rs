// Tests for the relay server wiring: the credential gate must refuse a
// connection before any recognition stream is opened.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use speech_relay::recognition::{
    RecognitionConfig, RecognitionEngine, RecognitionError, RecognitionStream,
};
use speech_relay::{create_router, AppState, CredentialGate};

/// Engine that only counts how often a stream was requested.
#[derive(Default)]
struct CountingEngine {
    opened: AtomicUsize,
}

#[async_trait::async_trait]
impl RecognitionEngine for CountingEngine {
    async fn open_stream(
        &self,
        _config: &RecognitionConfig,
    ) -> Result<RecognitionStream, RecognitionError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Err(RecognitionError::Transport("not wired in tests".to_string()))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn test_state(engine: Arc<CountingEngine>) -> AppState {
    AppState::new(
        // No key configured: the gate refuses every attempt.
        Arc::new(CredentialGate::new(None).unwrap()),
        engine,
        Arc::new(RecognitionConfig::default()),
        None,
    )
}

fn upgrade_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", "localhost")
        .header("connection", "upgrade")
        .header("upgrade", "websocket")
        .header("sec-websocket-version", "13")
        .header("sec-websocket-key", "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let engine = Arc::new(CountingEngine::default());
    let router = create_router(test_state(engine), None);

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn connect_without_token_is_refused_before_engine() {
    let engine = Arc::new(CountingEngine::default());
    let router = create_router(test_state(engine.clone()), None);

    let response = router.oneshot(upgrade_request("/v1/stream")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(engine.opened.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn connect_with_unverifiable_token_is_refused_before_engine() {
    let engine = Arc::new(CountingEngine::default());
    let router = create_router(test_state(engine.clone()), None);

    let response = router
        .oneshot(upgrade_request("/v1/stream?token=not-a-jwt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(engine.opened.load(Ordering::SeqCst), 0);
}

//! End-to-end tests: the real router on a local port, driven by the HTTP
//! client and the conversation state.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;

use aiva::application::CONNECTION_ERROR_TEXT;
use aiva::connector::adapter::EMPTY_REPLY_FALLBACK;
use aiva::{
    build_router, AppState, ClassifiedPrompt, CompletionGateway, ConversationState, DomainError,
    EmptyCompletionPolicy, FileKeyValueStore, GenerateResponseUseCase, HistoryStore,
    HttpRequestOrchestrator, MockCompletionGateway, RequestOrchestrator, Role, SubmitOutcome, View,
};

struct RejectingGateway;

#[async_trait]
impl CompletionGateway for RejectingGateway {
    async fn complete(&self, _prompt: &ClassifiedPrompt) -> Result<String, DomainError> {
        Err(DomainError::upstream(Some(401), "Invalid API Key"))
    }

    fn model_name(&self) -> &str {
        "rejecting"
    }
}

struct EmptyGateway;

#[async_trait]
impl CompletionGateway for EmptyGateway {
    async fn complete(&self, _prompt: &ClassifiedPrompt) -> Result<String, DomainError> {
        Ok(String::new())
    }

    fn model_name(&self) -> &str {
        "empty"
    }
}

async fn spawn_backend(gateway: Arc<dyn CompletionGateway>) -> SocketAddr {
    spawn_use_case(GenerateResponseUseCase::new(gateway)).await
}

/// Serves the backend router on an ephemeral port and returns its address.
async fn spawn_use_case(use_case: GenerateResponseUseCase) -> SocketAddr {
    let app = build_router(AppState::new(Arc::new(use_case)));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Backend stopped");
    });

    addr
}

fn conversation(addr: SocketAddr, dir: &std::path::Path) -> ConversationState {
    let storage = Arc::new(FileKeyValueStore::new(dir).expect("Failed to open storage"));
    let orchestrator = Arc::new(HttpRequestOrchestrator::new(format!("http://{addr}")));
    ConversationState::new(orchestrator, HistoryStore::load(storage))
}

#[tokio::test]
async fn test_exchange_round_trip_persists_history() {
    let addr = spawn_backend(Arc::new(MockCompletionGateway::new())).await;
    let dir = tempfile::tempdir().unwrap();

    let mut state = conversation(addr, dir.path());
    let outcome = state.submit("Explain gravity").await;

    assert_eq!(outcome, SubmitOutcome::Answered);
    assert_eq!(state.view(), View::ChatActive);

    let transcript = state.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role(), Role::User);
    assert_eq!(transcript[1].role(), Role::Assistant);
    assert!(transcript[1].text().starts_with("[Concept Mentor]"));
    assert!(transcript[1].text().contains("Explain gravity"));

    // A fresh client over the same directory sees the recorded session.
    let reloaded = conversation(addr, dir.path());
    assert_eq!(reloaded.history().len(), 1);
    assert_eq!(reloaded.history().sessions()[0].topic(), "Explain gravity");
    assert_eq!(
        reloaded.history().sessions()[0].content(),
        transcript[1].text()
    );
}

#[tokio::test]
async fn test_upstream_status_reaches_client() {
    let addr = spawn_backend(Arc::new(RejectingGateway)).await;
    let orchestrator = HttpRequestOrchestrator::new(format!("http://{addr}"));

    let err = orchestrator.send("hi").await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(401));
    assert!(err.to_string().contains("Invalid API Key"));
}

#[tokio::test]
async fn test_upstream_failure_is_not_recorded() {
    let addr = spawn_backend(Arc::new(RejectingGateway)).await;
    let dir = tempfile::tempdir().unwrap();

    let mut state = conversation(addr, dir.path());
    assert_eq!(state.submit("hi").await, SubmitOutcome::Failed);

    assert_eq!(state.transcript().len(), 2);
    assert!(state.transcript()[1].text().contains("401"));
    assert!(state.history().is_empty());
}

#[tokio::test]
async fn test_blank_topic_rejected_by_backend() {
    let addr = spawn_backend(Arc::new(MockCompletionGateway::new())).await;
    let orchestrator = HttpRequestOrchestrator::new(format!("http://{addr}"));

    let err = orchestrator.send("   ").await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(400));
    assert_eq!(err.to_string(), "No topic provided");
}

#[tokio::test]
async fn test_unreachable_backend_yields_connection_error_reply() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let mut state = conversation(addr, dir.path());

    assert_eq!(state.submit("hi").await, SubmitOutcome::Failed);
    assert!(state.transcript()[1].text().starts_with(CONNECTION_ERROR_TEXT));
}

#[tokio::test]
async fn test_clear_all_survives_reload() {
    let addr = spawn_backend(Arc::new(MockCompletionGateway::new())).await;
    let dir = tempfile::tempdir().unwrap();

    let mut state = conversation(addr, dir.path());
    state.submit("quiz me on verbs").await;
    state.submit("summarize the cold war").await;
    assert_eq!(state.history().len(), 2);

    state.history_mut().clear_all().unwrap();

    assert!(conversation(addr, dir.path()).history().is_empty());
}

#[tokio::test]
async fn test_empty_completion_shows_fallback_and_is_recorded() {
    let addr = spawn_backend(Arc::new(EmptyGateway)).await;
    let dir = tempfile::tempdir().unwrap();

    let mut state = conversation(addr, dir.path());
    assert_eq!(state.submit("hi").await, SubmitOutcome::Answered);

    assert_eq!(state.transcript()[1].text(), EMPTY_REPLY_FALLBACK);
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history().sessions()[0].content(), EMPTY_REPLY_FALLBACK);
}

#[tokio::test]
async fn test_rejected_empty_completion_fails_exchange() {
    let use_case = GenerateResponseUseCase::new(Arc::new(EmptyGateway))
        .with_empty_completion_policy(EmptyCompletionPolicy::Reject);
    let addr = spawn_use_case(use_case).await;

    let err = HttpRequestOrchestrator::new(format!("http://{addr}"))
        .send("hi")
        .await
        .unwrap_err();
    assert_eq!(err.upstream_status(), Some(500));

    let dir = tempfile::tempdir().unwrap();
    let mut state = conversation(addr, dir.path());
    assert_eq!(state.submit("hi").await, SubmitOutcome::Failed);
    assert!(state.history().is_empty());
}

#[tokio::test]
async fn test_non_json_success_yields_connection_error_reply() {
    let app = axum::Router::new().route(
        "/api/generate",
        axum::routing::post(|| async { "<html>proxy page</html>" }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let dir = tempfile::tempdir().unwrap();
    let mut state = conversation(addr, dir.path());

    assert_eq!(state.submit("hi").await, SubmitOutcome::Failed);
    assert!(state.transcript()[1].text().starts_with(CONNECTION_ERROR_TEXT));
    assert!(state.history().is_empty());
}

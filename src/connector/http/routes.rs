use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::application::GenerateResponseUseCase;
use crate::domain::DomainError;

#[derive(Clone)]
pub struct AppState {
    generate_use_case: Arc<GenerateResponseUseCase>,
}

impl AppState {
    pub fn new(generate_use_case: Arc<GenerateResponseUseCase>) -> Self {
        Self { generate_use_case }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Maps domain failures onto the endpoint's status codes and JSON error body.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        let status = self.0.upstream_status()?;
        let hint = match status {
            401 | 403 => "Check API key configuration",
            429 => "Provider rate limit or quota reached",
            _ => "Completion provider request failed",
        };
        Some(hint.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Backend routes: `POST /api/generate` and `GET /healthz`, open to any origin.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/generate", post(generate))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    // An unreadable body carries no topic.
    let topic = match payload {
        Ok(Json(request)) => request.topic,
        Err(rejection) => {
            debug!("Unreadable generate body: {}", rejection);
            None
        }
    };

    let result = state.generate_use_case.execute(topic.as_deref()).await?;
    Ok(Json(GenerateResponse { result }))
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

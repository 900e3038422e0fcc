use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::RequestOrchestrator;
use crate::domain::DomainError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const GENERATE_PATH: &str = "/api/generate";

/// Reply used when the backend answers 200 without any result text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm having trouble connecting to my brain right now. Try again?";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    result: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    details: Option<String>,
}

/// [`RequestOrchestrator`] that POSTs `{ topic }` to the backend over HTTP.
pub struct HttpRequestOrchestrator {
    client: reqwest::Client,
    /// Full endpoint URL (base + GENERATE_PATH).
    url: String,
}

impl HttpRequestOrchestrator {
    pub fn new(backend_url: impl Into<String>) -> Self {
        let base: String = backend_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), GENERATE_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                error: Some(error),
                details,
            }) => match details {
                Some(details) => format!("{error} ({details})"),
                None => error,
            },
            _ => format!("Backend returned {status}"),
        }
    }
}

#[async_trait]
impl RequestOrchestrator for HttpRequestOrchestrator {
    async fn send(&self, topic: &str) -> Result<String, DomainError> {
        debug!("POST {} topic={}", self.url, topic);

        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { topic })
            .send()
            .await
            .map_err(|e| DomainError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(e.to_string()))?;

        if !status.is_success() {
            warn!("Backend returned {status}: {body}");
            return Err(DomainError::upstream(
                Some(status.as_u16()),
                Self::failure_message(status, &body),
            ));
        }

        // A 2xx that is not our JSON usually comes from a proxy or a sleeping host.
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Backend returned {status} with an unreadable body: {e}");
            DomainError::transport(format!("Unreadable backend response: {e}"))
        })?;

        Ok(parsed
            .result
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let orchestrator = HttpRequestOrchestrator::new("http://localhost:5000/");
        assert_eq!(orchestrator.url(), "http://localhost:5000/api/generate");
    }

    #[test]
    fn failure_message_uses_error_and_details() {
        let body = r#"{"error":"Invalid API Key","details":"Check API key configuration"}"#;
        assert_eq!(
            HttpRequestOrchestrator::failure_message(reqwest::StatusCode::UNAUTHORIZED, body),
            "Invalid API Key (Check API key configuration)"
        );
    }

    #[test]
    fn failure_message_without_details() {
        let body = r#"{"error":"No topic provided"}"#;
        assert_eq!(
            HttpRequestOrchestrator::failure_message(reqwest::StatusCode::BAD_REQUEST, body),
            "No topic provided"
        );
    }

    #[test]
    fn failure_message_falls_back_to_status() {
        let message = HttpRequestOrchestrator::failure_message(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            "<html>down</html>",
        );
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let orchestrator = HttpRequestOrchestrator::new(format!("http://{addr}"));
        let err = orchestrator.send("hi").await.unwrap_err();
        assert!(err.is_transport());
    }

    async fn serve(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn non_json_success_is_transport_error() {
        let app = axum::Router::new().route(
            GENERATE_PATH,
            axum::routing::post(|| async { "<html>proxy page</html>" }),
        );
        let orchestrator = HttpRequestOrchestrator::new(serve(app).await);

        let err = orchestrator.send("hi").await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.upstream_status(), None);
    }

    #[tokio::test]
    async fn missing_result_uses_fallback() {
        let app = axum::Router::new().route(
            GENERATE_PATH,
            axum::routing::post(|| async { axum::Json(serde_json::json!({})) }),
        );
        let orchestrator = HttpRequestOrchestrator::new(serve(app).await);

        assert_eq!(orchestrator.send("hi").await.unwrap(), EMPTY_REPLY_FALLBACK);
    }
}

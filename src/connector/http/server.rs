use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::application::{CompletionGateway, GenerateResponseUseCase};
use crate::connector::adapter::{GroqClient, MockCompletionGateway};
use crate::domain::DomainError;

use super::config::ServerConfig;
use super::routes::{build_router, AppState};

/// Builds the completion gateway selected by `config`, logging credential state.
pub fn build_gateway(config: &ServerConfig) -> Arc<dyn CompletionGateway> {
    if config.mock_completions {
        info!("Using mock completion gateway");
        return Arc::new(MockCompletionGateway::new());
    }

    match config.api_key_prefix() {
        Some(prefix) => info!("API key detected (prefix: {}...)", prefix),
        None => error!("GROQ_API_KEY is missing; generate requests will fail until it is set"),
    }

    Arc::new(GroqClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.base_url.clone(),
    ))
}

pub fn build_state(config: &ServerConfig) -> AppState {
    let use_case = GenerateResponseUseCase::new(build_gateway(config))
        .with_empty_completion_policy(config.empty_completion);
    AppState::new(Arc::new(use_case))
}

/// Serves the backend until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), DomainError> {
    let app = build_router(build_state(&config));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!("Aiva backend online on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Aiva backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

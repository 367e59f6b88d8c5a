//! Persona chat - question answering with selectable bot personas
//!
//! A Rust backend that runs one conversation through a pure state machine,
//! asks a Gemini model for answers and follow-up suggestions, and exposes
//! the conversation over HTTP with SSE updates.

mod api;
mod classifier;
mod config;
mod error;
mod llm;
mod persona;
mod runtime;
mod state_machine;
mod suggestions;

use api::{create_router, AppState};
use config::ChatConfig;
use llm::{GeminiService, LoggingService};
use runtime::ConversationRuntime;
use state_machine::ConversationState;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "persona_chat=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env()?;

    // Generative service
    let gemini = GeminiService::new(
        config.api_key.clone(),
        &config.model,
        config.gateway.as_deref(),
        config.request_timeout,
    )?;
    tracing::info!(
        model = %config.model,
        gateway = ?config.gateway,
        persona = %config.default_persona,
        "Generative service configured"
    );
    let llm = LoggingService::new(Arc::new(gemini));

    // Conversation runtime
    let conversation = ConversationRuntime::spawn(
        llm,
        ConversationState::new(config.default_persona),
        config.suggestion_timeout,
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(AppState::new(conversation))
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Persona chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

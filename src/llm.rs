//! Generative-text service abstraction
//!
//! Request building and reply parsing are pure and live beside the wire
//! types; `LlmService` is the only thing that touches the network.

mod error;
mod gemini;
pub mod parse;
pub mod request;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::GeminiService;
pub use parse::{answer_text, parse_answer, parse_suggestions, ParseError};
pub use request::{build_answer_request, build_suggestion_request};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// A generative-text backend: one POST in, one reply out
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<RawReply, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: LlmService + ?Sized> LlmService for Arc<T> {
    async fn generate(&self, request: &GenerateRequest) -> Result<RawReply, LlmError> {
        (**self).generate(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn generate(&self, request: &GenerateRequest) -> Result<RawReply, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(request).await;
        let duration = start.elapsed();
        let structured = request.generation_config.is_some();

        match &result {
            Ok(reply) => {
                let usage = reply.usage_metadata.unwrap_or_default();
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    structured,
                    input_tokens = usage.prompt_token_count,
                    output_tokens = usage.candidates_token_count,
                    finish_reason = reply.finish_reason().unwrap_or("none"),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    structured,
                    kind = e.kind.as_str(),
                    status = e.status.map(|s| s.as_u16()),
                    error = %e.message,
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::ConversationHandle;
use crate::llm::{GenerateRequest, LlmError, LlmService, RawReply};
use crate::state_machine::ConversationState;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Service
// ============================================================================

type QueuedReply = (Option<Arc<Notify>>, Result<RawReply, LlmError>);

/// Mock service that returns queued replies in order
pub struct MockLlmService {
    replies: Mutex<VecDeque<QueuedReply>>,
    model_id: String,
    /// Record of all requests made
    requests: Mutex<Vec<GenerateRequest>>,
}

#[allow(dead_code)]
impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: RawReply) {
        self.replies.lock().unwrap().push_back((None, Ok(reply)));
    }

    /// Queue a reply whose first candidate carries `text`
    pub fn queue_text(&self, text: &str) {
        self.queue_reply(RawReply::with_text(text));
    }

    /// Queue an error
    pub fn queue_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back((None, Err(error)));
    }

    /// Queue a reply that is held back until the returned gate is notified
    pub fn queue_gated_text(&self, text: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.replies
            .lock()
            .unwrap()
            .push_back((Some(gate.clone()), Ok(RawReply::with_text(text))));
        gate
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait until at least `count` requests have been made
    pub async fn wait_for_requests(&self, count: usize, timeout: Duration) {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.requests.lock().unwrap().len() < count {
            assert!(
                tokio::time::Instant::now() < deadline,
                "timed out waiting for {count} requests"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn generate(&self, request: &GenerateRequest) -> Result<RawReply, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let Some((gate, reply)) = next else {
            return Err(LlmError::network("No mock response queued"));
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        reply
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Canned HTTP endpoint
// ============================================================================

/// Serve the same status and JSON body for every generate call on an
/// ephemeral port; returns the base URL to use as a gateway
pub async fn serve_canned_reply(status: StatusCode, body: Value) -> String {
    let body = body.to_string();
    let app = Router::new().route(
        "/gemini/v1beta/models/:call",
        post(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ============================================================================
// Runtime helpers
// ============================================================================

/// Wait until the published state satisfies `predicate`; panics on timeout
pub async fn wait_for_state(
    handle: &ConversationHandle,
    timeout: Duration,
    predicate: impl FnMut(&ConversationState) -> bool,
) -> ConversationState {
    let mut rx = handle.subscribe();
    let result = tokio::time::timeout(timeout, rx.wait_for(predicate)).await;
    match result {
        Ok(Ok(state)) => state.clone(),
        Ok(Err(_)) => panic!("runtime stopped while waiting for state"),
        Err(_) => panic!("timed out waiting for state: {:?}", handle.snapshot()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::build_answer_request;
    use crate::persona::Persona;

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let mock = MockLlmService::new("mock");
        mock.queue_text("first");
        mock.queue_error(LlmError::rate_limit("slow down"));

        let request = build_answer_request("Hi", Persona::Default);
        let reply = mock.generate(&request).await.unwrap();
        assert_eq!(reply.first_text(), Some("first"));
        assert!(mock.generate(&request).await.is_err());

        // Queue exhausted
        let err = mock.generate(&request).await.unwrap_err();
        assert!(err.message.contains("No mock response queued"));
        assert_eq!(mock.recorded_requests().len(), 3);
        assert_eq!(mock.model_id(), "mock");
    }

    #[tokio::test]
    async fn test_gated_reply_waits_for_gate() {
        let mock = Arc::new(MockLlmService::new("mock"));
        let gate = mock.queue_gated_text("held");

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move {
                mock.generate(&build_answer_request("Hi", Persona::Default))
                    .await
            })
        };

        mock.wait_for_requests(1, Duration::from_secs(1)).await;
        assert!(!task.is_finished());

        gate.notify_one();
        let reply = task.await.unwrap().unwrap();
        assert_eq!(reply.first_text(), Some("held"));
    }
}

//! Failure taxonomy for one request cycle

use crate::llm::{LlmError, LlmErrorKind, ParseError};
use std::time::Duration;
use thiserror::Error;

/// Shown to the user whenever an answer call fails. Internal detail stays in
/// the logs.
pub const USER_FACING_ERROR: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Transport failure or non-2xx status
    #[error("Network failure: {0}")]
    NetworkFailure(LlmError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<LlmError> for ChatError {
    fn from(e: LlmError) -> Self {
        // A successful status with an undecodable body is a reply problem, not a transport one
        if e.kind == LlmErrorKind::Decode {
            tracing::debug!(error = %e.message, "Undecodable reply body");
            ChatError::Parse(ParseError::MalformedReply)
        } else {
            ChatError::NetworkFailure(e)
        }
    }
}

impl ChatError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::NetworkFailure(_) => "network_failure",
            ChatError::Parse(ParseError::MalformedReply) => "malformed_reply",
            ChatError::Parse(ParseError::InvalidSuggestionFormat(_)) => "invalid_suggestion_format",
            ChatError::Timeout(_) => "timeout",
        }
    }
}

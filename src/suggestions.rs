//! Follow-up question generation
//!
//! Runs after every successful answer. Best effort: any failure leaves the
//! suggestion list empty and is never shown to the user.

use crate::error::ChatError;
use crate::llm::{build_suggestion_request, parse_suggestions, LlmService};
use std::time::Duration;
use tokio::time::timeout;

/// Ask the service for follow-up questions to the exchange `(prompt, answer)`.
///
/// `answer` is the raw reply text, quoted verbatim into the meta-prompt. The
/// decoded list is returned as the service produced it.
pub async fn generate_suggestions<L: LlmService + ?Sized>(
    prompt: &str,
    answer: &str,
    llm: &L,
    wait: Duration,
) -> Result<Vec<String>, ChatError> {
    let request = build_suggestion_request(prompt, answer);

    let reply = timeout(wait, llm.generate(&request))
        .await
        .map_err(|_| ChatError::Timeout(wait))??;

    Ok(parse_suggestions(&reply)?)
}

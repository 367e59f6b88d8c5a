//! Runtime for executing the conversation
//!
//! Owns the `ConversationState`, feeds events through the pure transition
//! function on a single task, and executes the resulting effects.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;

use crate::persona::Persona;
use crate::state_machine::{ConversationState, Event};
use thiserror::Error;
use tokio::sync::{mpsc, watch};

#[derive(Debug, Error)]
#[error("Conversation runtime is not running")]
pub struct RuntimeStopped;

/// Handle to interact with the running conversation
#[derive(Clone)]
pub struct ConversationHandle {
    event_tx: mpsc::Sender<Event>,
    state_rx: watch::Receiver<ConversationState>,
}

impl ConversationHandle {
    /// Ask a question. Ignored if blank or an answer is already pending.
    pub async fn submit(&self, prompt: impl Into<String>) -> Result<(), RuntimeStopped> {
        self.send(Event::Submit {
            prompt: prompt.into(),
        })
        .await
    }

    /// Same as submitting the suggestion text
    pub async fn click_suggestion(&self, suggestion: impl Into<String>) -> Result<(), RuntimeStopped> {
        let prompt = suggestion.into();
        tracing::debug!(suggestion = %prompt, "Suggestion clicked");
        self.submit(prompt).await
    }

    pub async fn select_persona(&self, persona: Persona) -> Result<(), RuntimeStopped> {
        self.send(Event::SelectPersona { persona }).await
    }

    pub async fn update_draft(&self, text: impl Into<String>) -> Result<(), RuntimeStopped> {
        self.send(Event::UpdateDraft { text: text.into() }).await
    }

    /// Current state
    pub fn snapshot(&self) -> ConversationState {
        self.state_rx.borrow().clone()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.state_rx.clone()
    }

    async fn send(&self, event: Event) -> Result<(), RuntimeStopped> {
        self.event_tx.send(event).await.map_err(|_| RuntimeStopped)
    }
}

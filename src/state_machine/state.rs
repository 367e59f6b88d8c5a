//! Conversation state types

use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// One message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationTurn {
    User { text: String },
    Bot { lines: Vec<String> },
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        ConversationTurn::User { text: text.into() }
    }

    pub fn bot(lines: Vec<String>) -> Self {
        ConversationTurn::Bot { lines }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, ConversationTurn::Bot { .. })
    }
}

/// Where the ask → answer → suggest cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Phase {
    /// Ready for user input, no pending operations
    #[default]
    Idle,

    /// Answer request in flight. New prompts are rejected.
    AwaitingAnswer,

    /// Follow-up suggestions requested for the bot turn at index `turn`.
    /// Idle from the user's point of view: new prompts are accepted.
    AwaitingSuggestions { turn: usize },
}

impl Phase {
    /// Whether the pending indicator is shown
    pub fn is_pending(self) -> bool {
        matches!(self, Phase::AwaitingAnswer)
    }
}

/// Session state, owned by the conversation runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ConversationState {
    /// Append-only; index is recency
    pub turns: Vec<ConversationTurn>,
    pub phase: Phase,
    /// User-facing error from the last answer call
    pub error: Option<String>,
    pub persona: Persona,
    /// Follow-ups for the last turn; replaced wholesale
    pub suggestions: Vec<String>,
    /// Prompt input buffer
    pub draft: String,
}

impl ConversationState {
    pub fn new(persona: Persona) -> Self {
        Self {
            persona,
            ..Default::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase.is_pending()
    }

    /// Whether `turn` is still the most recent turn
    pub fn is_last_turn(&self, turn: usize) -> bool {
        self.turns.len().checked_sub(1) == Some(turn)
    }
}

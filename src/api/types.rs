//! API request and response types

use crate::classifier::{classify_lines, ClassifiedLine};
use crate::persona::Persona;
use crate::state_machine::{ConversationState, ConversationTurn, Phase};
use serde::{Deserialize, Serialize};

/// Request to submit a prompt or click a suggestion
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub text: String,
}

/// Request to select a persona by id
#[derive(Debug, Deserialize)]
pub struct PersonaRequest {
    pub persona: String,
}

/// Request to replace the prompt buffer
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub text: String,
}

/// Response for user actions
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Conversation as rendered by a client: bot lines arrive classified
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub turns: Vec<TurnView>,
    pub phase: Phase,
    pub pending: bool,
    pub error: Option<String>,
    pub persona: Persona,
    pub suggestions: Vec<String>,
    pub draft: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnView {
    User { text: String },
    Bot { lines: Vec<ClassifiedLine> },
}

impl From<&ConversationTurn> for TurnView {
    fn from(turn: &ConversationTurn) -> Self {
        match turn {
            ConversationTurn::User { text } => TurnView::User { text: text.clone() },
            ConversationTurn::Bot { lines } => TurnView::Bot {
                lines: classify_lines(lines),
            },
        }
    }
}

impl From<&ConversationState> for ConversationView {
    fn from(state: &ConversationState) -> Self {
        Self {
            turns: state.turns.iter().map(TurnView::from).collect(),
            phase: state.phase,
            pending: state.is_pending(),
            error: state.error.clone(),
            persona: state.persona,
            suggestions: state.suggestions.clone(),
            draft: state.draft.clone(),
        }
    }
}

/// Persona information
#[derive(Debug, Serialize)]
pub struct PersonaInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub instruction: &'static str,
}

impl From<Persona> for PersonaInfo {
    fn from(persona: Persona) -> Self {
        Self {
            id: persona.id(),
            label: persona.display_name(),
            instruction: persona.instruction(),
        }
    }
}

/// Response for persona list
#[derive(Debug, Serialize)]
pub struct PersonasResponse {
    pub personas: Vec<PersonaInfo>,
    pub selected: Persona,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

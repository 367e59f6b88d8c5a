//! Events that can occur in a conversation

use crate::persona::Persona;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Submit {
        prompt: String,
    },
    SelectPersona {
        persona: Persona,
    },
    UpdateDraft {
        text: String,
    },

    // Answer call events
    AnswerReceived {
        /// The prompt the answer belongs to, as sent
        prompt: String,
        /// Raw reply text
        answer: String,
        /// Parsed display lines
        lines: Vec<String>,
    },
    AnswerFailed {
        /// Internal detail, logged but never shown
        message: String,
    },

    // Suggestion call events, tagged with the bot turn that spawned them
    SuggestionsReady {
        turn: usize,
        suggestions: Vec<String>,
    },
    SuggestionsFailed {
        turn: usize,
        message: String,
    },
}

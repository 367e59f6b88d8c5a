//! Effects produced by state transitions

use crate::persona::Persona;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Make the answer request (spawns as background task)
    RequestAnswer { prompt: String, persona: Persona },

    /// Make the follow-up request for the exchange that produced bot turn
    /// `turn`. The pair is captured when the answer lands.
    RequestSuggestions {
        turn: usize,
        prompt: String,
        answer: String,
    },

    /// Push the new state to subscribers
    PublishState,
}

//! Pure state transition function
//!
//! Given the same state and event this always produces the same new state
//! and effects, with no I/O.

use super::{ConversationState, ConversationTurn, Effect, Event, Phase};
use crate::error::USER_FACING_ERROR;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConversationState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is ignored. The state is left untouched in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Prompt is blank")]
    BlankPrompt,
    #[error("An answer is already pending")]
    AnswerPending,
    #[error("Suggestions for turn {turn} are stale")]
    StaleSuggestions { turn: usize },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(
    state: &ConversationState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        // ============================================================
        // Settings, accepted in every phase
        // ============================================================
        (_, Event::SelectPersona { persona }) => {
            let mut next = state.clone();
            next.persona = persona;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (_, Event::UpdateDraft { text }) => {
            let mut next = state.clone();
            next.draft = text;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        // ============================================================
        // Prompt submission
        // ============================================================
        (_, Event::Submit { prompt }) if prompt.trim().is_empty() => {
            Err(TransitionError::BlankPrompt)
        }

        (Phase::AwaitingAnswer, Event::Submit { .. }) => Err(TransitionError::AnswerPending),

        // Idle or AwaitingSuggestions: appending the user turn makes any
        // outstanding suggestion result stale
        (Phase::Idle | Phase::AwaitingSuggestions { .. }, Event::Submit { prompt }) => {
            let mut next = state.clone();
            next.turns.push(ConversationTurn::user(prompt.clone()));
            next.phase = Phase::AwaitingAnswer;
            next.suggestions.clear();
            next.error = None;
            next.draft.clear();
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishState)
                .with_effect(Effect::RequestAnswer {
                    prompt,
                    persona: state.persona,
                }))
        }

        // ============================================================
        // Answer call completion
        // ============================================================
        (
            Phase::AwaitingAnswer,
            Event::AnswerReceived {
                prompt,
                answer,
                lines,
            },
        ) => {
            let mut next = state.clone();
            next.turns.push(ConversationTurn::bot(lines));
            let turn = next.turns.len() - 1;
            next.phase = Phase::AwaitingSuggestions { turn };
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishState)
                .with_effect(Effect::RequestSuggestions {
                    turn,
                    prompt,
                    answer,
                }))
        }

        (Phase::AwaitingAnswer, Event::AnswerFailed { .. }) => {
            let mut next = state.clone();
            next.phase = Phase::Idle;
            next.error = Some(USER_FACING_ERROR.to_string());
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (phase, event @ (Event::AnswerReceived { .. } | Event::AnswerFailed { .. })) => Err(
            TransitionError::InvalidTransition(format!("{event:?} while {phase:?}")),
        ),

        // ============================================================
        // Suggestion call completion
        // ============================================================
        (Phase::AwaitingSuggestions { turn: pending }, Event::SuggestionsReady { turn, suggestions })
            if pending == turn && state.is_last_turn(turn) =>
        {
            let mut next = state.clone();
            next.phase = Phase::Idle;
            next.suggestions = suggestions;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (Phase::AwaitingSuggestions { turn: pending }, Event::SuggestionsFailed { turn, .. })
            if pending == turn && state.is_last_turn(turn) =>
        {
            let mut next = state.clone();
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (_, Event::SuggestionsReady { turn, .. } | Event::SuggestionsFailed { turn, .. }) => {
            Err(TransitionError::StaleSuggestions { turn })
        }
    }
}

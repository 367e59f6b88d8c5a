//! Conversation runtime executor

use super::ConversationHandle;
use crate::error::ChatError;
use crate::llm::{answer_text, build_answer_request, parse_answer, LlmService};
use crate::persona::Persona;
use crate::state_machine::{transition, ConversationState, Effect, Event, TransitionError};
use crate::suggestions::generate_suggestions;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// A successful answer call
struct Answer {
    text: String,
    lines: Vec<String>,
}

/// Conversation runtime, generic over the generative service
pub struct ConversationRuntime<L>
where
    L: LlmService + 'static,
{
    session_id: String,
    state: ConversationState,
    llm: Arc<L>,
    suggestion_timeout: Duration,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    state_tx: watch::Sender<ConversationState>,
}

impl<L> ConversationRuntime<L>
where
    L: LlmService + 'static,
{
    pub fn new(
        llm: L,
        state: ConversationState,
        suggestion_timeout: Duration,
    ) -> (Self, ConversationHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(state.clone());
        let handle = ConversationHandle {
            event_tx: event_tx.clone(),
            state_rx,
        };
        let runtime = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            state,
            llm: Arc::new(llm),
            suggestion_timeout,
            event_rx,
            event_tx,
            state_tx,
        };
        (runtime, handle)
    }

    /// Create a runtime and run it on a background task
    pub fn spawn(
        llm: L,
        state: ConversationState,
        suggestion_timeout: Duration,
    ) -> ConversationHandle {
        let (runtime, handle) = Self::new(llm, state, suggestion_timeout);
        tokio::spawn(runtime.run());
        handle
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, model = %self.llm.model_id(), "Starting conversation runtime");

        // Process events in a loop; network completions come back through the same channel
        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!(session_id = %self.session_id, "Conversation runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e @ (TransitionError::BlankPrompt | TransitionError::AnswerPending)) => {
                tracing::debug!(session_id = %self.session_id, reason = %e, "Prompt ignored");
                return;
            }
            Err(e @ TransitionError::StaleSuggestions { .. }) => {
                tracing::debug!(session_id = %self.session_id, reason = %e, "Discarding suggestions");
                return;
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Unexpected event");
                return;
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::PublishState => {
                self.state_tx.send_replace(self.state.clone());
            }

            Effect::RequestAnswer { prompt, persona } => {
                let llm = self.llm.clone();
                let event_tx = self.event_tx.clone();
                let session_id = self.session_id.clone();

                tokio::spawn(async move {
                    tracing::info!(session_id = %session_id, persona = %persona, "Requesting answer");
                    let event = match fetch_answer(llm.as_ref(), &prompt, persona).await {
                        Ok(answer) => Event::AnswerReceived {
                            prompt,
                            answer: answer.text,
                            lines: answer.lines,
                        },
                        Err(e) => {
                            tracing::error!(
                                session_id = %session_id,
                                kind = e.kind(),
                                error = %e,
                                "Answer request failed"
                            );
                            Event::AnswerFailed {
                                message: e.to_string(),
                            }
                        }
                    };
                    let _ = event_tx.send(event).await;
                });
            }

            Effect::RequestSuggestions {
                turn,
                prompt,
                answer,
            } => {
                let llm = self.llm.clone();
                let event_tx = self.event_tx.clone();
                let session_id = self.session_id.clone();
                let wait = self.suggestion_timeout;

                tokio::spawn(async move {
                    let event =
                        match generate_suggestions(&prompt, &answer, llm.as_ref(), wait).await {
                            Ok(suggestions) => {
                                tracing::debug!(
                                    session_id = %session_id,
                                    turn,
                                    count = suggestions.len(),
                                    "Suggestions generated"
                                );
                                Event::SuggestionsReady { turn, suggestions }
                            }
                            Err(e) => {
                                tracing::warn!(
                                    session_id = %session_id,
                                    turn,
                                    kind = e.kind(),
                                    error = %e,
                                    "Suggestion request failed"
                                );
                                Event::SuggestionsFailed {
                                    turn,
                                    message: e.to_string(),
                                }
                            }
                        };
                    let _ = event_tx.send(event).await;
                });
            }
        }
    }
}

async fn fetch_answer<L: LlmService + ?Sized>(
    llm: &L,
    prompt: &str,
    persona: Persona,
) -> Result<Answer, ChatError> {
    let request = build_answer_request(prompt, persona);
    let reply = llm.generate(&request).await?;
    let lines = parse_answer(&reply)?;
    Ok(Answer {
        text: answer_text(&reply)?.to_string(),
        lines,
    })
}

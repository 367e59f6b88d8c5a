//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::error::USER_FACING_ERROR;
use crate::persona::Persona;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_persona() -> impl Strategy<Value = Persona> {
    prop_oneof![
        Just(Persona::Default),
        Just(Persona::Sarcastic),
        Just(Persona::Pirate),
    ]
}

fn arb_prompt() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z?]{1,20}",
        Just(String::new()),
        " {1,3}",
    ]
}

fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z*]{1,12}", 1..4)
}

fn arb_suggestions() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,10}\\?", 0..4)
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_prompt().prop_map(|prompt| Event::Submit { prompt }),
        arb_persona().prop_map(|persona| Event::SelectPersona { persona }),
        "[a-z ]{0,10}".prop_map(|text| Event::UpdateDraft { text }),
        ("[a-zA-Z?]{1,20}", arb_lines()).prop_map(|(prompt, lines)| Event::AnswerReceived {
            answer: lines.join("\n"),
            prompt,
            lines,
        }),
        "[a-z ]{1,20}".prop_map(|message| Event::AnswerFailed { message }),
        (0usize..8, arb_suggestions())
            .prop_map(|(turn, suggestions)| Event::SuggestionsReady { turn, suggestions }),
        (0usize..8, "[a-z ]{1,20}")
            .prop_map(|(turn, message)| Event::SuggestionsFailed { turn, message }),
    ]
}

// ============================================================================
// Invariant Checks
// ============================================================================

fn check_invariants(state: &ConversationState) -> Result<(), String> {
    // Suggestions belong to a bot turn at the end, and only once the answer is in
    if !state.suggestions.is_empty() {
        match state.turns.last() {
            Some(turn) if turn.is_bot() => {}
            other => return Err(format!("suggestions without trailing bot turn: {other:?}")),
        }
        if state.is_pending() {
            return Err("suggestions while an answer is pending".to_string());
        }
    }

    match state.phase {
        Phase::AwaitingAnswer => match state.turns.last() {
            Some(ConversationTurn::User { .. }) => {}
            other => return Err(format!("awaiting answer after {other:?}")),
        },
        Phase::AwaitingSuggestions { turn } => {
            if !state.is_last_turn(turn) || !state.turns[turn].is_bot() {
                return Err(format!("awaiting suggestions for non-last turn {turn}"));
            }
        }
        Phase::Idle => {}
    }

    if let Some(error) = &state.error {
        if error != USER_FACING_ERROR {
            return Err(format!("internal error leaked: {error}"));
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: valid state after any sequence of events
    #[test]
    fn prop_transitions_preserve_invariants(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = ConversationState::default();
        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
                if let Err(msg) = check_invariants(&state) {
                    prop_assert!(false, "{}: {:?}", msg, state);
                }
            }
        }
    }

    // Invariant 2: turns are append-only
    #[test]
    fn prop_turns_append_only(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = ConversationState::default();
        for event in events {
            if let Ok(result) = transition(&state, event) {
                let next = result.new_state;
                prop_assert!(next.turns.len() >= state.turns.len());
                prop_assert!(next.turns.len() <= state.turns.len() + 1);
                prop_assert_eq!(&next.turns[..state.turns.len()], &state.turns[..]);
                state = next;
            }
        }
    }

    // Invariant 3: single-flight. An answer request is only issued when
    // entering AwaitingAnswer from a non-pending phase.
    #[test]
    fn prop_single_flight(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = ConversationState::default();
        for event in events {
            if let Ok(result) = transition(&state, event) {
                let requests = result
                    .effects
                    .iter()
                    .filter(|e| matches!(e, Effect::RequestAnswer { .. }))
                    .count();
                if requests > 0 {
                    prop_assert_eq!(requests, 1);
                    prop_assert!(!state.is_pending());
                    prop_assert!(result.new_state.is_pending());
                }
                state = result.new_state;
            }
        }
    }

    // Invariant 4: the suggestion request carries exactly the pair from the
    // answer event and is tagged with the new bot turn
    #[test]
    fn prop_suggestion_request_uses_captured_pair(
        prompt in "[a-zA-Z?]{1,20}",
        lines in arb_lines(),
    ) {
        let state = transition(&ConversationState::default(), Event::Submit { prompt: prompt.clone() })
            .unwrap()
            .new_state;
        let answer = lines.join("\n");
        let result = transition(&state, Event::AnswerReceived {
            prompt: prompt.clone(),
            answer: answer.clone(),
            lines,
        })
        .unwrap();

        let expected = Effect::RequestSuggestions { turn: 1, prompt, answer };
        prop_assert!(result.effects.contains(&expected));
    }

    // Invariant 5: a blank prompt never changes anything
    #[test]
    fn prop_blank_submit_is_noop(
        events in proptest::collection::vec(arb_event(), 0..15),
        blank in " {0,4}",
    ) {
        let mut state = ConversationState::default();
        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
        }
        prop_assert_eq!(
            transition(&state, Event::Submit { prompt: blank }).unwrap_err(),
            TransitionError::BlankPrompt
        );
    }

    // Invariant 6: suggestions tagged with any turn other than the pending one
    // are rejected
    #[test]
    fn prop_stale_suggestions_rejected(
        events in proptest::collection::vec(arb_event(), 0..20),
        turn in 0usize..10,
        suggestions in arb_suggestions(),
    ) {
        let mut state = ConversationState::default();
        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
        }
        let current = matches!(state.phase, Phase::AwaitingSuggestions { turn: t } if t == turn);
        let result = transition(&state, Event::SuggestionsReady { turn, suggestions });
        prop_assert_eq!(result.is_ok(), current);
    }
}

//! Server-Sent Events support

use super::types::ConversationView;
use crate::state_machine::ConversationState;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Stream the current view as `init`, then a `conversation` event per change
pub fn sse_stream(
    mut state_rx: watch::Receiver<ConversationState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Mark the current version seen; later changes follow the init event
    let current = ConversationView::from(&*state_rx.borrow_and_update());
    let init = futures::stream::once(async move { Ok(view_event("init", &current)) });

    // Intermediate states may be coalesced; clients only need the latest
    let changes = WatchStream::from_changes(state_rx)
        .map(|state| Ok(view_event("conversation", &ConversationView::from(&state))));

    let combined = init.chain(changes);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn view_event(event_type: &str, view: &ConversationView) -> Event {
    let data = serde_json::json!({
        "type": event_type,
        "conversation": view,
    });
    Event::default().event(event_type).data(data.to_string())
}

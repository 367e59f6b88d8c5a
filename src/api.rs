//! HTTP API for the persona chat

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::ConversationHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub conversation: ConversationHandle,
}

impl AppState {
    pub fn new(conversation: ConversationHandle) -> Self {
        Self { conversation }
    }
}

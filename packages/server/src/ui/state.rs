//! Shared application state handed to every handler.

use crate::usecase::{
    CloseConnectionUseCase, OpenConnectionUseCase, PresenceTracker, SendMessageUseCase,
};

/// Wired UseCase collaborators, shared via `Arc` across all connections.
pub struct AppState {
    pub open_connection_usecase: OpenConnectionUseCase,
    pub send_message_usecase: SendMessageUseCase,
    pub close_connection_usecase: CloseConnectionUseCase,
    pub presence: PresenceTracker,
}

impl AppState {
    pub fn new(
        open_connection_usecase: OpenConnectionUseCase,
        send_message_usecase: SendMessageUseCase,
        close_connection_usecase: CloseConnectionUseCase,
        presence: PresenceTracker,
    ) -> Self {
        Self {
            open_connection_usecase,
            send_message_usecase,
            close_connection_usecase,
            presence,
        }
    }
}

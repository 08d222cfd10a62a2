//! UseCase layer: one struct per triggering transport event, plus the
//! presence tracker that owns the timeout reaper.

mod close_connection;
mod error;
mod open_connection;
mod presence;
mod send_message;

pub use close_connection::CloseConnectionUseCase;
pub use error::{OpenError, SendError};
pub use open_connection::{HISTORY_REPLAY_LIMIT, OpenConnectionUseCase};
pub use presence::{PresenceConfig, PresenceTracker};
pub use send_message::SendMessageUseCase;

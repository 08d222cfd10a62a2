//! Domain layer: value objects, entities, the presence roster and the
//! interfaces the engine requires from its collaborators.

pub mod command;
pub mod entity;
pub mod error;
pub mod presence;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use command::{ClientCommand, MalformedCommand};
pub use entity::{ChatMessage, MessageContent};
pub use error::{DeliveryError, RepositoryError};
pub use presence::{PresenceState, Roster};
pub use registry::{ConnectionHandle, ConnectionRegistry, PusherChannel};
pub use repository::{MessageStore, SessionGate};
pub use value_object::{ConnectionId, Identity, InvalidUserName, Timestamp, UserName};

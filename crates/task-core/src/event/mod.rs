//! Eventos de navegación, trait EventStore y replay.

mod replay;
mod store;
mod types;

pub use replay::{presented_steps, replay_state};
pub use store::{EventStore, InMemoryEventStore};
pub use types::{NavigationEvent, NavigationEventKind};

//! Reference data and event storage
//!
//! Events, challenges and loot pools can be loaded from external RON files
//! so the mock content is editable without a rebuild.

pub mod events;
pub mod loader;
pub mod repository;

pub use events::{default_events, EventDescriptor, EventDifficulty, EventFilter, EventSummary, EventTable};
pub use loader::{export_default_data, DataError, DataManager};
pub use repository::{join_event, list_events, EventRepository, InMemoryEventRepository, JoinError};

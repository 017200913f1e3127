//! Event repository
//!
//! Storage seam for event descriptors. The in-memory implementation backs
//! the server; tests inject their own.
//!
//! Joining reads the event, runs the eligibility gate, then increments the
//! participant count in a separate update. Nothing holds a lock across
//! those steps, so two joins racing for the last slot can both get in.

use parking_lot::RwLock;
use thiserror::Error;

use super::events::{EventDescriptor, EventFilter};
use crate::progression::{can_perform, Stats};

/// Storage capability for events
pub trait EventRepository: Send + Sync {
    /// Copy of one event
    fn get(&self, id: &str) -> Option<EventDescriptor>;

    /// Copies of all events, in table order
    fn list(&self) -> Vec<EventDescriptor>;

    /// Modify one event in place, returning the updated copy
    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut EventDescriptor)) -> Option<EventDescriptor>;
}

/// Process-local event table, lost on restart
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Vec<EventDescriptor>>,
}

impl InMemoryEventRepository {
    pub fn new(events: Vec<EventDescriptor>) -> Self {
        Self { events: RwLock::new(events) }
    }
}

impl EventRepository for InMemoryEventRepository {
    fn get(&self, id: &str) -> Option<EventDescriptor> {
        self.events.read().iter().find(|e| e.id == id).cloned()
    }

    fn list(&self) -> Vec<EventDescriptor> {
        self.events.read().clone()
    }

    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut EventDescriptor)) -> Option<EventDescriptor> {
        let mut events = self.events.write();
        let event = events.iter_mut().find(|e| e.id == id)?;
        apply(event);
        Some(event.clone())
    }
}

/// Why a join was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("Event not found")]
    NotFound,
    /// Eligibility gate failure, carrying its reason
    #[error("{0}")]
    Rejected(String),
}

/// Events matching `filter`, in table order
pub fn list_events(repo: &dyn EventRepository, filter: &EventFilter) -> Vec<EventDescriptor> {
    repo.list().into_iter().filter(|e| filter.matches(e)).collect()
}

/// Check eligibility and take a participant slot.
///
/// Check and increment are separate repository calls (see module docs).
pub fn join_event(
    repo: &dyn EventRepository,
    event_id: &str,
    level: u32,
    stats: &Stats,
) -> Result<EventDescriptor, JoinError> {
    let event = repo.get(event_id).ok_or(JoinError::NotFound)?;

    let eligibility = can_perform(level, stats, &event.requirements, Some(event.capacity()));
    if !eligibility.allowed {
        log::info!("Join of event {} refused: {}", event_id, eligibility.reason);
        return Err(JoinError::Rejected(eligibility.reason));
    }

    let joined = repo
        .update(event_id, &mut |e: &mut EventDescriptor| e.current_participants += 1)
        .ok_or(JoinError::NotFound)?;

    log::info!(
        "Joined event {} ({}/{} participants)",
        joined.id,
        joined.current_participants,
        joined.max_participants
    );
    Ok(joined)
}

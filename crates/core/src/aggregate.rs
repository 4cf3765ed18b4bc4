//! Aggregate root trait: identity plus domain event recording.

use crate::entity::Entity;
use crate::events::DomainEvents;

/// Aggregate root capability.
///
/// An aggregate root is an [`Entity`] that owns a [`DomainEvents`] list.
/// Implementors only expose the embedded list; recording and draining come
/// for free. This is intentionally small so each bounded context decides how it
/// models construction and state transitions without pulling in infrastructure.
pub trait AggregateRoot: Entity {
    /// Domain event type produced by this aggregate.
    type Event: Clone + core::fmt::Debug;

    /// Read access to the pending event list.
    fn domain_events(&self) -> &DomainEvents<Self::Event>;

    /// Mutable access to the pending event list.
    fn domain_events_mut(&mut self) -> &mut DomainEvents<Self::Event>;

    /// Record a domain event. Side-effect only, no IO.
    fn record_event(&mut self, event: Self::Event) {
        self.domain_events_mut().record(event);
    }

    /// Drain the pending events (returns and clears them).
    fn pull_events(&mut self) -> Vec<Self::Event> {
        self.domain_events_mut().pull()
    }
}

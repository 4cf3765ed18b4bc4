//! Per-aggregate pending domain event list.

/// Pending domain events recorded by a single aggregate instance.
///
/// Each aggregate embeds its own `DomainEvents`; there is no registry shared
/// between instances. Recording is a local append with no IO. The owner of the
/// aggregate drains the list with [`DomainEvents::pull`] after a unit of work,
/// typically to hand the events to a publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEvents<E> {
    pending: Vec<E>,
}

impl<E> DomainEvents<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the pending list.
    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Return every pending event in recording order and clear the list.
    pub fn pull(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    /// Events recorded but not yet pulled.
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for DomainEvents<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_returns_events_in_order_and_clears() {
        let mut events = DomainEvents::new();
        events.record("first");
        events.record("second");

        assert_eq!(events.pending(), &["first", "second"]);
        assert_eq!(events.pull(), vec!["first", "second"]);
        assert!(events.is_empty());
        assert!(events.pull().is_empty());
    }

    #[test]
    fn instances_do_not_share_pending_events() {
        let mut a = DomainEvents::new();
        let b: DomainEvents<u32> = DomainEvents::new();
        a.record(1);

        assert_eq!(a.pending().len(), 1);
        assert!(b.is_empty());
    }
}

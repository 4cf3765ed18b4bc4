//! Domain event contracts and publishing mechanics.
//!
//! Aggregates record events locally; application services drain them and hand
//! them to an [`EventBus`] wrapped in an [`EventEnvelope`].

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

//! Ports: the seams between the relay and its external collaborators.
//!
//! The consumer only ever talks to these traits. Production wiring uses the
//! Redis and reqwest adapters from [`crate::impls`]; tests substitute
//! in-memory or scripted implementations.

pub mod queue_store;
pub mod transport;

pub use self::queue_store::QueueStore;
pub use self::transport::PublishTransport;

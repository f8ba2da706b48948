//! relay-core
//!
//! Core building blocks for the queue-to-HTTP relay.
//!
//! # Module layout
//! - **message**: wire format for queue entries (decode + validation)
//! - **backoff**: exponential backoff policy and per-sequence execution state
//! - **ports**: abstraction layer (QueueStore, PublishTransport)
//! - **impls**: adapters (Redis list store, reqwest transport, in-memory store for dev)
//! - **consumer**: the relay loop itself (tick, publish-with-retry, driver)
//! - **config**: runtime settings with environment-friendly defaults
//! - **error**: error taxonomy (store / decode / transport)
//!
//! The relay provides at-least-once delivery: one message per cycle is popped
//! from the queue tail, decoded, published with bounded retry, and pushed back
//! to the queue head if every attempt fails.

pub mod backoff;
pub mod config;
pub mod consumer;
pub mod error;
pub mod impls;
pub mod message;
pub mod ports;

pub use backoff::{BackoffExecution, BackoffPolicy};
pub use config::RelayConfig;
pub use consumer::{Consumer, RelayWorker};
pub use error::{DecodeError, QueueStoreError, TransportError};
pub use impls::{HttpPublishTransport, InMemoryQueueStore, RedisQueueStore};
pub use message::DecodedMessage;
pub use ports::{PublishTransport, QueueStore};

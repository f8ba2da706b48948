//! Adapters implementing the ports.
//!
//! - [`RedisQueueStore`]: Redis list, the production queue backend
//! - [`HttpPublishTransport`]: reqwest client posting to `{base_url}/{channel}`
//! - [`InMemoryQueueStore`]: development and test backend

mod http;
mod memory;
mod redis_store;

pub use self::http::HttpPublishTransport;
pub use self::memory::InMemoryQueueStore;
pub use self::redis_store::RedisQueueStore;

//! Redis list adapter for the queue store port.
//!
//! The queue is a plain Redis list: producers `LPUSH` at the head, the relay
//! `RPOP`s from the tail, and exhausted messages go back with `LPUSH`.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tracing::info;

use crate::error::QueueStoreError;
use crate::ports::QueueStore;

/// Queue store backed by a Redis list under a single key.
pub struct RedisQueueStore {
    conn: MultiplexedConnection,
    queue_key: String,
}

impl RedisQueueStore {
    /// Connect to Redis and bind to the given list key.
    pub async fn connect(
        redis_url: &str,
        queue_key: impl Into<String>,
    ) -> Result<Self, QueueStoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        let queue_key = queue_key.into();

        info!(queue = %queue_key, "connected to redis queue");

        Ok(Self { conn, queue_key })
    }
}

#[async_trait]
impl QueueStore for RedisQueueStore {
    async fn pop_tail(&self) -> Result<Option<String>, QueueStoreError> {
        // The multiplexed connection is cheap to clone and shares one socket.
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.rpop(&self.queue_key, None).await?;
        Ok(raw)
    }

    async fn push_head(&self, raw: &str) -> Result<(), QueueStoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.lpush(&self.queue_key, raw).await?;
        Ok(())
    }

    async fn len(&self) -> Result<usize, QueueStoreError> {
        let mut conn = self.conn.clone();
        let len: usize = conn.llen(&self.queue_key).await?;
        Ok(len)
    }
}

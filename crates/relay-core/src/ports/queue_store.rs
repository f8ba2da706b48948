//! QueueStore port: durable ordered list of pending messages.

use async_trait::async_trait;

use crate::error::QueueStoreError;

/// Durable FIFO-like list holding raw queue entries.
///
/// Orientation: producers (and the requeue path) insert at the *head*; the
/// consumer pops from the *tail*. Any backend satisfies the contract as long
/// as pop removes from one end and push-head inserts at the other reliably.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Remove and return the entry at the queue tail, if any.
    ///
    /// Non-blocking: an empty queue is `Ok(None)`, not an error.
    async fn pop_tail(&self) -> Result<Option<String>, QueueStoreError>;

    /// Insert an entry at the queue head.
    ///
    /// Used to requeue a message whose delivery attempts are exhausted; the
    /// entry must be stored byte-identical to what was popped.
    async fn push_head(&self, raw: &str) -> Result<(), QueueStoreError>;

    /// Number of entries currently queued.
    async fn len(&self) -> Result<usize, QueueStoreError>;
}

//! In-memory queue store for development and tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::QueueStoreError;
use crate::ports::QueueStore;

/// `VecDeque` behind a mutex: head = front, tail = back.
///
/// Producers and the requeue path both insert at the front, the consumer pops
/// from the back, so entries come out in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryQueueStore {
    entries: Mutex<VecDeque<String>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the queued entries, head first. Test helper.
    pub async fn entries(&self) -> Vec<String> {
        self.entries.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    async fn pop_tail(&self) -> Result<Option<String>, QueueStoreError> {
        Ok(self.entries.lock().await.pop_back())
    }

    async fn push_head(&self, raw: &str) -> Result<(), QueueStoreError> {
        self.entries.lock().await.push_front(raw.to_string());
        Ok(())
    }

    async fn len(&self) -> Result<usize, QueueStoreError> {
        Ok(self.entries.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pops_in_insertion_order() {
        let store = InMemoryQueueStore::new();
        store.push_head("first").await.unwrap();
        store.push_head("second").await.unwrap();

        assert_eq!(store.pop_tail().await.unwrap().as_deref(), Some("first"));
        assert_eq!(store.pop_tail().await.unwrap().as_deref(), Some("second"));
        assert_eq!(store.pop_tail().await.unwrap(), None);
    }

    #[tokio::test]
    async fn len_tracks_pushes_and_pops() {
        let store = InMemoryQueueStore::new();
        assert_eq!(store.len().await.unwrap(), 0);

        store.push_head("a").await.unwrap();
        store.push_head("b").await.unwrap();
        assert_eq!(store.len().await.unwrap(), 2);

        store.pop_tail().await.unwrap();
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn requeued_entry_goes_to_the_head() {
        let store = InMemoryQueueStore::new();
        store.push_head("old").await.unwrap();

        let popped = store.pop_tail().await.unwrap().unwrap();
        store.push_head(&popped).await.unwrap();
        store.push_head("new").await.unwrap();

        // The requeued entry is ahead of anything inserted after it.
        assert_eq!(store.entries().await, vec!["new", "old"]);
        assert_eq!(store.pop_tail().await.unwrap().as_deref(), Some("old"));
    }
}

use crate::{Message, MessageId, Messages};

use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory message queue shared by the ingestion endpoint and viewers.
///
/// The map is only reachable through the operations below, all of which go
/// through one reader/writer lock: snapshots may overlap each other but never
/// an insert or remove.
pub struct MessageStore {
    inner: Arc<RwLock<Messages>>,
}

/// Read-only view that holds the read lock until dropped
pub struct MessageStoreView<'a> {
    guard: RwLockReadGuard<'a, Messages>,
}

/// Exclusive writer that holds the write lock until dropped
pub struct MessageStoreWriter<'a> {
    guard: RwLockWriteGuard<'a, Messages>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Messages::new())),
        }
    }

    /// Hold the read lock and look at the current contents.
    pub async fn read(&self) -> MessageStoreView<'_> {
        MessageStoreView {
            guard: self.inner.read().await,
        }
    }

    /// Hold the write lock; lets the caller sequence a mutation with
    /// follow-up work (e.g. a broadcast) before anyone else mutates.
    pub async fn write(&self) -> MessageStoreWriter<'_> {
        MessageStoreWriter {
            guard: self.inner.write().await,
        }
    }

    /// Set or overwrite the entry for `id`
    pub async fn insert(&self, id: MessageId, message: Message) {
        self.write().await.insert(id, message);
    }

    /// Delete the entry for `id`, returning whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        self.write().await.remove(id)
    }

    /// Owned copy of every entry
    pub async fn snapshot(&self) -> Messages {
        self.read().await.to_snapshot()
    }

    pub async fn len(&self) -> usize {
        self.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.read().await.is_empty()
    }
}

impl MessageStoreView<'_> {
    pub fn messages(&self) -> &Messages {
        &self.guard
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.guard.get(id)
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }

    pub fn to_snapshot(&self) -> Messages {
        self.guard.clone()
    }
}

impl MessageStoreWriter<'_> {
    /// Set or overwrite the entry for `id`, returning the stored message.
    pub fn insert(&mut self, id: MessageId, message: Message) -> &Message {
        match self.guard.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(message);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(message),
        }
    }

    /// Delete the entry for `id`, returning whether it existed
    pub fn remove(&mut self, id: &str) -> bool {
        self.guard.remove(id).is_some()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MessageStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

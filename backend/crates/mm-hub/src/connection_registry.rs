use crate::{ConnectionHandle, ConnectionId};

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use tokio::sync::RwLock;

/// Registry for tracking live viewer connections
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

struct RegistryInner {
    /// All registered connections by connection_id
    connections: HashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
            })),
        }
    }

    /// Register a connection
    pub async fn register(&self, handle: Arc<ConnectionHandle>) {
        let mut inner = self.inner.write().await;

        let connection_id = handle.id();
        inner.connections.insert(connection_id, handle);
        info!(
            "Registered connection {connection_id} ({} total)",
            inner.connections.len()
        );
    }

    /// Unregister a connection. Unknown ids are ignored, so calling this
    /// twice is harmless. Returns whether the connection was present.
    pub async fn unregister(&self, connection_id: ConnectionId) -> bool {
        let mut inner = self.inner.write().await;

        let removed = inner.connections.remove(&connection_id).is_some();
        if removed {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
        removed
    }

    /// Call `f` for every registered connection while holding the read lock.
    ///
    /// Register/unregister wait until iteration finishes. `f` must not call
    /// back into the registry; doing so deadlocks. Closing a handle from `f`
    /// is fine since that never touches the registry.
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Arc<ConnectionHandle>),
    {
        let inner = self.inner.read().await;
        for handle in inner.connections.values() {
            f(handle);
        }
    }

    /// Whether a connection is currently registered
    pub async fn contains(&self, connection_id: ConnectionId) -> bool {
        let inner = self.inner.read().await;
        inner.connections.contains_key(&connection_id)
    }

    /// Get total connection count
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }

    /// Count of registered connections whose open flag is still set
    pub async fn open_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.values().filter(|h| h.is_open()).count()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

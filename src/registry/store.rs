//! Component registry implementation
//!
//! The concurrent mapping from connection id to that connection's media
//! component, used to recover the component when a connection is deleted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::RegistryError;
use crate::component::MediaComponent;
use crate::connection::ConnectionId;

/// Registry of the media components of all attached connections
///
/// Thread-safe via `RwLock`. Inserts and removals for different connection
/// ids may run fully concurrently; operations on the same id are serialized
/// by the endpoint (create and delete of one connection are never issued
/// concurrently).
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// Map of connection id to media component
    components: RwLock<HashMap<ConnectionId, Arc<MediaComponent>>>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's media component
    ///
    /// An entry must exist exactly while the connection is attached, so an
    /// existing entry under the same id is a contract breach.
    pub async fn insert(
        &self,
        id: ConnectionId,
        component: Arc<MediaComponent>,
    ) -> Result<(), RegistryError> {
        let mut components = self.components.write().await;

        if components.contains_key(&id) {
            return Err(RegistryError::DuplicateRegistration(id));
        }
        components.insert(id, component);

        tracing::debug!(connection = %id, total = components.len(), "Component registered");
        Ok(())
    }

    /// Remove and return a connection's media component
    pub async fn remove(&self, id: ConnectionId) -> Result<Arc<MediaComponent>, RegistryError> {
        let mut components = self.components.write().await;

        let component = components.remove(&id).ok_or(RegistryError::NotFound(id))?;

        tracing::debug!(connection = %id, total = components.len(), "Component unregistered");
        Ok(component)
    }

    /// Look up a connection's media component without removing it
    pub async fn get(&self, id: ConnectionId) -> Option<Arc<MediaComponent>> {
        self.components.read().await.get(&id).map(Arc::clone)
    }

    /// Whether a component is registered for this connection
    pub async fn contains(&self, id: ConnectionId) -> bool {
        self.components.read().await.contains_key(&id)
    }

    /// Number of registered components
    pub async fn len(&self) -> usize {
        self.components.read().await.len()
    }

    /// Whether the registry is empty
    pub async fn is_empty(&self) -> bool {
        self.components.read().await.is_empty()
    }

    /// Ids of all currently registered connections
    pub async fn ids(&self) -> Vec<ConnectionId> {
        self.components.read().await.keys().copied().collect()
    }
}

//! Base endpoint
//!
//! Connection construction and teardown: id allocation, the connection
//! table, and the capacity limit. The splitter endpoint composes this and
//! layers registry and topology bookkeeping on top.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::config::EndpointConfig;
use super::error::EndpointError;
use crate::component::{ComponentId, MediaComponent};
use crate::connection::{Connection, ConnectionId, ConnectionType};

/// Connection factory and table shared by endpoint implementations
#[derive(Debug)]
pub struct BaseEndpoint {
    /// Endpoint name, for log context
    name: String,
    config: EndpointConfig,
    next_connection_id: AtomicU64,
    connections: RwLock<HashMap<ConnectionId, Arc<Connection>>>,
}

impl BaseEndpoint {
    /// Create a base endpoint with the given name and configuration
    pub fn new(name: impl Into<String>, config: EndpointConfig) -> Self {
        Self {
            name: name.into(),
            config,
            next_connection_id: AtomicU64::new(1),
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Endpoint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint configuration
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Construct a connection of the given type, capturing its media
    /// component.
    ///
    /// Fails with `ResourceUnavailable` when the connection limit is
    /// reached; nothing is constructed in that case.
    pub(crate) async fn build_connection(
        &self,
        kind: ConnectionType,
    ) -> Result<Arc<Connection>, EndpointError> {
        let mut connections = self.connections.write().await;

        let limit = self.config.max_connections;
        if limit > 0 && connections.len() >= limit {
            tracing::warn!(
                endpoint = %self.name,
                limit = limit,
                "Connection rejected: limit reached"
            );
            return Err(EndpointError::ResourceUnavailable { limit });
        }

        let id = ConnectionId(self.next_connection_id.fetch_add(1, Ordering::Relaxed));
        let component = Arc::new(MediaComponent::new(
            ComponentId(id.0),
            self.config.frame_queue_capacity,
        ));
        let connection = Arc::new(Connection::new(id, kind, component));
        connections.insert(id, Arc::clone(&connection));

        tracing::debug!(
            endpoint = %self.name,
            connection = %id,
            kind = %kind,
            total = connections.len(),
            "Connection constructed"
        );
        Ok(connection)
    }

    /// Tear down a connection: drop it from the table and discard any media
    /// still buffered in its component.
    ///
    /// Returns whether the connection was present; tearing down an unknown
    /// connection is a no-op.
    pub(crate) async fn teardown_connection(&self, id: ConnectionId) -> bool {
        let removed = self.connections.write().await.remove(&id);

        match removed {
            Some(connection) => {
                connection.component().reset();
                tracing::debug!(endpoint = %self.name, connection = %id, "Connection torn down");
                true
            }
            None => {
                tracing::debug!(
                    endpoint = %self.name,
                    connection = %id,
                    "Teardown of unknown connection ignored"
                );
                false
            }
        }
    }

    /// Look up a live connection
    pub async fn connection(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.read().await.get(&id).map(Arc::clone)
    }

    /// Number of live connections
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

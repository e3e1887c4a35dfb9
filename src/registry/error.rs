//! Registry error types
//!
//! Error types for component registry operations.

use crate::connection::ConnectionId;

/// Error type for registry operations
///
/// Both variants indicate a contract breach by the orchestration layer
/// (double-create or delete of an unknown connection), not a transient
/// condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A component is already registered under this connection id
    DuplicateRegistration(ConnectionId),
    /// No component is registered under this connection id
    NotFound(ConnectionId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DuplicateRegistration(id) => {
                write!(f, "Component already registered for connection {}", id)
            }
            RegistryError::NotFound(id) => {
                write!(f, "No component registered for connection {}", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

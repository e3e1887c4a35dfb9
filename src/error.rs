//! Crate-level error type
//!
//! Aggregates the module-level error enums behind one `Error` so callers
//! can use a single `Result` alias across the endpoint API.

use crate::endpoint::EndpointError;
use crate::registry::RegistryError;
use crate::splitter::TopologyError;

/// Result alias for endpoint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Endpoint-level failure (capacity, lifecycle)
    Endpoint(EndpointError),
    /// Component registry contract breach
    Registry(RegistryError),
    /// Splitter topology contract breach
    Topology(TopologyError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Endpoint(e) => write!(f, "Endpoint error: {}", e),
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Topology(e) => write!(f, "Topology error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Endpoint(e) => Some(e),
            Error::Registry(e) => Some(e),
            Error::Topology(e) => Some(e),
        }
    }
}

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self {
        Error::Endpoint(e)
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

impl From<TopologyError> for Error {
    fn from(e: TopologyError) -> Self {
        Error::Topology(e)
    }
}

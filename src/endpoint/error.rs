//! Endpoint error types

/// Error type for endpoint-level operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Connection capacity is exhausted; no connection was constructed
    ResourceUnavailable {
        /// Configured connection limit that was hit
        limit: usize,
    },
    /// `create_connection` was called before `start`
    NotStarted,
}

impl std::fmt::Display for EndpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointError::ResourceUnavailable { limit } => {
                write!(f, "Connection limit reached ({})", limit)
            }
            EndpointError::NotStarted => f.write_str("Endpoint not started"),
        }
    }
}

impl std::error::Error for EndpointError {}

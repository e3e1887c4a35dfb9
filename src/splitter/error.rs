//! Topology error types

use super::side::Side;
use crate::component::ComponentId;

/// Error type for splitter topology operations
///
/// Every variant is a caller error: the endpoint attached or released a
/// component against the wrong side, twice, or never. These are orchestration
/// defects and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The component is already a member of this side
    AlreadyAttached {
        /// Offending component
        component: ComponentId,
        /// Side the component is already on
        side: Side,
    },
    /// The component is not a member of this side
    NotAttached {
        /// Offending component
        component: ComponentId,
        /// Side that does not hold the component
        side: Side,
    },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::AlreadyAttached { component, side } => {
                write!(f, "Component {} already attached {}", component, side)
            }
            TopologyError::NotAttached { component, side } => {
                write!(f, "Component {} not attached {}", component, side)
            }
        }
    }
}

impl std::error::Error for TopologyError {}

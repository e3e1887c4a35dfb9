//! Splitter sides and side membership
//!
//! Each splitter keeps two unordered component sets, one per side. A
//! processing tick snapshots a side under the read lock and works on the
//! snapshot, so a component added or removed concurrently is simply present
//! or absent for that tick; no stronger consistency is needed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::TopologyError;
use crate::component::ComponentId;

/// Topology side of a splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Server-local, bridging components
    Inside,
    /// Wire-facing, remote-party components
    Outside,
}

impl Side {
    /// The side media fanned out from this side lands on
    pub fn opposite(self) -> Side {
        match self {
            Side::Inside => Side::Outside,
            Side::Outside => Side::Inside,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Inside => f.write_str("inside"),
            Side::Outside => f.write_str("outside"),
        }
    }
}

/// One side's component set, keyed by component identity
#[derive(Debug)]
pub(super) struct SideSet<C> {
    side: Side,
    members: RwLock<HashMap<ComponentId, Arc<C>>>,
}

impl<C> SideSet<C> {
    pub(super) fn new(side: Side) -> Self {
        Self {
            side,
            members: RwLock::new(HashMap::new()),
        }
    }

    /// Register a component on this side
    pub(super) async fn add(&self, id: ComponentId, component: Arc<C>) -> Result<(), TopologyError> {
        let mut members = self.members.write().await;

        if members.contains_key(&id) {
            return Err(TopologyError::AlreadyAttached {
                component: id,
                side: self.side,
            });
        }
        members.insert(id, component);
        Ok(())
    }

    /// Remove a component from this side
    pub(super) async fn release(&self, id: ComponentId) -> Result<Arc<C>, TopologyError> {
        self.members
            .write()
            .await
            .remove(&id)
            .ok_or(TopologyError::NotAttached {
                component: id,
                side: self.side,
            })
    }

    /// Clone out the current membership for one tick's processing
    pub(super) async fn snapshot(&self) -> Vec<Arc<C>> {
        self.members.read().await.values().map(Arc::clone).collect()
    }

    pub(super) async fn contains(&self, id: ComponentId) -> bool {
        self.members.read().await.contains_key(&id)
    }

    pub(super) async fn len(&self) -> usize {
        self.members.read().await.len()
    }
}

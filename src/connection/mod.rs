//! Connections attached to a splitter endpoint
//!
//! A connection is owned by the surrounding endpoint framework; the splitter
//! endpoint borrows its identity, type, mode, and media component for the
//! duration of its attachment. The type fixes which topology side the
//! connection's component lives on for its entire lifetime; only the mode
//! changes after creation.

pub mod mode;

pub use mode::{ConnectionMode, ModeContribution};

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::component::MediaComponent;

/// Unique identifier of a connection, stable for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which connection group a connection belongs to
///
/// The type selects the topology side at creation time and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    /// Wire-facing, remote-party connection
    Outside,
    /// Local, server-side bridging connection
    Inside,
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionType::Outside => f.write_str("outside"),
            ConnectionType::Inside => f.write_str("inside"),
        }
    }
}

/// A connection attached to the endpoint
///
/// The mode lives in a lock-free cell: per-connection operations are
/// serialized by the surrounding framework, but reads may come from any
/// thread.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    kind: ConnectionType,
    mode: AtomicU8,
    component: Arc<MediaComponent>,
    created_at: Instant,
}

impl Connection {
    pub(crate) fn new(
        id: ConnectionId,
        kind: ConnectionType,
        component: Arc<MediaComponent>,
    ) -> Self {
        Self {
            id,
            kind,
            mode: AtomicU8::new(ConnectionMode::Inactive.as_u8()),
            component,
            created_at: Instant::now(),
        }
    }

    /// Connection identity
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Connection group (fixed at creation)
    pub fn kind(&self) -> ConnectionType {
        self.kind
    }

    /// Current mode
    pub fn mode(&self) -> ConnectionMode {
        ConnectionMode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// The media component captured at creation
    pub fn component(&self) -> &Arc<MediaComponent> {
        &self.component
    }

    /// Time since the connection was created
    pub fn uptime(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Replace the mode, returning the previous one
    pub(crate) fn swap_mode(&self, mode: ConnectionMode) -> ConnectionMode {
        ConnectionMode::from_u8(self.mode.swap(mode.as_u8(), Ordering::AcqRel))
    }
}

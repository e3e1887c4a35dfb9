//! Connection modes and their aggregate contributions
//!
//! A connection's mode expresses its read/write/loopback intent. Each mode
//! maps to a fixed contribution vector over the endpoint's three aggregate
//! counters; mode transitions are accounted as signed deltas between the two
//! vectors, which keeps the aggregation rule a pure lookup instead of nested
//! branching.

/// Read/write/loopback intent of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ConnectionMode {
    /// No media flows in either direction
    #[default]
    Inactive = 0,
    /// The endpoint only reads media from the connection
    RecvOnly = 1,
    /// The endpoint only writes media to the connection
    SendOnly = 2,
    /// Full duplex
    SendRecv = 3,
    /// Full duplex conference leg (same contribution as [`SendRecv`](Self::SendRecv))
    Conference = 4,
    /// Diagnostic mode: suppresses normal fan-out while active
    Loopback = 5,
}

/// Per-counter contribution vector of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeContribution {
    /// Effective readers (connections the endpoint pulls media from)
    pub readers: i32,
    /// Effective writers (connections the endpoint pushes media to)
    pub writers: i32,
    /// Connections in loopback
    pub loopbacks: i32,
}

impl ModeContribution {
    /// Whether every counter contribution is zero
    pub fn is_zero(&self) -> bool {
        self.readers == 0 && self.writers == 0 && self.loopbacks == 0
    }
}

impl std::ops::Sub for ModeContribution {
    type Output = ModeContribution;

    fn sub(self, rhs: ModeContribution) -> ModeContribution {
        ModeContribution {
            readers: self.readers - rhs.readers,
            writers: self.writers - rhs.writers,
            loopbacks: self.loopbacks - rhs.loopbacks,
        }
    }
}

impl ConnectionMode {
    /// Contribution of this mode to the endpoint's aggregate counters
    pub fn contribution(self) -> ModeContribution {
        match self {
            ConnectionMode::Inactive => ModeContribution::default(),
            ConnectionMode::RecvOnly => ModeContribution {
                readers: 1,
                ..Default::default()
            },
            ConnectionMode::SendOnly => ModeContribution {
                writers: 1,
                ..Default::default()
            },
            ConnectionMode::SendRecv | ConnectionMode::Conference => ModeContribution {
                readers: 1,
                writers: 1,
                loopbacks: 0,
            },
            ConnectionMode::Loopback => ModeContribution {
                loopbacks: 1,
                ..Default::default()
            },
        }
    }

    /// Per-component direction gates: (read from connection, write to connection)
    pub fn io_flags(self) -> (bool, bool) {
        match self {
            ConnectionMode::Inactive | ConnectionMode::Loopback => (false, false),
            ConnectionMode::RecvOnly => (true, false),
            ConnectionMode::SendOnly => (false, true),
            ConnectionMode::SendRecv | ConnectionMode::Conference => (true, true),
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> ConnectionMode {
        match value {
            1 => ConnectionMode::RecvOnly,
            2 => ConnectionMode::SendOnly,
            3 => ConnectionMode::SendRecv,
            4 => ConnectionMode::Conference,
            5 => ConnectionMode::Loopback,
            // Stray discriminants contribute nothing
            _ => ConnectionMode::Inactive,
        }
    }
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionMode::Inactive => "inactive",
            ConnectionMode::RecvOnly => "recv-only",
            ConnectionMode::SendOnly => "send-only",
            ConnectionMode::SendRecv => "send-recv",
            ConnectionMode::Conference => "conference",
            ConnectionMode::Loopback => "loopback",
        };
        f.write_str(name)
    }
}

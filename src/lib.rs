//! # mediasplit
//!
//! Splitter endpoint library for bridging audio and out-of-band media
//! between two connection groups: inside (server-local, bridging) and
//! outside (wire-facing, remote-party).
//!
//! The endpoint owns the unit of media topology: it registers each
//! connection's media component, attaches it to the topology side fixed by
//! the connection's type, and converts per-connection mode transitions into
//! a global start/stop decision for the splitter pair. Fan-out runs only
//! while there is at least one effective reader and one effective writer and
//! no loopback override.
//!
//! # Architecture
//!
//! ```text
//!   create / delete / set_connection_mode
//!                  │
//!                  ▼
//!          SplitterEndpoint ──── ModeAggregator (readers/writers/loopbacks)
//!            │          │                 │
//!            ▼          ▼                 ▼ start/stop
//!   ComponentRegistry  SplitterTopology ◄─┘
//!   (id → component)     ├─ AudioSplitter  (inside ⇄ outside, mixing)
//!                        └─ OobSplitter    (inside ⇄ outside, forwarding)
//!                                 ▲
//!                          Scheduler ticks
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mediasplit::{ConnectionMode, ConnectionType, SplitterEndpoint};
//!
//! # async fn run() -> mediasplit::Result<()> {
//! let endpoint = SplitterEndpoint::with_defaults("bridge-0");
//! endpoint.start();
//!
//! let outside = endpoint.create_connection(ConnectionType::Outside).await?;
//! let inside = endpoint.create_connection(ConnectionType::Inside).await?;
//!
//! endpoint.set_connection_mode(&outside, ConnectionMode::SendRecv);
//! endpoint.set_connection_mode(&inside, ConnectionMode::SendRecv);
//! assert!(endpoint.is_active());
//!
//! endpoint.delete_connection(&outside).await?;
//! endpoint.delete_connection(&inside).await?;
//! endpoint.stop();
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod media;
pub mod registry;
pub mod scheduler;
pub mod splitter;
pub mod stats;

pub use component::{AudioComponent, ComponentId, MediaComponent, OobComponent};
pub use connection::{Connection, ConnectionId, ConnectionMode, ConnectionType};
pub use endpoint::{AggregateTotals, EndpointConfig, SplitterEndpoint};
pub use error::{Error, Result};
pub use media::{AudioFrame, OobFrame};
pub use registry::ComponentRegistry;
pub use scheduler::Scheduler;
pub use splitter::{AudioSplitter, OobSplitter, Side, SplitterTopology};
pub use stats::EndpointStats;

//! Splitter endpoint
//!
//! The orchestration layer: connection construction and teardown, component
//! registration, topology attachment by connection type, and the
//! mode-aggregation state machine that starts and stops the splitter pair.

pub mod aggregator;
pub mod base;
pub mod config;
pub mod error;
pub mod splitter;

pub use aggregator::{AggregateTotals, ModeAggregator};
pub use base::BaseEndpoint;
pub use config::EndpointConfig;
pub use error::EndpointError;
pub use splitter::SplitterEndpoint;

//! Component registry
//!
//! The registry maps each attached connection to its media component so the
//! endpoint can recover the component at deletion time and release it from
//! the topology.
//!
//! # Invariant
//!
//! An entry exists if and only if the connection is currently attached to
//! the endpoint; at most one entry per connection id. The endpoint treats
//! registry presence as the source of truth for topology attachment.

pub mod error;
pub mod store;

pub use error::RegistryError;
pub use store::ComponentRegistry;

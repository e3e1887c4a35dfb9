//! Media handling for the splitter endpoint
//!
//! This module provides:
//! - PCM audio frame and out-of-band event frame types
//! - Linear mixing of simultaneous audio contributors

pub mod frame;
pub mod mix;

pub use frame::{AudioFrame, OobFrame};
pub use mix::mix_frames;

//! Media frame types routed through the splitters
//!
//! This module defines the frames exchanged between connection components
//! and the splitters: PCM audio frames and out-of-band event frames.

use bytes::Bytes;

/// An audio frame carrying signed 16-bit little-endian PCM samples
///
/// Designed to be cheap to clone due to `Bytes` reference counting: a frame
/// fanned out to many components shares one allocation.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Timestamp in milliseconds
    pub timestamp: u32,
    /// Sample data, i16 LE (zero-copy via reference counting)
    pub data: Bytes,
}

impl AudioFrame {
    /// Create an audio frame from raw sample bytes
    pub fn new(timestamp: u32, data: Bytes) -> Self {
        Self { timestamp, data }
    }

    /// Create an audio frame by encoding a slice of samples
    pub fn from_samples(timestamp: u32, samples: &[i16]) -> Self {
        let mut data = Vec::with_capacity(samples.len() * 2);
        for sample in samples {
            data.extend_from_slice(&sample.to_le_bytes());
        }
        Self {
            timestamp,
            data: Bytes::from(data),
        }
    }

    /// Number of complete samples in the frame
    pub fn sample_count(&self) -> usize {
        self.data.len() / 2
    }

    /// Iterate over the decoded samples
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.data
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
    }

    /// Decode all samples into a vector
    pub fn to_samples(&self) -> Vec<i16> {
        self.samples().collect()
    }
}

/// An out-of-band event frame (e.g. telephony event signaling)
///
/// The payload is opaque to the splitter: OOB frames are forwarded to the
/// opposite side verbatim, never mixed.
#[derive(Debug, Clone)]
pub struct OobFrame {
    /// Timestamp in milliseconds
    pub timestamp: u32,
    /// Event payload (zero-copy via reference counting)
    pub data: Bytes,
}

impl OobFrame {
    /// Create an out-of-band frame
    pub fn new(timestamp: u32, data: Bytes) -> Self {
        Self { timestamp, data }
    }
}

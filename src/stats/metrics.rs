//! Statistics for a splitter endpoint

/// Point-in-time endpoint statistics
#[derive(Debug, Clone, Default)]
pub struct EndpointStats {
    /// Endpoint name
    pub name: String,
    /// Currently attached connections
    pub connections: usize,
    /// Effective readers under current modes
    pub readers: i32,
    /// Effective writers under current modes
    pub writers: i32,
    /// Connections currently in loopback
    pub loopbacks: i32,
    /// Whether the splitter pair is processing
    pub splitters_active: bool,
    /// Audio frames delivered to components so far
    pub audio_frames_relayed: u64,
    /// Out-of-band events delivered to components so far
    pub oob_frames_relayed: u64,
}

impl EndpointStats {
    /// Whether no attached connection currently demands fan-out
    pub fn is_idle(&self) -> bool {
        self.readers == 0 && self.writers == 0 && self.loopbacks == 0
    }

    /// Total frames delivered across both channels
    pub fn frames_relayed(&self) -> u64 {
        self.audio_frames_relayed + self.oob_frames_relayed
    }
}

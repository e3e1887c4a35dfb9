//! Per-connection media components
//!
//! Every connection owns one [`MediaComponent`]: a pair of sub-components,
//! one for audio and one for the out-of-band event channel. The pair is
//! captured when the connection is created and attached as a unit to one
//! topology side; the two sub-components are what the splitters actually
//! poll and deliver to on each tick.

pub mod audio;
pub mod oob;
pub mod queue;

pub use audio::AudioComponent;
pub use oob::OobComponent;
pub use queue::FrameQueue;

use std::sync::Arc;

use crate::connection::ConnectionMode;

/// Identity of a media component within the endpoint
///
/// Shares its value with the owning connection's id; side sets are keyed on
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u64);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A connection's media component: audio plus out-of-band sub-components
///
/// Immutable for the connection's lifetime once captured; the sub-components
/// are shared with the splitter side sets via `Arc`.
#[derive(Debug)]
pub struct MediaComponent {
    id: ComponentId,
    audio: Arc<AudioComponent>,
    oob: Arc<OobComponent>,
}

impl MediaComponent {
    /// Create a media component with the given per-direction queue depth
    pub(crate) fn new(id: ComponentId, queue_capacity: usize) -> Self {
        Self {
            id,
            audio: Arc::new(AudioComponent::new(id, queue_capacity)),
            oob: Arc::new(OobComponent::new(id, queue_capacity)),
        }
    }

    /// Component identity
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The audio sub-component
    pub fn audio(&self) -> &Arc<AudioComponent> {
        &self.audio
    }

    /// The out-of-band sub-component
    pub fn oob(&self) -> &Arc<OobComponent> {
        &self.oob
    }

    /// Propagate a connection mode change to both sub-components' gates
    pub fn update_mode(&self, mode: ConnectionMode) {
        let (read, write) = mode.io_flags();
        self.audio.update_mode(read, write);
        self.oob.update_mode(read, write);
    }

    /// Discard all buffered media in both sub-components
    pub(crate) fn reset(&self) {
        self.audio.reset();
        self.oob.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::AudioFrame;

    #[test]
    fn test_sub_components_share_identity() {
        let component = MediaComponent::new(ComponentId(42), 4);

        assert_eq!(component.id(), ComponentId(42));
        assert_eq!(component.audio().id(), ComponentId(42));
        assert_eq!(component.oob().id(), ComponentId(42));
    }

    #[test]
    fn test_update_mode_gates_both_channels() {
        let component = MediaComponent::new(ComponentId(1), 4);

        component.update_mode(ConnectionMode::SendRecv);
        assert!(component.audio().should_read());
        assert!(component.audio().should_write());
        assert!(component.oob().should_read());
        assert!(component.oob().should_write());

        component.update_mode(ConnectionMode::Loopback);
        assert!(!component.audio().should_read());
        assert!(!component.audio().should_write());
        assert!(!component.oob().should_read());
        assert!(!component.oob().should_write());
    }

    #[test]
    fn test_reset_clears_buffered_media() {
        let component = MediaComponent::new(ComponentId(1), 4);
        component.audio().push(AudioFrame::from_samples(0, &[1]));

        component.reset();

        assert_eq!(component.audio().pending(), 0);
    }
}

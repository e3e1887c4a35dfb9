//! Per-connection audio component
//!
//! One audio component exists per connection. The connection's transport
//! pushes incoming media into it and drains delivered media out of it; the
//! splitter polls pending media from read-enabled components and offers mixed
//! media to write-enabled ones.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::component::queue::FrameQueue;
use crate::component::ComponentId;
use crate::media::AudioFrame;

/// Audio sub-component of a connection's media component
#[derive(Debug)]
pub struct AudioComponent {
    /// Component identity (shared with the owning media component)
    id: ComponentId,

    /// Whether the splitter may pull media from this component
    read_enabled: AtomicBool,

    /// Whether the splitter may deliver media to this component
    write_enabled: AtomicBool,

    /// Media arriving from the transport, pending splitter pickup
    input: FrameQueue<AudioFrame>,

    /// Media delivered by the splitter, pending transport pickup
    output: FrameQueue<AudioFrame>,
}

impl AudioComponent {
    /// Create a new audio component with the given per-direction queue depth
    pub(crate) fn new(id: ComponentId, queue_capacity: usize) -> Self {
        Self {
            id,
            read_enabled: AtomicBool::new(false),
            write_enabled: AtomicBool::new(false),
            input: FrameQueue::with_capacity(queue_capacity),
            output: FrameQueue::with_capacity(queue_capacity),
        }
    }

    /// Component identity
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Update the direction gates from the owning connection's mode
    pub fn update_mode(&self, read: bool, write: bool) {
        self.read_enabled.store(read, Ordering::Release);
        self.write_enabled.store(write, Ordering::Release);
    }

    /// Whether the splitter should pull media from this component this tick
    pub fn should_read(&self) -> bool {
        self.read_enabled.load(Ordering::Acquire)
    }

    /// Whether the splitter should deliver media to this component this tick
    pub fn should_write(&self) -> bool {
        self.write_enabled.load(Ordering::Acquire)
    }

    /// Transport side: enqueue media arriving from the connection
    pub fn push(&self, frame: AudioFrame) {
        self.input.push(frame);
    }

    /// Splitter side: take the next pending frame
    pub fn poll(&self) -> Option<AudioFrame> {
        self.input.poll()
    }

    /// Splitter side: deliver a mixed frame toward the connection
    pub fn offer(&self, frame: AudioFrame) {
        self.output.push(frame);
    }

    /// Transport side: drain the next delivered frame
    pub fn take(&self) -> Option<AudioFrame> {
        self.output.poll()
    }

    /// Number of frames awaiting splitter pickup
    pub fn pending(&self) -> usize {
        self.input.len()
    }

    /// Number of frames awaiting transport pickup
    pub fn delivered(&self) -> usize {
        self.output.len()
    }

    /// Discard all buffered media in both directions
    pub(crate) fn reset(&self) {
        self.input.clear();
        self.output.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component() -> AudioComponent {
        AudioComponent::new(ComponentId(7), 4)
    }

    #[test]
    fn test_gates_start_closed() {
        let c = component();
        assert!(!c.should_read());
        assert!(!c.should_write());
    }

    #[test]
    fn test_update_mode_toggles_gates() {
        let c = component();

        c.update_mode(true, false);
        assert!(c.should_read());
        assert!(!c.should_write());

        c.update_mode(false, true);
        assert!(!c.should_read());
        assert!(c.should_write());
    }

    #[test]
    fn test_push_then_poll() {
        let c = component();
        c.push(AudioFrame::from_samples(0, &[1, 2]));

        let frame = c.poll().unwrap();
        assert_eq!(frame.to_samples(), vec![1, 2]);
        assert!(c.poll().is_none());
    }

    #[test]
    fn test_offer_then_take() {
        let c = component();
        c.offer(AudioFrame::from_samples(20, &[3]));

        assert_eq!(c.delivered(), 1);
        let frame = c.take().unwrap();
        assert_eq!(frame.timestamp, 20);
        assert!(c.take().is_none());
    }

    #[test]
    fn test_reset_discards_both_directions() {
        let c = component();
        c.push(AudioFrame::from_samples(0, &[1]));
        c.offer(AudioFrame::from_samples(0, &[2]));

        c.reset();

        assert_eq!(c.pending(), 0);
        assert_eq!(c.delivered(), 0);
    }
}

//! Per-connection out-of-band component
//!
//! Mirror of the audio component for the event channel. Same queue and gate
//! discipline; the OOB splitter forwards frames instead of mixing them.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::component::queue::FrameQueue;
use crate::component::ComponentId;
use crate::media::OobFrame;

/// Out-of-band sub-component of a connection's media component
#[derive(Debug)]
pub struct OobComponent {
    id: ComponentId,
    read_enabled: AtomicBool,
    write_enabled: AtomicBool,
    input: FrameQueue<OobFrame>,
    output: FrameQueue<OobFrame>,
}

impl OobComponent {
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

    /// Whether the splitter should pull events from this component this tick
    pub fn should_read(&self) -> bool {
        self.read_enabled.load(Ordering::Acquire)
    }

    /// Whether the splitter should deliver events to this component this tick
    pub fn should_write(&self) -> bool {
        self.write_enabled.load(Ordering::Acquire)
    }

    /// Transport side: enqueue an event arriving from the connection
    pub fn push(&self, frame: OobFrame) {
        self.input.push(frame);
    }

    /// Splitter side: take the next pending event
    pub fn poll(&self) -> Option<OobFrame> {
        self.input.poll()
    }

    /// Splitter side: deliver a forwarded event toward the connection
    pub fn offer(&self, frame: OobFrame) {
        self.output.push(frame);
    }

    /// Transport side: drain the next delivered event
    pub fn take(&self) -> Option<OobFrame> {
        self.output.poll()
    }

    /// Number of events awaiting splitter pickup
    pub fn pending(&self) -> usize {
        self.input.len()
    }

    /// Number of events awaiting transport pickup
    pub fn delivered(&self) -> usize {
        self.output.len()
    }

    pub(crate) fn reset(&self) {
        self.input.clear();
        self.output.clear();
    }
}

//! Out-of-band splitter
//!
//! Same two-sided topology as the audio splitter, but event frames are
//! forwarded verbatim to every write-enabled component of the opposite side;
//! events are never mixed. All pending events are drained each tick.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::error::TopologyError;
use super::side::{Side, SideSet};
use crate::component::{ComponentId, OobComponent};

/// Two-sided out-of-band event fan-out stage
#[derive(Debug)]
pub struct OobSplitter {
    inside: SideSet<OobComponent>,
    outside: SideSet<OobComponent>,
    active: AtomicBool,
    frames_relayed: AtomicU64,
}

impl OobSplitter {
    /// Create an inactive splitter with empty sides
    pub fn new() -> Self {
        Self {
            inside: SideSet::new(Side::Inside),
            outside: SideSet::new(Side::Outside),
            active: AtomicBool::new(false),
            frames_relayed: AtomicU64::new(0),
        }
    }

    /// Register a component on the inside set
    pub async fn add_inside(&self, component: &Arc<OobComponent>) -> Result<(), TopologyError> {
        self.inside.add(component.id(), Arc::clone(component)).await
    }

    /// Register a component on the outside set
    pub async fn add_outside(&self, component: &Arc<OobComponent>) -> Result<(), TopologyError> {
        self.outside.add(component.id(), Arc::clone(component)).await
    }

    /// Remove a component from the inside set
    pub async fn release_inside(&self, component: &OobComponent) -> Result<(), TopologyError> {
        self.inside.release(component.id()).await.map(|_| ())
    }

    /// Remove a component from the outside set
    pub async fn release_outside(&self, component: &OobComponent) -> Result<(), TopologyError> {
        self.outside.release(component.id()).await.map(|_| ())
    }

    /// Begin processing on subsequent ticks; idempotent
    pub fn start(&self) {
        if !self.active.swap(true, Ordering::AcqRel) {
            tracing::debug!("OOB splitter started");
        }
    }

    /// Cease processing on subsequent ticks; idempotent
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            tracing::debug!("OOB splitter stopped");
        }
    }

    /// Whether the splitter processes ticks
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Total events delivered to components since construction
    pub fn frames_relayed(&self) -> u64 {
        self.frames_relayed.load(Ordering::Relaxed)
    }

    /// Whether the component is currently a member of the given side
    pub async fn is_attached(&self, side: Side, id: ComponentId) -> bool {
        self.side_set(side).contains(id).await
    }

    /// Number of components on the given side
    pub async fn member_count(&self, side: Side) -> usize {
        self.side_set(side).len().await
    }

    /// Run one processing tick: forward all pending events across both
    /// directions. No-op while inactive.
    pub async fn process_tick(&self) {
        if !self.is_active() {
            return;
        }

        let inside = self.inside.snapshot().await;
        let outside = self.outside.snapshot().await;

        self.relay(&inside, &outside);
        self.relay(&outside, &inside);
    }

    fn relay(&self, sources: &[Arc<OobComponent>], sinks: &[Arc<OobComponent>]) {
        for source in sources.iter().filter(|c| c.should_read()) {
            while let Some(frame) = source.poll() {
                for sink in sinks.iter().filter(|c| c.should_write()) {
                    sink.offer(frame.clone());
                    self.frames_relayed.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    fn side_set(&self, side: Side) -> &SideSet<OobComponent> {
        match side {
            Side::Inside => &self.inside,
            Side::Outside => &self.outside,
        }
    }
}

impl Default for OobSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::OobFrame;
    use bytes::Bytes;

    fn component(id: u64) -> Arc<OobComponent> {
        let c = Arc::new(OobComponent::new(ComponentId(id), 8));
        c.update_mode(true, true);
        c
    }

    fn event(timestamp: u32, payload: &'static [u8]) -> OobFrame {
        OobFrame::new(timestamp, Bytes::from_static(payload))
    }

    #[tokio::test]
    async fn test_forwards_every_pending_event() {
        let splitter = OobSplitter::new();
        let inside = component(1);
        let outside = component(2);
        splitter.add_inside(&inside).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        splitter.start();
        inside.push(event(0, b"dtmf:1"));
        inside.push(event(10, b"dtmf:2"));
        splitter.process_tick().await;

        assert_eq!(outside.take().unwrap().data, Bytes::from_static(b"dtmf:1"));
        assert_eq!(outside.take().unwrap().data, Bytes::from_static(b"dtmf:2"));
        assert!(outside.take().is_none());
        assert_eq!(splitter.frames_relayed(), 2);
    }

    #[tokio::test]
    async fn test_events_are_not_mixed() {
        let splitter = OobSplitter::new();
        let in_a = component(1);
        let in_b = component(2);
        let outside = component(3);
        splitter.add_inside(&in_a).await.unwrap();
        splitter.add_inside(&in_b).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        splitter.start();
        in_a.push(event(0, b"dtmf:1"));
        in_b.push(event(0, b"dtmf:5"));
        splitter.process_tick().await;

        // Both events arrive as distinct frames
        assert_eq!(outside.delivered(), 2);
    }

    #[tokio::test]
    async fn test_inactive_tick_moves_nothing() {
        let splitter = OobSplitter::new();
        let inside = component(1);
        let outside = component(2);
        splitter.add_inside(&inside).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        inside.push(event(0, b"dtmf:9"));
        splitter.process_tick().await;

        assert!(outside.take().is_none());
    }
}

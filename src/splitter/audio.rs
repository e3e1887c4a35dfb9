//! Audio splitter
//!
//! Fans audio from each side's read-enabled components to the opposite
//! side's write-enabled components, mixing when more than one component
//! contributes in the same direction. Activation is a flag checked at the
//! top of each tick: a `start` or `stop` is visible to the next tick as a
//! whole, never mid-fan-out.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::error::TopologyError;
use super::side::{Side, SideSet};
use crate::component::{AudioComponent, ComponentId};
use crate::media::mix_frames;

/// Two-sided audio fan-out and mixing stage
#[derive(Debug)]
pub struct AudioSplitter {
    inside: SideSet<AudioComponent>,
    outside: SideSet<AudioComponent>,
    active: AtomicBool,
    frames_relayed: AtomicU64,
}

impl AudioSplitter {
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
    pub async fn add_inside(&self, component: &Arc<AudioComponent>) -> Result<(), TopologyError> {
        self.inside.add(component.id(), Arc::clone(component)).await
    }

    /// Register a component on the outside set
    pub async fn add_outside(&self, component: &Arc<AudioComponent>) -> Result<(), TopologyError> {
        self.outside.add(component.id(), Arc::clone(component)).await
    }

    /// Remove a component from the inside set
    pub async fn release_inside(&self, component: &AudioComponent) -> Result<(), TopologyError> {
        self.inside.release(component.id()).await.map(|_| ())
    }

    /// Remove a component from the outside set
    pub async fn release_outside(&self, component: &AudioComponent) -> Result<(), TopologyError> {
        self.outside.release(component.id()).await.map(|_| ())
    }

    /// Begin processing on subsequent ticks; idempotent
    pub fn start(&self) {
        if !self.active.swap(true, Ordering::AcqRel) {
            tracing::debug!("Audio splitter started");
        }
    }

    /// Cease processing on subsequent ticks; idempotent
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            tracing::debug!("Audio splitter stopped");
        }
    }

    /// Whether the splitter processes ticks
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Total frames delivered to components since construction
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

    /// Run one processing tick: inside mixes toward outside, then outside
    /// toward inside. No-op while inactive.
    pub async fn process_tick(&self) {
        if !self.is_active() {
            return;
        }

        let inside = self.inside.snapshot().await;
        let outside = self.outside.snapshot().await;

        self.relay(&inside, &outside);
        self.relay(&outside, &inside);
    }

    fn relay(&self, sources: &[Arc<AudioComponent>], sinks: &[Arc<AudioComponent>]) {
        let frames: Vec<_> = sources
            .iter()
            .filter(|c| c.should_read())
            .filter_map(|c| c.poll())
            .collect();

        let Some(mixed) = mix_frames(&frames) else {
            return;
        };

        for sink in sinks.iter().filter(|c| c.should_write()) {
            sink.offer(mixed.clone());
            self.frames_relayed.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn side_set(&self, side: Side) -> &SideSet<AudioComponent> {
        match side {
            Side::Inside => &self.inside,
            Side::Outside => &self.outside,
        }
    }
}

impl Default for AudioSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::AudioFrame;

    fn component(id: u64) -> Arc<AudioComponent> {
        let c = Arc::new(AudioComponent::new(ComponentId(id), 8));
        c.update_mode(true, true);
        c
    }

    #[tokio::test]
    async fn test_start_stop_idempotent() {
        let splitter = AudioSplitter::new();
        assert!(!splitter.is_active());

        splitter.start();
        splitter.start();
        assert!(splitter.is_active());

        splitter.stop();
        splitter.stop();
        assert!(!splitter.is_active());
    }

    #[tokio::test]
    async fn test_inactive_tick_moves_nothing() {
        let splitter = AudioSplitter::new();
        let inside = component(1);
        let outside = component(2);
        splitter.add_inside(&inside).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        inside.push(AudioFrame::from_samples(0, &[1, 2]));
        splitter.process_tick().await;

        assert!(outside.take().is_none());
        // Pending media stays queued for when the splitter starts
        assert_eq!(inside.pending(), 1);
    }

    #[tokio::test]
    async fn test_fan_out_inside_to_outside() {
        let splitter = AudioSplitter::new();
        let inside = component(1);
        let out_a = component(2);
        let out_b = component(3);
        splitter.add_inside(&inside).await.unwrap();
        splitter.add_outside(&out_a).await.unwrap();
        splitter.add_outside(&out_b).await.unwrap();

        splitter.start();
        inside.push(AudioFrame::from_samples(20, &[7, 8]));
        splitter.process_tick().await;

        assert_eq!(out_a.take().unwrap().to_samples(), vec![7, 8]);
        assert_eq!(out_b.take().unwrap().to_samples(), vec![7, 8]);
        assert_eq!(splitter.frames_relayed(), 2);
    }

    #[tokio::test]
    async fn test_mixes_multiple_inside_contributors() {
        let splitter = AudioSplitter::new();
        let in_a = component(1);
        let in_b = component(2);
        let outside = component(3);
        splitter.add_inside(&in_a).await.unwrap();
        splitter.add_inside(&in_b).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        splitter.start();
        in_a.push(AudioFrame::from_samples(0, &[10, 10]));
        in_b.push(AudioFrame::from_samples(0, &[5, -5]));
        splitter.process_tick().await;

        assert_eq!(outside.take().unwrap().to_samples(), vec![15, 5]);
    }

    #[tokio::test]
    async fn test_relays_outside_to_inside_too() {
        let splitter = AudioSplitter::new();
        let inside = component(1);
        let outside = component(2);
        splitter.add_inside(&inside).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        splitter.start();
        outside.push(AudioFrame::from_samples(0, &[3]));
        splitter.process_tick().await;

        assert_eq!(inside.take().unwrap().to_samples(), vec![3]);
    }

    #[tokio::test]
    async fn test_skips_gated_components() {
        let splitter = AudioSplitter::new();
        let inside = component(1);
        let outside = component(2);
        // Outside leg is read-only: polled for media but never written to
        outside.update_mode(true, false);
        splitter.add_inside(&inside).await.unwrap();
        splitter.add_outside(&outside).await.unwrap();

        splitter.start();
        inside.push(AudioFrame::from_samples(0, &[1]));
        splitter.process_tick().await;

        assert!(outside.take().is_none());
    }

    #[tokio::test]
    async fn test_release_detaches_component() {
        let splitter = AudioSplitter::new();
        let inside = component(1);
        splitter.add_inside(&inside).await.unwrap();
        assert!(splitter.is_attached(Side::Inside, ComponentId(1)).await);

        splitter.release_inside(&inside).await.unwrap();
        assert!(!splitter.is_attached(Side::Inside, ComponentId(1)).await);

        let result = splitter.release_inside(&inside).await;
        assert!(matches!(result, Err(TopologyError::NotAttached { .. })));
    }
}

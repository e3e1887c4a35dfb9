//! Two-sided splitter topology
//!
//! The topology pairs one audio splitter with one out-of-band splitter.
//! Both share side membership decisions (a connection's component joins the
//! same side of each) and activation state (they are always started and
//! stopped together).
//!
//! # Architecture
//!
//! ```text
//!                      SplitterTopology
//!            ┌───────────────┬────────────────┐
//!            │ AudioSplitter │  OobSplitter   │
//!            │ inside outside│ inside outside │
//!            └───────┬───────┴───────┬────────┘
//!                    │ tick task     │ tick task
//!                    ▼               ▼
//!      poll read-enabled sources, mix / forward,
//!      offer to write-enabled sinks of the other side
//! ```
//!
//! Tick tasks are long-lived: `start`/`stop` toggle an activation gate the
//! tasks check each tick, so a transition is seen whole by the next tick and
//! never interrupts a fan-out midway. The tasks themselves are aborted when
//! the topology is dropped or shut down.

pub mod audio;
pub mod error;
pub mod oob;
pub mod side;

pub use audio::AudioSplitter;
pub use error::TopologyError;
pub use oob::OobSplitter;
pub use side::Side;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::component::MediaComponent;
use crate::scheduler::Scheduler;

/// The endpoint's audio + out-of-band splitter pair
#[derive(Debug)]
pub struct SplitterTopology {
    audio: Arc<AudioSplitter>,
    oob: Arc<OobSplitter>,
    tick_tasks: Vec<JoinHandle<()>>,
}

impl SplitterTopology {
    /// Construct both splitters and register their tick tasks with the
    /// scheduler.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(scheduler: &Scheduler) -> Self {
        let audio = Arc::new(AudioSplitter::new());
        let oob = Arc::new(OobSplitter::new());

        let audio_task = scheduler.spawn_periodic({
            let splitter = Arc::clone(&audio);
            move || {
                let splitter = Arc::clone(&splitter);
                async move { splitter.process_tick().await }
            }
        });
        let oob_task = scheduler.spawn_periodic({
            let splitter = Arc::clone(&oob);
            move || {
                let splitter = Arc::clone(&splitter);
                async move { splitter.process_tick().await }
            }
        });

        Self {
            audio,
            oob,
            tick_tasks: vec![audio_task, oob_task],
        }
    }

    /// The audio splitter
    pub fn audio(&self) -> &Arc<AudioSplitter> {
        &self.audio
    }

    /// The out-of-band splitter
    pub fn oob(&self) -> &Arc<OobSplitter> {
        &self.oob
    }

    /// Attach a connection's component parts to the given side of both
    /// splitters
    pub async fn attach(
        &self,
        side: Side,
        component: &MediaComponent,
    ) -> Result<(), TopologyError> {
        match side {
            Side::Outside => {
                self.audio.add_outside(component.audio()).await?;
                self.oob.add_outside(component.oob()).await?;
            }
            Side::Inside => {
                self.audio.add_inside(component.audio()).await?;
                self.oob.add_inside(component.oob()).await?;
            }
        }
        Ok(())
    }

    /// Release a connection's component parts from the given side of both
    /// splitters
    pub async fn release(
        &self,
        side: Side,
        component: &MediaComponent,
    ) -> Result<(), TopologyError> {
        match side {
            Side::Outside => {
                self.audio.release_outside(component.audio()).await?;
                self.oob.release_outside(component.oob()).await?;
            }
            Side::Inside => {
                self.audio.release_inside(component.audio()).await?;
                self.oob.release_inside(component.oob()).await?;
            }
        }
        Ok(())
    }

    /// Start both splitters; idempotent
    pub fn start(&self) {
        self.audio.start();
        self.oob.start();
    }

    /// Stop both splitters; idempotent
    pub fn stop(&self) {
        self.audio.stop();
        self.oob.stop();
    }

    /// Whether both splitters are active
    ///
    /// The pair always shares activation state, so this is equivalent to
    /// asking either one.
    pub fn is_active(&self) -> bool {
        self.audio.is_active() && self.oob.is_active()
    }

    /// Stop processing and abort the tick tasks
    pub fn shutdown(&self) {
        self.stop();
        for task in &self.tick_tasks {
            task.abort();
        }
    }
}

impl Drop for SplitterTopology {
    fn drop(&mut self) {
        for task in &self.tick_tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentId;
    use crate::connection::ConnectionMode;
    use crate::media::AudioFrame;
    use std::time::Duration;

    fn media_component(id: u64) -> MediaComponent {
        let component = MediaComponent::new(ComponentId(id), 8);
        component.update_mode(ConnectionMode::SendRecv);
        component
    }

    #[tokio::test]
    async fn test_attach_lands_on_same_side_of_both_splitters() {
        let topology = SplitterTopology::new(&Scheduler::default());
        let component = media_component(1);

        topology.attach(Side::Outside, &component).await.unwrap();

        assert!(topology.audio().is_attached(Side::Outside, ComponentId(1)).await);
        assert!(topology.oob().is_attached(Side::Outside, ComponentId(1)).await);
        assert!(!topology.audio().is_attached(Side::Inside, ComponentId(1)).await);
        assert!(!topology.oob().is_attached(Side::Inside, ComponentId(1)).await);
    }

    #[tokio::test]
    async fn test_release_clears_both_splitters() {
        let topology = SplitterTopology::new(&Scheduler::default());
        let component = media_component(1);

        topology.attach(Side::Inside, &component).await.unwrap();
        topology.release(Side::Inside, &component).await.unwrap();

        assert_eq!(topology.audio().member_count(Side::Inside).await, 0);
        assert_eq!(topology.oob().member_count(Side::Inside).await, 0);
    }

    #[tokio::test]
    async fn test_double_attach_is_rejected() {
        let topology = SplitterTopology::new(&Scheduler::default());
        let component = media_component(1);

        topology.attach(Side::Inside, &component).await.unwrap();
        let result = topology.attach(Side::Inside, &component).await;

        assert!(matches!(result, Err(TopologyError::AlreadyAttached { .. })));
    }

    #[tokio::test]
    async fn test_start_stop_applies_to_both() {
        let topology = SplitterTopology::new(&Scheduler::default());

        topology.start();
        assert!(topology.audio().is_active());
        assert!(topology.oob().is_active());
        assert!(topology.is_active());

        topology.stop();
        assert!(!topology.audio().is_active());
        assert!(!topology.oob().is_active());
        assert!(!topology.is_active());
    }

    #[tokio::test]
    async fn test_tick_task_drives_fan_out() {
        let topology = SplitterTopology::new(&Scheduler::new(Duration::from_millis(5)));
        let inside = media_component(1);
        let outside = media_component(2);
        topology.attach(Side::Inside, &inside).await.unwrap();
        topology.attach(Side::Outside, &outside).await.unwrap();

        topology.start();
        inside.audio().push(AudioFrame::from_samples(0, &[42]));

        tokio::time::sleep(Duration::from_millis(30)).await;

        let delivered = outside.audio().take().expect("frame should be relayed");
        assert_eq!(delivered.to_samples(), vec![42]);

        topology.shutdown();
    }
}

//! Splitter endpoint orchestration
//!
//! Ties the pieces together: connection construction through the base
//! endpoint, component registration, topology attachment by connection type,
//! and the mode-aggregation-driven activation of the splitter pair.

use std::sync::{Arc, OnceLock};

use super::aggregator::{AggregateTotals, ModeAggregator};
use super::base::BaseEndpoint;
use super::config::EndpointConfig;
use super::error::EndpointError;
use crate::connection::{Connection, ConnectionMode, ConnectionType};
use crate::error::Result;
use crate::registry::{ComponentRegistry, RegistryError};
use crate::scheduler::Scheduler;
use crate::splitter::{Side, SplitterTopology};
use crate::stats::EndpointStats;

/// Media endpoint that splits audio and out-of-band streams between its
/// inside and outside connection groups
///
/// Lifecycle events and mode changes flow in from the surrounding framework;
/// registry updates, aggregate accounting, and topology commands
/// (attach/detach/start/stop) flow out.
#[derive(Debug)]
pub struct SplitterEndpoint {
    base: BaseEndpoint,
    scheduler: Scheduler,
    registry: ComponentRegistry,
    aggregator: ModeAggregator,
    /// Built by `start()`; empty until then
    topology: OnceLock<SplitterTopology>,
}

impl SplitterEndpoint {
    /// Create an endpoint bound to the given scheduler
    pub fn new(name: impl Into<String>, config: EndpointConfig, scheduler: Scheduler) -> Self {
        Self {
            base: BaseEndpoint::new(name, config),
            scheduler,
            registry: ComponentRegistry::new(),
            aggregator: ModeAggregator::new(),
            topology: OnceLock::new(),
        }
    }

    /// Create an endpoint with default configuration and a scheduler running
    /// at the configured tick cadence
    pub fn with_defaults(name: impl Into<String>) -> Self {
        let config = EndpointConfig::default();
        let scheduler = Scheduler::new(config.tick_interval);
        Self::new(name, config, scheduler)
    }

    /// Endpoint name
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// The component registry
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The base endpoint (connection table)
    pub fn base(&self) -> &BaseEndpoint {
        &self.base
    }

    /// The splitter pair, if `start()` has run
    pub fn topology(&self) -> Option<&SplitterTopology> {
        self.topology.get()
    }

    /// Whether the splitter pair is currently processing
    pub fn is_active(&self) -> bool {
        self.topology.get().is_some_and(SplitterTopology::is_active)
    }

    /// Current aggregate counter totals
    pub fn totals(&self) -> AggregateTotals {
        self.aggregator.totals()
    }

    /// Build the splitter pair and register its tick tasks with the
    /// scheduler.
    ///
    /// Must run before any `create_connection` call; calling it again is a
    /// no-op. Must be called from within a tokio runtime.
    pub fn start(&self) {
        let topology = SplitterTopology::new(&self.scheduler);
        match self.topology.set(topology) {
            Ok(()) => {
                tracing::info!(
                    endpoint = %self.base.name(),
                    tick = ?self.scheduler.tick_interval(),
                    "Splitter endpoint started"
                );
            }
            Err(_) => {
                // Lost a start race or restarted; the standing topology wins
                // and the new one aborts its tasks on drop.
                tracing::debug!(endpoint = %self.base.name(), "Endpoint already started");
            }
        }
    }

    /// Stop processing and abort the splitter tick tasks
    pub fn stop(&self) {
        if let Some(topology) = self.topology.get() {
            topology.shutdown();
            tracing::info!(endpoint = %self.base.name(), "Splitter endpoint stopped");
        }
    }

    /// Create a connection of the given type and attach its media component
    /// to the matching topology side.
    ///
    /// Construction failures propagate unchanged and leave no side effects;
    /// a post-construction registration or attach failure is an internal
    /// invariant violation that is logged, unwound, and propagated.
    pub async fn create_connection(&self, kind: ConnectionType) -> Result<Arc<Connection>> {
        let topology = self.started_topology()?;

        let connection = self.base.build_connection(kind).await?;
        let component = Arc::clone(connection.component());

        if let Err(e) = self
            .registry
            .insert(connection.id(), Arc::clone(&component))
            .await
        {
            tracing::error!(
                endpoint = %self.base.name(),
                connection = %connection.id(),
                error = %e,
                "Registration failed on create; unwinding"
            );
            self.base.teardown_connection(connection.id()).await;
            return Err(e.into());
        }

        if let Err(e) = topology.attach(side_for(kind), &component).await {
            tracing::error!(
                endpoint = %self.base.name(),
                connection = %connection.id(),
                error = %e,
                "Topology attach failed on create; unwinding"
            );
            let _ = self.registry.remove(connection.id()).await;
            self.base.teardown_connection(connection.id()).await;
            return Err(e.into());
        }

        tracing::info!(
            endpoint = %self.base.name(),
            connection = %connection.id(),
            kind = %kind,
            "Connection attached"
        );
        Ok(connection)
    }

    /// Delete a connection: base teardown first, then registry removal and
    /// topology release.
    ///
    /// Deleting a connection whose registry entry is already gone (re-delete,
    /// or never created) tears down whatever is left and releases nothing;
    /// the registry-removal step alone is tolerated silently.
    pub async fn delete_connection(&self, connection: &Connection) -> Result<()> {
        let topology = self.started_topology()?;

        // Transport-level resources go away even if the release below fails
        self.base.teardown_connection(connection.id()).await;

        // A deleted connection no longer contributes to the aggregate
        self.apply_mode(connection, ConnectionMode::Inactive);

        match self.registry.remove(connection.id()).await {
            Ok(component) => {
                topology
                    .release(side_for(connection.kind()), &component)
                    .await?;
                tracing::info!(
                    endpoint = %self.base.name(),
                    connection = %connection.id(),
                    "Connection released"
                );
                Ok(())
            }
            Err(RegistryError::NotFound(id)) => {
                tracing::debug!(
                    endpoint = %self.base.name(),
                    connection = %id,
                    "Delete of unregistered connection; nothing to release"
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Set a connection's mode and account the transition
    ///
    /// The single entry point the surrounding framework calls whenever it
    /// assigns a connection mode.
    pub fn set_connection_mode(&self, connection: &Connection, mode: ConnectionMode) {
        self.apply_mode(connection, mode);
    }

    /// Account a mode transition and re-derive splitter activation.
    ///
    /// Counter updates are independent atomic adds; the decision combines
    /// this transition's fresh values with the current values of the other
    /// counters (see the aggregator's module docs for the accepted race
    /// window).
    pub fn on_mode_changed(&self, old: ConnectionMode, new: ConnectionMode) {
        let Some(totals) = self.aggregator.apply_transition(old, new) else {
            return;
        };

        let Some(topology) = self.topology.get() else {
            tracing::warn!(
                endpoint = %self.base.name(),
                "Mode change before start; no splitters to drive"
            );
            return;
        };

        if totals.should_activate() {
            topology.start();
        } else {
            topology.stop();
        }
    }

    /// Point-in-time endpoint statistics
    pub async fn stats(&self) -> EndpointStats {
        let totals = self.aggregator.totals();
        let (splitters_active, audio_frames_relayed, oob_frames_relayed) =
            match self.topology.get() {
                Some(t) => (
                    t.is_active(),
                    t.audio().frames_relayed(),
                    t.oob().frames_relayed(),
                ),
                None => (false, 0, 0),
            };

        EndpointStats {
            name: self.base.name().to_string(),
            connections: self.base.connection_count().await,
            readers: totals.readers,
            writers: totals.writers,
            loopbacks: totals.loopbacks,
            splitters_active,
            audio_frames_relayed,
            oob_frames_relayed,
        }
    }

    fn apply_mode(&self, connection: &Connection, mode: ConnectionMode) {
        let old = connection.swap_mode(mode);
        connection.component().update_mode(mode);

        if old != mode {
            tracing::debug!(
                endpoint = %self.base.name(),
                connection = %connection.id(),
                from = %old,
                to = %mode,
                "Mode changed"
            );
        }
        self.on_mode_changed(old, mode);
    }

    fn started_topology(&self) -> std::result::Result<&SplitterTopology, EndpointError> {
        self.topology.get().ok_or(EndpointError::NotStarted)
    }
}

fn side_for(kind: ConnectionType) -> Side {
    match kind {
        ConnectionType::Outside => Side::Outside,
        ConnectionType::Inside => Side::Inside,
    }
}

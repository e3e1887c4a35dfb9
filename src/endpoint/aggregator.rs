//! Mode aggregation
//!
//! Three independent atomic counters track, across all attached connections,
//! how many effective readers, writers, and loopback connections exist under
//! the current modes. A mode transition applies a signed delta per counter;
//! the post-update totals feed the splitter activation decision.
//!
//! The three counters deliberately do NOT form one atomic transaction: each
//! is updated with an independent add, and the decision combines the
//! just-updated value with the current values of the other two. Under
//! concurrent transitions on different connections this can transiently
//! mis-set activation; that window is the accepted cost of keeping the
//! mode-change path lock-free. Do not fold the counters behind a shared lock
//! without revisiting the concurrency contract.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::connection::ConnectionMode;

/// Post-update totals of the three aggregate counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateTotals {
    /// Effective readers
    pub readers: i32,
    /// Effective writers
    pub writers: i32,
    /// Connections in loopback
    pub loopbacks: i32,
}

impl AggregateTotals {
    /// The activation decision: fan-out runs only with at least one producer
    /// and one consumer and no loopback override.
    pub fn should_activate(&self) -> bool {
        self.loopbacks == 0 && self.readers > 0 && self.writers > 0
    }
}

/// Lock-free aggregation of per-connection mode contributions
#[derive(Debug, Default)]
pub struct ModeAggregator {
    readers: AtomicI32,
    writers: AtomicI32,
    loopbacks: AtomicI32,
}

impl ModeAggregator {
    /// Create an aggregator with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one connection's mode transition.
    ///
    /// Returns `None` when the transition changes no counter (a no-op such
    /// as send-recv → conference); otherwise applies each nonzero delta and
    /// returns the post-update totals.
    pub fn apply_transition(
        &self,
        old: ConnectionMode,
        new: ConnectionMode,
    ) -> Option<AggregateTotals> {
        let delta = new.contribution() - old.contribution();
        if delta.is_zero() {
            return None;
        }

        let loopbacks = Self::adjust(&self.loopbacks, delta.loopbacks);
        let readers = Self::adjust(&self.readers, delta.readers);
        let writers = Self::adjust(&self.writers, delta.writers);

        Some(AggregateTotals {
            readers,
            writers,
            loopbacks,
        })
    }

    /// Current totals (no update)
    pub fn totals(&self) -> AggregateTotals {
        AggregateTotals {
            readers: self.readers.load(Ordering::SeqCst),
            writers: self.writers.load(Ordering::SeqCst),
            loopbacks: self.loopbacks.load(Ordering::SeqCst),
        }
    }

    /// Apply a delta to one counter and return its post-update value; an
    /// untouched counter is read at its current value instead.
    fn adjust(counter: &AtomicI32, delta: i32) -> i32 {
        if delta != 0 {
            counter.fetch_add(delta, Ordering::SeqCst) + delta
        } else {
            counter.load(Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionMode::*;

    #[test]
    fn test_initial_totals_inactive() {
        let aggregator = ModeAggregator::new();
        let totals = aggregator.totals();

        assert_eq!(totals, AggregateTotals { readers: 0, writers: 0, loopbacks: 0 });
        assert!(!totals.should_activate());
    }

    #[test]
    fn test_duplex_connection_activates() {
        let aggregator = ModeAggregator::new();

        let totals = aggregator.apply_transition(Inactive, SendRecv).unwrap();
        assert_eq!(totals, AggregateTotals { readers: 1, writers: 1, loopbacks: 0 });
        assert!(totals.should_activate());
    }

    #[test]
    fn test_loopback_overrides_activation() {
        let aggregator = ModeAggregator::new();
        aggregator.apply_transition(Inactive, SendRecv).unwrap();

        let totals = aggregator.apply_transition(Inactive, Loopback).unwrap();
        assert_eq!(totals, AggregateTotals { readers: 1, writers: 1, loopbacks: 1 });
        assert!(!totals.should_activate());
    }

    #[test]
    fn test_no_op_transition_returns_none() {
        let aggregator = ModeAggregator::new();
        aggregator.apply_transition(Inactive, SendRecv).unwrap();

        assert!(aggregator.apply_transition(SendRecv, Conference).is_none());
        assert!(aggregator.apply_transition(Inactive, Inactive).is_none());
        // Counters untouched
        assert_eq!(aggregator.totals().readers, 1);
    }

    #[test]
    fn test_reader_without_writer_stays_inactive() {
        let aggregator = ModeAggregator::new();

        let totals = aggregator.apply_transition(Inactive, RecvOnly).unwrap();
        assert_eq!(totals, AggregateTotals { readers: 1, writers: 0, loopbacks: 0 });
        assert!(!totals.should_activate());
    }

    #[test]
    fn test_reader_plus_writer_activates() {
        let aggregator = ModeAggregator::new();
        aggregator.apply_transition(Inactive, RecvOnly).unwrap();

        let totals = aggregator.apply_transition(Inactive, SendOnly).unwrap();
        assert!(totals.should_activate());
    }

    #[test]
    fn test_matched_transitions_return_to_zero() {
        let aggregator = ModeAggregator::new();
        aggregator.apply_transition(Inactive, SendRecv).unwrap();
        aggregator.apply_transition(Inactive, Loopback).unwrap();
        aggregator.apply_transition(Loopback, RecvOnly).unwrap();

        aggregator.apply_transition(SendRecv, Inactive).unwrap();
        let totals = aggregator.apply_transition(RecvOnly, Inactive).unwrap();

        assert_eq!(totals, AggregateTotals { readers: 0, writers: 0, loopbacks: 0 });
        assert!(!totals.should_activate());
    }

    #[test]
    fn test_mode_swap_applies_both_sides_of_delta() {
        let aggregator = ModeAggregator::new();
        aggregator.apply_transition(Inactive, SendRecv).unwrap();

        // send-recv → loopback removes a reader and a writer and adds a loopback
        let totals = aggregator.apply_transition(SendRecv, Loopback).unwrap();
        assert_eq!(totals, AggregateTotals { readers: 0, writers: 0, loopbacks: 1 });
    }

    #[test]
    fn test_concurrent_transitions_balance_out() {
        use std::sync::Arc;
        use std::thread;

        let aggregator = Arc::new(ModeAggregator::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let aggregator = Arc::clone(&aggregator);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    let _ = aggregator.apply_transition(Inactive, SendRecv);
                    let _ = aggregator.apply_transition(SendRecv, Inactive);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            aggregator.totals(),
            AggregateTotals { readers: 0, writers: 0, loopbacks: 0 }
        );
    }
}

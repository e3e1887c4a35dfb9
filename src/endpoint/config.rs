//! Endpoint configuration

use std::time::Duration;

use crate::scheduler::DEFAULT_TICK_INTERVAL;

/// Endpoint configuration options
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Maximum concurrent connections (0 = unlimited)
    pub max_connections: usize,

    /// Tick cadence handed to the scheduler when none is supplied
    pub tick_interval: Duration,

    /// Per-direction frame queue depth of each media component
    pub frame_queue_capacity: usize,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            max_connections: 0, // Unlimited
            tick_interval: DEFAULT_TICK_INTERVAL,
            frame_queue_capacity: 16,
        }
    }
}

impl EndpointConfig {
    /// Set maximum connections
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the tick cadence
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the per-direction frame queue depth
    pub fn frame_queue_capacity(mut self, capacity: usize) -> Self {
        self.frame_queue_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EndpointConfig::default();

        assert_eq!(config.max_connections, 0);
        assert_eq!(config.tick_interval, Duration::from_millis(20));
        assert_eq!(config.frame_queue_capacity, 16);
    }

    #[test]
    fn test_builder_max_connections() {
        let config = EndpointConfig::default().max_connections(100);

        assert_eq!(config.max_connections, 100);
    }

    #[test]
    fn test_builder_tick_interval() {
        let config = EndpointConfig::default().tick_interval(Duration::from_millis(10));

        assert_eq!(config.tick_interval, Duration::from_millis(10));
    }

    #[test]
    fn test_builder_queue_capacity_floored_at_one() {
        let config = EndpointConfig::default().frame_queue_capacity(0);

        assert_eq!(config.frame_queue_capacity, 1);
    }

    #[test]
    fn test_builder_chaining() {
        let config = EndpointConfig::default()
            .max_connections(8)
            .tick_interval(Duration::from_millis(5))
            .frame_queue_capacity(4);

        assert_eq!(config.max_connections, 8);
        assert_eq!(config.tick_interval, Duration::from_millis(5));
        assert_eq!(config.frame_queue_capacity, 4);
    }
}

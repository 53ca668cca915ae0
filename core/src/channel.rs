//! Channel configuration for dispatcher/aggregator communication

/// Channel buffer configuration
///
/// The job queue is always sized to the concurrency level; only the results
/// queue (workers -> aggregator) is tunable.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    results_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            results_buffer: 10_000,
        }
    }
}

impl ChannelConfig {
    /// Set a custom results buffer size (clamped to at least 1)
    pub fn with_results_buffer(mut self, size: usize) -> Self {
        self.results_buffer = size.max(1);
        self
    }

    /// Results channel buffer size, never zero
    pub fn results_buffer(&self) -> usize {
        self.results_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_config_default() {
        let config = ChannelConfig::default();
        assert_eq!(config.results_buffer(), 10_000);
    }

    #[test]
    fn test_channel_config_builder() {
        let config = ChannelConfig::default().with_results_buffer(64);
        assert_eq!(config.results_buffer(), 64);

        let config = ChannelConfig::default().with_results_buffer(0);
        assert_eq!(config.results_buffer(), 1);
    }
}

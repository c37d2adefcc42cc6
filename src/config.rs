use std::time::Duration;

/// Fixed timeout for every request to the board
pub const HTTP_TIMEOUT: Duration = Duration::from_millis(1500);

/// Interval between version/camera metadata fetches
pub const METADATA_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Configuration for a [`BoardMonitor`](crate::BoardMonitor)
///
/// Defaults match a board manager running on the same host with its
/// standard port.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Board manager host
    pub host: String,

    /// Board manager port
    pub port: u16,

    /// Interval between state polls
    pub interval: Duration,

    /// Minimum score for a triple hit to raise the triple flag
    pub triple_min_score: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3180,
            interval: Duration::from_millis(1000),
            triple_min_score: 1,
        }
    }
}

impl MonitorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board manager host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the board manager port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the state polling interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the minimum score required for the triple flag
    pub fn with_triple_min_score(mut self, min_score: u32) -> Self {
        self.triple_min_score = min_score;
        self
    }
}

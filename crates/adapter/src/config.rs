//! Sink and collector configuration.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_QUEUE: usize = 64;

/// Where score records go, and how patiently.
///
/// The collector binds the same `host`/`port` the sink connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
    pub queue_capacity: usize,
    pub log_path: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            queue_capacity: DEFAULT_QUEUE,
            log_path: None,
        }
    }
}

impl SinkConfig {
    /// Create from `BOWLING_SINK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("BOWLING_SINK_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("BOWLING_SINK_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let timeout_ms = lookup("BOWLING_SINK_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.timeout_ms);
        let queue_capacity = lookup("BOWLING_SINK_QUEUE")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.queue_capacity);
        let log_path = lookup("BOWLING_SINK_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            timeout_ms,
            queue_capacity,
            log_path,
        }
    }

    /// Check if the sink is disabled via environment.
    pub fn is_disabled() -> bool {
        Self::disabled_by(|key| std::env::var(key).ok())
    }

    fn disabled_by(lookup: impl Fn(&str) -> Option<String>) -> bool {
        lookup("BOWLING_SINK_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// `host:port`, as passed to connect and bind.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

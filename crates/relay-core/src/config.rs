//! Runtime settings for the relay.

use std::time::Duration;

use crate::backoff::BackoffPolicy;

/// Everything needed to wire a relay against Redis and a publish endpoint.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Redis connection URL.
    pub redis_url: String,

    /// Redis list key holding pending messages.
    pub queue_name: String,

    /// Base publish URL; the channel is appended as a path segment.
    pub publish_base_url: String,

    /// Fixed delay between consumer cycles.
    pub poll_interval: Duration,

    /// HTTP request timeout for a single publish attempt.
    pub request_timeout: Duration,

    /// Backoff between failed publish attempts.
    pub backoff: BackoffPolicy,

    /// Maximum publish attempts per message before requeueing.
    pub max_attempts: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            queue_name: "outbound".to_string(),
            publish_base_url: "http://127.0.0.1:8080/publish".to_string(),
            poll_interval: Duration::from_millis(30),
            request_timeout: Duration::from_secs(30),
            backoff: BackoffPolicy::default(),
            max_attempts: 10,
        }
    }
}

//! PublishTransport port: delivers one payload to a named channel.

use async_trait::async_trait;

use crate::error::TransportError;

/// Request/response delivery of a payload to a publish destination.
#[async_trait]
pub trait PublishTransport: Send + Sync {
    /// Deliver `payload` to `channel`, returning the endpoint's response body.
    ///
    /// Any transport-level condition (connection failure, timeout,
    /// non-success status) is an error; the consumer treats every error as
    /// retryable.
    async fn publish(&self, payload: &str, channel: &str) -> Result<String, TransportError>;
}

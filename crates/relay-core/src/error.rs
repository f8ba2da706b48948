//! Error taxonomy for the relay.
//!
//! Three distinct failure families, handled very differently by the consumer:
//! - [`QueueStoreError`]: transient; the current cycle is aborted and the
//!   queue is left as-is.
//! - [`DecodeError`]: permanent; the message is dropped, never retried.
//! - [`TransportError`]: retryable; drives the backoff loop up to the
//!   attempt limit.

use thiserror::Error;

/// Failure talking to the queue backend (pop, push, size).
#[derive(Debug, Error)]
pub enum QueueStoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("queue backend error: {0}")]
    Backend(String),
}

/// A queue entry that cannot be turned into a publishable message.
///
/// Every variant is permanent: retrying the decode cannot succeed, so the
/// consumer drops the message instead of requeueing it.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("message is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message is not a json object")]
    NotAnObject,

    #[error("PAYLOAD field is missing")]
    MissingPayload,

    #[error("CHANNEL field is missing")]
    MissingChannel,

    #[error("CHANNEL field is not a string")]
    ChannelNotString,
}

/// Failure delivering a payload to the publish endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{0}")]
    Other(String),
}

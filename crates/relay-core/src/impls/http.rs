//! HTTP adapter for the publish transport port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::TransportError;
use crate::ports::PublishTransport;

/// Publishes payloads with `POST {base_url}/{channel}`.
pub struct HttpPublishTransport {
    client: Client,
    base_url: String,
}

impl HttpPublishTransport {
    /// Build a transport with the given base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, channel: &str) -> String {
        format!("{}/{}", self.base_url, channel)
    }
}

#[async_trait]
impl PublishTransport for HttpPublishTransport {
    async fn publish(&self, payload: &str, channel: &str) -> Result<String, TransportError> {
        let url = self.endpoint(channel);

        debug!(url = %url, "sending payload");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}

//! Relay binary entry point.
//!
//! Pops messages from a Redis list and republishes them to an HTTP pub/sub
//! endpoint, one message per cycle, with bounded exponential-backoff retry.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_core::{
    BackoffPolicy, Consumer, HttpPublishTransport, RedisQueueStore, RelayConfig, RelayWorker,
};

/// Queue-to-HTTP relay with at-least-once delivery.
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relays queued messages to an HTTP publish endpoint")]
struct Args {
    /// Redis connection URL.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    redis_url: String,

    /// Redis list key holding pending messages.
    #[arg(long, env = "RELAY_QUEUE", default_value = "outbound")]
    queue: String,

    /// Base publish URL; the channel is appended as a path segment.
    #[arg(long, env = "RELAY_PUBLISH_URL")]
    publish_url: String,

    /// Delay between consumer cycles, in milliseconds.
    #[arg(long, env = "RELAY_POLL_MS", default_value = "30")]
    poll_interval_ms: u64,

    /// Wait after the first failed publish attempt, in milliseconds.
    #[arg(long, default_value = "2000")]
    initial_backoff_ms: u64,

    /// Upper bound on any single backoff wait, in milliseconds.
    #[arg(long, default_value = "30000")]
    max_backoff_ms: u64,

    /// Backoff growth factor.
    #[arg(long, default_value = "1.5")]
    backoff_multiplier: f64,

    /// Publish attempts per message before requeueing.
    #[arg(long, default_value = "10")]
    max_attempts: u32,

    /// HTTP request timeout, in seconds.
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> RelayConfig {
        RelayConfig {
            redis_url: self.redis_url,
            queue_name: self.queue,
            publish_base_url: self.publish_url,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
            backoff: BackoffPolicy {
                initial_interval: Duration::from_millis(self.initial_backoff_ms),
                multiplier: self.backoff_multiplier,
                max_interval: Duration::from_millis(self.max_backoff_ms),
            },
            max_attempts: self.max_attempts,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();

    info!(
        redis_url = %config.redis_url,
        queue = %config.queue_name,
        publish_url = %config.publish_base_url,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        max_attempts = config.max_attempts,
        "relay starting"
    );

    let queue = Arc::new(RedisQueueStore::connect(&config.redis_url, &config.queue_name).await?);
    let transport = Arc::new(HttpPublishTransport::new(
        &config.publish_base_url,
        config.request_timeout,
    )?);

    let consumer = Consumer::from_config(&config, queue, transport);
    let worker = RelayWorker::spawn(consumer, config.poll_interval);

    tokio::signal::ctrl_c().await?;
    info!("received shutdown signal, finishing current cycle");
    worker.shutdown_and_join().await;

    Ok(())
}

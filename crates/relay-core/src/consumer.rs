//! The relay loop: dequeue, decode, publish with retry, requeue on exhaustion.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::backoff::BackoffPolicy;
use crate::config::RelayConfig;
use crate::message::DecodedMessage;
use crate::ports::{PublishTransport, QueueStore};

/// Processes one queue message per cycle.
///
/// All failures are contained here: nothing a single message does can
/// terminate the worker or block future cycles beyond that message's own
/// retry budget. `tick` is therefore infallible; failures surface in logs.
pub struct Consumer {
    queue: Arc<dyn QueueStore>,
    transport: Arc<dyn PublishTransport>,
    backoff: BackoffPolicy,
    max_attempts: u32,
}

impl Consumer {
    pub fn new(
        queue: Arc<dyn QueueStore>,
        transport: Arc<dyn PublishTransport>,
        backoff: BackoffPolicy,
        max_attempts: u32,
    ) -> Self {
        Self {
            queue,
            transport,
            backoff,
            max_attempts,
        }
    }

    /// Build a consumer from a config plus already-constructed ports.
    pub fn from_config(
        config: &RelayConfig,
        queue: Arc<dyn QueueStore>,
        transport: Arc<dyn PublishTransport>,
    ) -> Self {
        Self::new(
            queue,
            transport,
            config.backoff.clone(),
            config.max_attempts,
        )
    }

    /// Run exactly one cycle.
    ///
    /// Not re-entrant: the driver awaits each tick to completion before
    /// scheduling the next, so two ticks never overlap.
    pub async fn tick(&self) {
        let raw = match self.queue.pop_tail().await {
            Ok(Some(raw)) => raw,
            // Empty queue: nothing to do this cycle.
            Ok(None) => return,
            Err(e) => {
                // Transient; the queue is untouched and the next tick retries
                // the pop naturally.
                error!(error = %e, "failed to pop message from queue");
                return;
            }
        };

        debug!(raw = %raw, "popped message");

        let message = match DecodedMessage::decode(&raw) {
            Ok(message) => message,
            Err(e) => {
                // Deliberate data-loss policy: a malformed message can never
                // become deliverable, so it is dropped rather than requeued.
                error!(error = %e, raw = %raw, "dropping malformed message");
                return;
            }
        };

        if self
            .publish_with_retry(&message.payload, &message.channel)
            .await
        {
            return;
        }

        // Exhausted: put the original raw entry back at the queue head so it
        // is retried ahead of anything produced later.
        error!(channel = %message.channel, "delivery attempts exhausted, requeueing message");
        if let Err(e) = self.queue.push_head(&raw).await {
            // Accepted failure mode: the message is lost at this point.
            error!(error = %e, raw = %raw, "failed to requeue message, message lost");
        }
    }

    /// Attempt delivery up to `max_attempts` times with exponential backoff.
    ///
    /// Returns whether the payload was published. The sleep between attempts
    /// is deliberate backpressure: it serializes processing so a struggling
    /// destination is not hammered, at the cost of stalling the whole queue
    /// while one message retries.
    pub async fn publish_with_retry(&self, payload: &str, channel: &str) -> bool {
        let mut execution = self.backoff.start();

        for attempt in 1..=self.max_attempts {
            debug!(channel = %channel, attempt, "publishing message");

            match self.transport.publish(payload, channel).await {
                Ok(response) => {
                    if attempt > 1 {
                        info!(channel = %channel, attempt, "published after retries");
                    }
                    debug!(response = %response, "publish response");
                    return true;
                }
                Err(e) => {
                    let delay = execution.next_interval();
                    warn!(
                        channel = %channel,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "publish failed, backing off"
                    );
                    if let Ok(size) = self.queue.len().await {
                        debug!(queue_size = size, "pending messages behind this one");
                    }
                    tokio::time::sleep(delay).await;
                }
            }
        }

        false
    }
}

/// Handle for the spawned relay worker.
///
/// Dropping the handle without calling [`RelayWorker::shutdown_and_join`]
/// also stops the loop: the worker exits when the shutdown channel closes.
pub struct RelayWorker {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl RelayWorker {
    /// Spawn the fixed-delay driver around a consumer.
    ///
    /// One cycle runs to completion, then the loop sleeps `poll_interval`
    /// before the next cycle. Sequential awaiting is what guarantees the
    /// non-reentrancy contract of [`Consumer::tick`].
    pub fn spawn(consumer: Consumer, poll_interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            relay_loop(consumer, poll_interval, &mut shutdown_rx).await;
        });

        Self { shutdown_tx, join }
    }

    /// Request shutdown without waiting.
    ///
    /// The in-flight cycle, including any backoff sleeps, still runs to
    /// completion; shutdown is observed between cycles.
    pub fn request_shutdown(&self) {
        // ignore send error: the worker may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for the worker to finish its current cycle.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

async fn relay_loop(
    consumer: Consumer,
    poll_interval: Duration,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        consumer.tick().await;

        tokio::select! {
            changed = shutdown_rx.changed() => {
                // A closed channel means the handle is gone; stop either way.
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

//! Long-polling update stream.
//!
//! One background task calls `getUpdates` in a loop and forwards updates
//! in server order. Backpressure: the delivery queue is bounded and a full
//! queue blocks the loop, so updates are never dropped. Poll errors go to a
//! separate bounded queue and are dropped when it is full, so error
//! reporting never stalls delivery.

use std::time::Duration;
use tgbot_core::error::TgError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::BotApi;
use crate::types::Update;

/// A failed poll cycle.
#[derive(Debug)]
pub struct PollError {
    /// Offset the failed request was made with; the next poll reuses it.
    pub offset: i64,
    pub error: TgError,
}

/// Receiving side of a running update stream.
pub struct UpdateStream {
    pub updates: mpsc::Receiver<Update>,
    pub errors: mpsc::Receiver<PollError>,
    pub handle: PollHandle,
}

/// Controls the background poll task.
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Ask the poll loop to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the poll loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("update stream task failed: {e}");
        }
    }
}

impl BotApi {
    /// Start polling from `initial_offset` on a background task.
    ///
    /// The loop runs until `cancel` fires or `updates` is dropped. Must be
    /// called from within a tokio runtime.
    pub fn stream_updates(
        &self,
        initial_offset: i64,
        timeout_secs: u64,
        cancel: CancellationToken,
    ) -> UpdateStream {
        let (tx, updates) = mpsc::channel(self.queue_capacity);
        let (err_tx, errors) = mpsc::channel(self.error_capacity);

        let api = self.clone();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            api.poll_loop(initial_offset, timeout_secs, tx, err_tx, token)
                .await;
        });

        UpdateStream {
            updates,
            errors,
            handle: PollHandle { cancel, task },
        }
    }

    async fn poll_loop(
        self,
        mut offset: i64,
        timeout_secs: u64,
        tx: mpsc::Sender<Update>,
        err_tx: mpsc::Sender<PollError>,
        cancel: CancellationToken,
    ) {
        info!("telegram update stream starting at offset {offset}");

        'poll: loop {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break 'poll,
                _ = tx.closed() => {
                    info!("update receiver dropped, stopping poll");
                    break 'poll;
                }
                r = self.fetch_updates(offset, timeout_secs) => r,
            };

            match fetched {
                Ok(updates) => {
                    for update in updates {
                        let next = update.update_id.saturating_add(1);
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => break 'poll,
                            sent = tx.send(update) => {
                                if sent.is_err() {
                                    info!("update receiver dropped, stopping poll");
                                    break 'poll;
                                }
                            }
                        }
                        offset = offset.max(next);
                    }
                }
                Err(error) => {
                    warn!(
                        "telegram poll error at offset {offset} (retry in {:?}): {error}",
                        self.poll_interval
                    );
                    if err_tx.try_send(PollError { offset, error }).is_err() {
                        debug!("poll error not reported: error queue full or closed");
                    }
                }
            }

            if !sleep_or_stop(self.poll_interval, &cancel, &tx).await {
                break;
            }
        }

        info!("telegram update stream stopped at offset {offset}");
    }
}

/// Sleep for `period`. Returns `false` if cancelled or the update receiver
/// is dropped first.
async fn sleep_or_stop(
    period: Duration,
    cancel: &CancellationToken,
    tx: &mpsc::Sender<Update>,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tx.closed() => false,
        _ = tokio::time::sleep(period) => true,
    }
}

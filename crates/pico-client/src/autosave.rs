//! Debounced autosave.
//!
//! An [`Autosaver`] watches a [`BlockList`](pico_core::BlockList) change feed
//! and saves the latest snapshot once edits have stopped for the configured
//! delay. Every edit restarts the timer, so a burst of keystrokes becomes a
//! single save. Failures are kept as text in [`SaveStatus::Failed`]; there is
//! no retry until the next edit.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut list = BlockList::from_blocks(client.fetch().await?);
//! let saver = Autosaver::spawn(Arc::new(client), DEFAULT_DELAY, list.subscribe());
//!
//! list.create(Block::empty());
//! saver.flush().await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pico_core::{Block, relative_time};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{Error, Result};

/// Quiet period before an edit is saved.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

// ============================================================================
// SaveTarget
// ============================================================================

/// Somewhere a full snapshot can be saved.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    /// Persist the blocks, replacing whatever was saved before.
    async fn save_blocks(&self, blocks: &[Block]) -> Result<()>;
}

// ============================================================================
// SaveStatus
// ============================================================================

/// Where the autosaver is in its cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveStatus {
    /// Nothing edited since start.
    Idle,
    /// Edits are waiting for the timer.
    Pending,
    /// A save request is in flight.
    Saving,
    /// The last save succeeded.
    Saved {
        /// When it completed.
        at: DateTime<Utc>,
    },
    /// The last save failed with this message.
    Failed(String),
}

impl SaveStatus {
    /// Returns `true` if nothing is waiting to be saved or in flight.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Idle | Self::Saved { .. } | Self::Failed(_))
    }

    /// The inline status line, with relative time for saved states.
    pub fn describe(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Pending => "Unsaved changes".to_string(),
            Self::Saving => "Saving…".to_string(),
            Self::Saved { at } => format!("Saved {}", relative_time(*at, now)),
            Self::Failed(message) => message.clone(),
        }
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
            Self::Saving => write!(f, "saving"),
            Self::Saved { at } => write!(f, "saved at {}", at.to_rfc3339()),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ============================================================================
// Autosaver
// ============================================================================

/// Handle to a background autosave task.
///
/// Dropping the handle detaches the task, which saves any pending edit and
/// exits. Use [`finish`](Self::finish) to wait for that.
pub struct Autosaver {
    status: watch::Receiver<SaveStatus>,
    flush_tx: mpsc::Sender<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Autosaver {
    /// Start saving snapshots from `changes` to `target`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn spawn(
        target: Arc<dyn SaveTarget>,
        delay: Duration,
        changes: watch::Receiver<Vec<Block>>,
    ) -> Self {
        let (status_tx, status) = watch::channel(SaveStatus::Idle);
        let (flush_tx, flush_rx) = mpsc::channel(4);
        let task = tokio::spawn(run(target, delay, changes, status_tx, flush_rx));
        Self {
            status,
            flush_tx,
            task,
        }
    }

    /// Current status.
    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    /// Save pending edits now instead of waiting for the timer.
    ///
    /// Returns once the save attempt has finished (or immediately if nothing
    /// was pending). A failed save is reported through the status, not here.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.flush_tx
            .send(ack_tx)
            .await
            .map_err(|_| Error::AutosaverStopped)?;
        ack_rx.await.map_err(|_| Error::AutosaverStopped)
    }

    /// Flush, stop the task, and return the final status.
    pub async fn finish(self) -> SaveStatus {
        if let Err(e) = self.flush().await {
            tracing::debug!(error = %e, "Autosaver already stopped");
        }
        let Self {
            status,
            flush_tx,
            task,
        } = self;
        drop(flush_tx);
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Autosave task panicked");
        }
        status.borrow().clone()
    }
}

impl fmt::Debug for Autosaver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autosaver")
            .field("status", &self.status())
            .finish()
    }
}

async fn run(
    target: Arc<dyn SaveTarget>,
    delay: Duration,
    mut changes: watch::Receiver<Vec<Block>>,
    status: watch::Sender<SaveStatus>,
    mut flush_rx: mpsc::Receiver<oneshot::Sender<()>>,
) {
    let mut pending = false;

    loop {
        if !pending {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    pending = true;
                    status.send_replace(SaveStatus::Pending);
                }
                ack = flush_rx.recv() => match ack {
                    Some(ack) => {
                        if changes.borrow().has_changed() {
                            save_latest(target.as_ref(), &mut changes, &status).await;
                        }
                        let _ = ack.send(());
                    }
                    None => break,
                },
            }
            continue;
        }

        // Each pass creates a fresh timer, so any edit restarts the wait.
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    save_latest(target.as_ref(), &mut changes, &status).await;
                    break;
                }
            }
            _ = tokio::time::sleep(delay) => {
                save_latest(target.as_ref(), &mut changes, &status).await;
                pending = false;
            }
            ack = flush_rx.recv() => {
                save_latest(target.as_ref(), &mut changes, &status).await;
                pending = false;
                match ack {
                    Some(ack) => {
                        let _ = ack.send(());
                    }
                    None => break,
                }
            }
        }
    }

    tracing::debug!("Autosave task stopped");
}

async fn save_latest(
    target: &dyn SaveTarget,
    changes: &mut watch::Receiver<Vec<Block>>,
    status: &watch::Sender<SaveStatus>,
) {
    let snapshot = changes.borrow_and_update().clone();
    status.send_replace(SaveStatus::Saving);

    match target.save_blocks(&snapshot).await {
        Ok(()) => {
            tracing::debug!(count = snapshot.len(), "Autosaved");
            status.send_replace(SaveStatus::Saved { at: Utc::now() });
        }
        Err(e) => {
            tracing::warn!(error = %e, "Autosave failed");
            status.send_replace(SaveStatus::Failed(e.to_string()));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

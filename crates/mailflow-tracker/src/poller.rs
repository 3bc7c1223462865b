//! Notification poller for tracked operations.
//!
//! For each watched subject, a background task polls the notifications feed
//! on a fixed interval, applies the status reducer, and writes the terminal
//! status through the store. Each subject gets an independent loop; the
//! store is the only shared state.
//!
//! The fetch is awaited inside the tick, so at most one request per subject
//! is ever in flight and results are processed strictly in issue order. A
//! slow fetch delays the next tick rather than overlapping it.

use crate::error::{Result, TrackerError};
use crate::record::{OperationKind, OperationRecord, OperationStatus};
use crate::reducer;
use crate::store::OperationStore;
use mailflow_api::notifications::NotificationsFeed;
use mailflow_api::submit::ProcessingAck;
use mailflow_core::{PollingConfig, SubjectId, Timestamp};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polling behavior settings.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between feed polls
    pub interval: Duration,
    /// Poll attempts before a pending operation is force-failed.
    /// The default bounds polling at roughly three minutes.
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 36,
        }
    }
}

impl From<&PollingConfig> for PollerConfig {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            max_attempts: config.max_attempts,
        }
    }
}

/// Handle to a running poll loop.
///
/// The loop stops on its own once the record reaches a terminal state, is
/// dismissed, or the attempt budget runs out. Callers tearing down a view
/// can stop it earlier and deterministically via [`PollHandle::stop`].
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Cancel the poll loop. Idempotent; the record keeps whatever status
    /// it had when the loop stopped.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the poll loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poll loop to exit.
    pub async fn wait(self) {
        // The loop never panics in normal operation; a cancelled or
        // panicked task is still "finished" for the caller.
        let _ = self.task.await;
    }
}

/// Polls the notifications feed for in-flight operations.
pub struct NotificationPoller {
    feed: Arc<dyn NotificationsFeed>,
    store: OperationStore,
    config: PollerConfig,
}

impl NotificationPoller {
    /// Create a poller over the given feed and store with default settings.
    #[must_use]
    pub fn new(feed: Arc<dyn NotificationsFeed>, store: OperationStore) -> Self {
        Self {
            feed,
            store,
            config: PollerConfig::default(),
        }
    }

    /// Override the polling settings.
    #[must_use]
    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    /// The store this poller writes through.
    #[must_use]
    pub fn store(&self) -> &OperationStore {
        &self.store
    }

    /// Start tracking a freshly acknowledged job and watch it.
    ///
    /// Inserts the operation record derived from the acknowledgment, then
    /// starts the poll loop for its subject. Call this only for
    /// asynchronous acknowledgments; synchronous results need no tracking.
    ///
    /// # Errors
    /// Returns [`TrackerError::MissingSubject`] if the acknowledgment
    /// carries no campaign or research id to correlate notifications with.
    pub fn track(&self, ack: &ProcessingAck, kind: OperationKind) -> Result<PollHandle> {
        let subject_id = ack.subject_id().ok_or_else(|| TrackerError::MissingSubject {
            token: ack.token.clone(),
        })?;

        self.store
            .add(OperationRecord::new(ack.token.clone(), subject_id, kind));

        Ok(self.watch(subject_id))
    }

    /// Watch an already-tracked subject.
    ///
    /// Spawns the poll loop and returns its handle. Watching a subject with
    /// no record exits on the first tick.
    #[must_use]
    pub fn watch(&self, subject_id: SubjectId) -> PollHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(
            Arc::clone(&self.feed),
            self.store.clone(),
            self.config.clone(),
            subject_id,
            cancel.clone(),
        ));

        PollHandle { cancel, task }
    }
}

async fn poll_loop(
    feed: Arc<dyn NotificationsFeed>,
    store: OperationStore,
    config: PollerConfig,
    subject_id: SubjectId,
    cancel: CancellationToken,
) {
    let mut ticks = interval_at(Instant::now() + config.interval, config.interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempts: u32 = 0;

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(%subject_id, "polling cancelled");
                return;
            }
            _ = ticks.tick() => {}
        }

        let Some(record) = store.get(subject_id) else {
            debug!(%subject_id, "record dismissed, stopping poll");
            return;
        };
        if record.status.is_terminal() {
            debug!(%subject_id, status = %record.status, "record already terminal, stopping poll");
            return;
        }

        attempts += 1;

        match feed.fetch_notifications().await {
            Ok(notifications) => {
                if let Some(next) = reducer::next_status(&record, &notifications) {
                    store.update_status(subject_id, next, Some(Timestamp::now()));
                    info!(%subject_id, status = %next, attempts, "operation resolved");
                    return;
                }
            }
            Err(e) => {
                // Transient; the next tick retries
                warn!(%subject_id, error = %e, "notification poll failed");
            }
        }

        if attempts >= config.max_attempts {
            // No terminal notification within the budget. Conservatively
            // treat the operation as failed even though the server-side job
            // may still finish.
            store.update_status(subject_id, OperationStatus::Failed, Some(Timestamp::now()));
            warn!(%subject_id, attempts, "operation timed out waiting for a notification");
            return;
        }
    }
}

//! Bulk-upload job monitor: submission, status polling, and control actions.
//!
//! The monitor mirrors the server's job state without owning it. It tracks at
//! most one job at a time, polls on a fixed cadence with one outstanding
//! fetch per tick, and survives restarts through the stored job id.
//!
//! Responses are applied by sequence number: a snapshot is only accepted if
//! it is newer than the last one applied, so a slow fetch can never overwrite
//! fresher data.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::bulk::{self, BulkJobSnapshot, JobStatus};
use crate::api::ApiClient;
use crate::error::AppError;
use crate::monitor::batch::PendingBatch;
use crate::storage::SessionStore;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed polling period. The first fetch happens immediately on entering
/// `Polling`; this is the spacing between subsequent fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Consecutive fetch failures tolerated before the tracking session is
/// abandoned and the stored job id cleared.
const MAX_CONSECUTIVE_POLL_FAILURES: u32 = 3;

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

/// Client-observed lifecycle of the tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Nothing tracked; a new batch may be submitted.
    NoJob,
    /// Observing an in-flight job.
    Polling(i64),
    /// The job reached `completed` or `failed`; a new batch may be submitted.
    Terminal(i64),
}

/// Result of one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No job is being tracked.
    Idle,
    /// A fresh snapshot was applied.
    Updated,
    /// The response was older than the last applied snapshot and was discarded.
    Stale,
    /// The job reached a terminal status; polling stops.
    Terminal(JobStatus),
    /// The fetch failed; the monitor will retry on the next tick.
    Failed { consecutive: u32 },
    /// Too many consecutive failures; the job id was abandoned.
    Abandoned,
}

// ─────────────────────────────────────────────────────────────────────────────
// JobMonitor
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks one bulk-upload job against the backend.
pub struct JobMonitor {
    api: ApiClient,
    session: SessionStore,
    poll_interval: Duration,
    cancel: CancellationToken,
    state: MonitorState,
    snapshot: Option<BulkJobSnapshot>,
    next_seq: u64,
    last_applied_seq: u64,
    consecutive_failures: u32,
}

impl JobMonitor {
    pub fn new(api: ApiClient, session: SessionStore, poll_interval: Duration) -> Self {
        Self {
            api,
            session,
            poll_interval,
            cancel: CancellationToken::new(),
            state: MonitorState::NoJob,
            snapshot: None,
            next_seq: 0,
            last_applied_seq: 0,
            consecutive_failures: 0,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// The latest applied snapshot, if any.
    pub fn snapshot(&self) -> Option<&BulkJobSnapshot> {
        self.snapshot.as_ref()
    }

    /// Token that stops [`run`](Self::run) when cancelled. Cancelling leaves
    /// the stored job id in place so a later session can pick the job back up.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// True when a new batch may be submitted.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, MonitorState::NoJob | MonitorState::Terminal(_))
    }

    /// The tracked job id, if any (includes terminal jobs still on screen).
    pub fn current_job_id(&self) -> Option<i64> {
        match self.state {
            MonitorState::Polling(id) | MonitorState::Terminal(id) => Some(id),
            MonitorState::NoJob => None,
        }
    }

    // ── Startup ───────────────────────────────────────────────────────────────

    /// Picks up a previously stored job id, transitioning straight to
    /// `Polling`. Returns true if a job was found.
    pub async fn resume_from_storage(&mut self) -> Result<bool, AppError> {
        match self.session.active_job_id().await? {
            Some(job_id) => {
                info!("Resuming observation of bulk job {job_id}");
                self.track(job_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Submission ────────────────────────────────────────────────────────────

    /// Submits the pending batch as one creation request.
    ///
    /// - Empty batch: a no-op; no request is sent and nothing changes.
    /// - Success: the batch is cleared, the returned job id becomes the
    ///   tracked job, and the id is written to durable storage.
    /// - Failure: the error propagates and the batch is left intact so the
    ///   user can retry without re-selecting files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a job is already being tracked.
    pub async fn submit_batch(
        &mut self,
        batch: &mut PendingBatch,
    ) -> Result<Option<i64>, AppError> {
        if !self.is_idle() {
            return Err(AppError::Validation(
                "A bulk upload job is already being tracked".into(),
            ));
        }

        if batch.is_empty() {
            return Ok(None);
        }

        let created = bulk::create_job(&self.api, batch.as_parts()).await?;

        batch.clear();
        self.session.set_active_job_id(created.job_id).await?;
        self.track(created.job_id);

        info!("Submitted batch as bulk job {}", created.job_id);
        Ok(Some(created.job_id))
    }

    // ── Polling ───────────────────────────────────────────────────────────────

    /// Issues one status fetch and applies the outcome.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, AppError> {
        let job_id = match self.state {
            MonitorState::Polling(id) => id,
            _ => return Ok(PollOutcome::Idle),
        };

        self.next_seq += 1;
        let seq = self.next_seq;

        match bulk::get_job(&self.api, job_id).await {
            Ok(snapshot) => {
                self.consecutive_failures = 0;
                let status = snapshot.status;

                if !self.apply_snapshot(seq, snapshot) {
                    return Ok(PollOutcome::Stale);
                }

                if status.is_terminal() {
                    self.state = MonitorState::Terminal(job_id);
                    self.session.clear_active_job_id().await?;
                    info!("Bulk job {job_id} reached terminal status {}", status.as_str());
                    Ok(PollOutcome::Terminal(status))
                } else {
                    Ok(PollOutcome::Updated)
                }
            }
            Err(err) => {
                self.consecutive_failures += 1;
                warn!(
                    "Status fetch for bulk job {job_id} failed ({}/{}): {err}",
                    self.consecutive_failures, MAX_CONSECUTIVE_POLL_FAILURES
                );

                if self.consecutive_failures >= MAX_CONSECUTIVE_POLL_FAILURES {
                    self.abandon().await?;
                    Ok(PollOutcome::Abandoned)
                } else {
                    Ok(PollOutcome::Failed {
                        consecutive: self.consecutive_failures,
                    })
                }
            }
        }
    }

    /// Polls until the job is terminal, abandoned, or the token is cancelled.
    /// The first fetch happens immediately; `on_update` fires for every fresh
    /// snapshot, including the terminal one.
    pub async fn run<F>(&mut self, mut on_update: F) -> Result<MonitorState, AppError>
    where
        F: FnMut(&BulkJobSnapshot),
    {
        let cancel = self.cancel.clone();
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    match self.poll_once().await? {
                        PollOutcome::Updated => {
                            if let Some(snapshot) = &self.snapshot {
                                on_update(snapshot);
                            }
                        }
                        PollOutcome::Terminal(_) => {
                            if let Some(snapshot) = &self.snapshot {
                                on_update(snapshot);
                            }
                            break;
                        }
                        PollOutcome::Abandoned | PollOutcome::Idle => break,
                        PollOutcome::Stale | PollOutcome::Failed { .. } => {}
                    }
                }
            }
        }

        Ok(self.state)
    }

    // ── Control actions ───────────────────────────────────────────────────────

    /// Requests a pause for the tracked job. The local snapshot is not
    /// touched; the next poll reflects the server's decision.
    pub async fn pause(&self) -> Result<(), AppError> {
        let job_id = self.require_job()?;
        bulk::pause_job(&self.api, job_id).await
    }

    /// Requests a resume; same contract as [`pause`](Self::pause).
    pub async fn resume(&self) -> Result<(), AppError> {
        let job_id = self.require_job()?;
        bulk::resume_job(&self.api, job_id).await
    }

    /// Forgets the current job so a fresh batch can be prepared. Clears the
    /// stored id as well.
    pub async fn start_new(&mut self) -> Result<(), AppError> {
        self.session.clear_active_job_id().await?;
        self.state = MonitorState::NoJob;
        self.snapshot = None;
        self.consecutive_failures = 0;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn require_job(&self) -> Result<i64, AppError> {
        self.current_job_id()
            .ok_or_else(|| AppError::Validation("No active bulk upload job".into()))
    }

    fn track(&mut self, job_id: i64) {
        self.state = MonitorState::Polling(job_id);
        self.snapshot = None;
        self.next_seq = 0;
        self.last_applied_seq = 0;
        self.consecutive_failures = 0;
    }

    /// Applies a snapshot only if it is newer than the last applied one.
    fn apply_snapshot(&mut self, seq: u64, snapshot: BulkJobSnapshot) -> bool {
        if seq <= self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        self.snapshot = Some(snapshot);
        true
    }

    /// Drops the tracking session after repeated fetch failures.
    async fn abandon(&mut self) -> Result<(), AppError> {
        warn!("Abandoning bulk job tracking after repeated fetch failures");
        self.session.clear_active_job_id().await?;
        self.state = MonitorState::NoJob;
        self.snapshot = None;
        self.consecutive_failures = 0;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

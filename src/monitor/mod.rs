//! Bulk resume-upload monitoring.
//!
//! The pieces of the upload workflow, leaves first:
//!
//! - [`batch`]: client-side accumulation of the pending file set
//! - [`poller`]: job identity, polling cadence, lifecycle transitions, and
//!   the durable job id that survives restarts
//! - [`view`]: pure display projections over the latest snapshot

pub mod batch;
pub mod poller;
pub mod view;

pub use batch::{PendingBatch, PendingFile};
pub use poller::{JobMonitor, MonitorState, PollOutcome, DEFAULT_POLL_INTERVAL};

//! Job-related types for the UFVK viewer
//!
//! A job is one server-side scan tracked by an opaque identifier. The client sees
//! it through poll responses only; these types hold what the client knows about
//! the job at any moment and what it keeps once the job finishes.

use super::transaction::{BlockHeight, Transaction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque job identifier issued by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress report of a pending job
#[derive(Debug, Clone, PartialEq)]
pub struct JobProgress {
    /// Percentage complete, always within `0..=100`
    pub percent: u8,

    /// Human-readable description of the current phase
    pub message: String,

    /// Seconds since the job was submitted, when the backend reported it
    pub elapsed: Option<f64>,
}

impl JobProgress {
    /// Progress of a job that was just accepted by the backend
    pub fn accepted() -> Self {
        JobProgress {
            percent: 0,
            message: "Sync running in background. Please wait...".to_string(),
            elapsed: None,
        }
    }

    /// Clamp a raw backend percentage into `0..=100`
    ///
    /// Non-finite values are treated as zero.
    pub fn clamp_percent(raw: f64) -> u8 {
        if !raw.is_finite() {
            return 0;
        }
        raw.clamp(0.0, 100.0).floor() as u8
    }
}

/// Metadata carried alongside a completed job
///
/// Used for export filenames and labelling only. Immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    pub wallet_name: Option<String>,
    pub birthday: Option<BlockHeight>,
    pub slug: Option<String>,
}

/// Everything a successfully completed job delivered
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub transactions: Vec<Transaction>,
    pub meta: ResultMeta,

    /// The backend's original textual report, unfiltered
    pub raw_text: String,
}

impl JobResult {
    /// Label for the number of transactions found, e.g. `3 tx`
    pub fn count_label(&self) -> String {
        format!("{} tx", self.transactions.len())
    }
}

/// Body of an import request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub view_key: String,
    pub birthday: BlockHeight,
    pub wallet_name: String,
}

/// One decoded poll response
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending(JobProgress),
    Completed(JobResult),

    /// The backend's error text, not yet prettified
    Failed(String),
}

/// Terminal outcome of a job
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The scan finished and delivered its transactions
    Succeeded(JobResult),

    /// The scan failed; the message is ready for display
    Failed(String),
}

/// Event emitted by a running poll loop
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// The job is still pending
    Progress(JobProgress),

    /// The job reached a terminal state; no further events follow
    Finished(JobOutcome),
}

/// State of the job orchestrator
///
/// ```text
/// Idle -> Submitting -> Polling -> Succeeded | Failed
///   ^________________________________________|
/// ```
///
/// A new submission from any state restarts at `Submitting`.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Idle,
    Submitting,
    Polling { job_id: JobId, progress: JobProgress },
    Succeeded(JobResult),
    Failed { error: String },
}

impl JobState {
    /// Percentage to display for this state
    ///
    /// Failures reset the display to zero, success forces 100.
    pub fn display_percent(&self) -> u8 {
        match self {
            JobState::Polling { progress, .. } => progress.percent,
            JobState::Succeeded(_) => 100,
            JobState::Idle | JobState::Submitting | JobState::Failed { .. } => 0,
        }
    }

    /// Short name of the state, for logs
    pub fn name(&self) -> &'static str {
        match self {
            JobState::Idle => "idle",
            JobState::Submitting => "submitting",
            JobState::Polling { .. } => "polling",
            JobState::Succeeded(_) => "succeeded",
            JobState::Failed { .. } => "failed",
        }
    }
}

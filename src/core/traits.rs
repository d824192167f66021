//! Core traits for talking to the scan backend
//!
//! The orchestrator only ever sees a [`ScanBackend`]. The HTTP client implements it
//! for real use, and tests substitute a scripted in-memory backend.

use crate::types::{BlockHeight, ImportRequest, JobId, JobStatus, ViewerError};
use async_trait::async_trait;

/// The three operations offered by the scan service
#[async_trait]
pub trait ScanBackend: Send + Sync {
    /// Fetch the current chain tip height
    async fn fetch_height(&self) -> Result<BlockHeight, ViewerError>;

    /// Start a scan job for a viewing key
    ///
    /// Returns the job identifier on acceptance. A logical rejection from the
    /// backend is reported as [`ViewerError::Server`] with a display-ready message.
    async fn start_import(&self, request: &ImportRequest) -> Result<JobId, ViewerError>;

    /// Fetch the current status of a job
    ///
    /// A job-level `error` status is a successful poll: it comes back as
    /// [`JobStatus::Failed`]. Only transport and decoding problems are `Err`.
    async fn poll_job(&self, job_id: &JobId) -> Result<JobStatus, ViewerError>;
}

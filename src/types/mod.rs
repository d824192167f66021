//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transactions and outputs found by a scan
//! - `job`: Job identifiers, progress, results and orchestrator state
//! - `error`: Error types and the backend error prettifier

pub mod error;
pub mod job;
pub mod transaction;

pub use error::{prettify_error_message, ViewerError, INVALID_UFVK_MESSAGE};
pub use job::{
    ImportRequest, JobEvent, JobId, JobOutcome, JobProgress, JobResult, JobState, JobStatus,
    ResultMeta,
};
pub use transaction::{shorten_key, BlockHeight, Output, Transaction};

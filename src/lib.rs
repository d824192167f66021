//! UFVK Viewer Library
//! # Overview
//!
//! This library is the client side of a Zcash viewing-key scanner: it submits a
//! unified full viewing key to a scan service, follows the background job until it
//! finishes, and turns the returned transactions into a filtered, sorted, paginated
//! view that can be exported as CSV, JSON or text.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Output, job state, errors)
//! - [`client`] - HTTP client and wire decoding for the scan service
//! - [`core`] - Business logic components:
//!   - [`core::orchestrator`] - Job submission and the job state machine
//!   - [`core::poll_task`] - Cancellable poll loop for a running job
//!   - [`core::filter`] - Filtering and sorting of the result set
//!   - [`core::pagination`] - Page slicing and page metadata
//!   - [`core::view`] - Owner of the loaded result and the view criteria
//! - [`io`] - Export serializers and export file writing
//! - [`cli`] - CLI arguments parsing and terminal rendering
//!
//! # Job Lifecycle
//!
//! - **Idle**: nothing submitted yet, or the last job was cancelled
//! - **Submitting**: the import request is in flight
//! - **Polling**: the job was accepted; its status is requested every poll interval
//! - **Succeeded**: the job delivered its transactions
//! - **Failed**: validation passed but the import, a poll, or the job itself failed
//!
//! # View Pipeline
//!
//! The canonical result set is never modified. Every listing and every export is
//! derived from it through the same steps:
//! - text filter over transaction and output fields
//! - inclusive mined-height range
//! - stable sort by height, amount or time
//! - pagination (listings only; exports always cover the full filtered view)

// Module declarations
pub mod cli;
pub mod client;
pub mod core;
pub mod io;
pub mod types;

pub use crate::client::{ClientConfig, HttpScanClient};
pub use crate::core::{ImportForm, JobOrchestrator, PollConfig, ScanBackend, SortMode, ViewController};
pub use crate::io::{render_export, write_export, ExportFile, ExportFormat};
pub use crate::types::{JobId, JobResult, JobState, Output, ResultMeta, Transaction, ViewerError};

//! Core business logic module
//!
//! This module contains the viewer's state holders and pure view functions:
//! - `traits` - The backend seam the orchestrator talks to
//! - `orchestrator` - Job submission and the job state machine
//! - `poll_task` - Cancellable background poll loop for one job
//! - `progress` - Phase mapping and status lines for pending jobs
//! - `filter` - Text/height filtering and sort modes
//! - `pagination` - Page slicing and page metadata
//! - `view` - Owner of the loaded result set and the view criteria

pub mod filter;
pub mod orchestrator;
pub mod pagination;
pub mod poll_task;
pub mod progress;
pub mod traits;
pub mod view;

pub use filter::{apply_view, parse_amount, SortMode, ViewCriteria};
pub use orchestrator::{ImportForm, JobOrchestrator, PollConfig, DEFAULT_WALLET_NAME};
pub use pagination::{paginate, Page, PageState, DEFAULT_PAGE_SIZE};
pub use poll_task::PollTask;
pub use progress::{format_duration, phase_statuses, progress_message, PhaseStatus, ScanPhase};
pub use traits::ScanBackend;
pub use view::{ViewController, ViewPage};

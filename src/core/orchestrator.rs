//! Job orchestration
//!
//! [`JobOrchestrator`] is the single owner of [`JobState`]. It validates the import
//! form, submits the job, and applies the events of the job's [`PollTask`] one at a
//! time. Only one job is tracked: a new submission cancels whatever was polling.
//!
//! # State Machine
//!
//! ```text
//! Idle --submit--> Submitting --job id--> Polling --ok--> Succeeded
//!                       |                    |
//!                       +------error---------+--error/transport--> Failed
//! ```

use super::poll_task::{with_timeout, PollTask};
use super::progress::{displayed_phase, progress_message, ScanPhase};
use super::traits::ScanBackend;
use crate::types::{
    prettify_error_message, BlockHeight, ImportRequest, JobEvent, JobId, JobOutcome, JobProgress,
    JobResult, JobState, ViewerError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Wallet name sent when the form leaves it blank
pub const DEFAULT_WALLET_NAME: &str = "webwallet";

/// Interval between two status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Status text once a job completed
pub const DONE_MESSAGE: &str = "Done. Transactions loaded.";

/// Status text while the import request is on its way
pub const SUBMITTING_MESSAGE: &str = "Starting wallet sync...";

/// Configuration for polling a job
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollConfig {
    /// Time between two status requests
    pub poll_interval: Duration,
    /// Upper bound for a single request; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }
}

impl PollConfig {
    /// Create a PollConfig with custom values
    ///
    /// A zero interval falls back to the default and a zero timeout disables the
    /// timeout, both with a warning.
    pub fn new(poll_interval: Duration, request_timeout: Option<Duration>) -> Self {
        let default = Self::default();

        let poll_interval = if poll_interval.is_zero() {
            warn!(
                "Invalid poll_interval ({:?}), using default ({:?})",
                poll_interval, default.poll_interval
            );
            default.poll_interval
        } else {
            poll_interval
        };

        let request_timeout = match request_timeout {
            Some(timeout) if timeout.is_zero() => {
                warn!("Invalid request_timeout ({:?}), requests will not time out", timeout);
                None
            }
            other => other,
        };

        Self {
            poll_interval,
            request_timeout,
        }
    }
}

/// Raw user input for an import, as typed into the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportForm {
    pub view_key: String,
    pub birthday: String,
    pub wallet_name: String,
}

impl ImportForm {
    pub fn new(
        view_key: impl Into<String>,
        birthday: impl Into<String>,
        wallet_name: impl Into<String>,
    ) -> Self {
        Self {
            view_key: view_key.into(),
            birthday: birthday.into(),
            wallet_name: wallet_name.into(),
        }
    }

    /// Check the form and build the request body
    ///
    /// # Errors
    ///
    /// - [`ViewerError::MissingInput`] when the key or birthday is blank
    /// - [`ViewerError::InvalidBirthday`] when the birthday is not a block number
    pub fn validate(&self) -> Result<ImportRequest, ViewerError> {
        let view_key = self.view_key.trim();
        let birthday = self.birthday.trim();

        if view_key.is_empty() || birthday.is_empty() {
            return Err(ViewerError::MissingInput);
        }

        let birthday = birthday
            .parse::<BlockHeight>()
            .map_err(|_| ViewerError::invalid_birthday(birthday))?;

        let wallet_name = match self.wallet_name.trim() {
            "" => DEFAULT_WALLET_NAME,
            name => name,
        };

        Ok(ImportRequest {
            view_key: view_key.to_string(),
            birthday,
            wallet_name: wallet_name.to_string(),
        })
    }
}

/// Single-flight controller for scan jobs
pub struct JobOrchestrator<B: ?Sized> {
    backend: Arc<B>,
    config: PollConfig,
    state: JobState,
    task: Option<PollTask>,
}

impl<B> JobOrchestrator<B>
where
    B: ScanBackend + ?Sized + 'static,
{
    pub fn new(backend: Arc<B>, config: PollConfig) -> Self {
        Self {
            backend,
            config,
            state: JobState::Idle,
            task: None,
        }
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Whether a poll loop is currently attached
    pub fn is_polling(&self) -> bool {
        self.task.is_some()
    }

    /// Fetch the chain tip height, for display next to the birthday field
    pub async fn fetch_height(&self) -> Result<BlockHeight, ViewerError> {
        with_timeout(self.backend.fetch_height(), self.config.request_timeout).await
    }

    /// Submit a new import job
    ///
    /// Validation failures return immediately without a request and leave the state
    /// untouched. Otherwise any active poll loop is cancelled, the import request is
    /// sent, and the orchestrator moves to `Polling` or `Failed`.
    pub async fn submit(&mut self, form: &ImportForm) -> Result<JobId, ViewerError> {
        let request = form.validate()?;

        self.cancel_task();
        self.state = JobState::Submitting;
        info!(
            birthday = request.birthday,
            wallet_name = %request.wallet_name,
            "submitting import"
        );

        match with_timeout(self.backend.start_import(&request), self.config.request_timeout).await
        {
            Ok(job_id) => {
                info!(job_id = %job_id, "import accepted, polling job");
                self.task = Some(PollTask::spawn(
                    Arc::clone(&self.backend),
                    job_id.clone(),
                    self.config.clone(),
                ));
                self.state = JobState::Polling {
                    job_id: job_id.clone(),
                    progress: JobProgress::accepted(),
                };
                Ok(job_id)
            }
            Err(error) => {
                let message = match &error {
                    ViewerError::Server { message } => message.clone(),
                    other => prettify_error_message(&other.to_string()),
                };
                warn!(error = %message, "import failed");
                self.state = JobState::Failed { error: message };
                Err(error)
            }
        }
    }

    /// Wait for the next event of the active job and apply it
    ///
    /// Returns the updated state, or `None` when no job is being polled.
    pub async fn next_event(&mut self) -> Option<&JobState> {
        let task = self.task.as_mut()?;
        let event = task.next_event().await;

        match event {
            Some(JobEvent::Progress(progress)) => self.apply_progress(progress),
            Some(JobEvent::Finished(outcome)) => {
                self.task = None;
                self.apply_outcome(outcome);
            }
            None => {
                self.task = None;
                if matches!(self.state, JobState::Polling { .. }) {
                    warn!("poll loop ended without a terminal status");
                    self.state = JobState::Failed {
                        error: "Error checking job status: polling stopped unexpectedly"
                            .to_string(),
                    };
                }
            }
        }

        Some(&self.state)
    }

    /// Apply events until the active job reaches a terminal state
    pub async fn run_to_completion(&mut self) -> &JobState {
        while self.next_event().await.is_some() {}
        &self.state
    }

    /// Stop tracking the active job
    ///
    /// Also clears a `Submitting` state left behind by an abandoned `submit`. A no-op
    /// once the job reached a terminal state.
    pub fn cancel(&mut self) {
        let abandoned = matches!(self.state, JobState::Submitting);
        if self.cancel_task() || abandoned {
            info!("job cancelled");
            self.state = JobState::Idle;
        }
    }

    /// Cancel any active job and return to `Idle`
    pub fn reset(&mut self) {
        self.cancel_task();
        self.state = JobState::Idle;
    }

    /// Result of the last successful job, if the orchestrator holds one
    pub fn result(&self) -> Option<&JobResult> {
        match &self.state {
            JobState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn percent(&self) -> u8 {
        self.state.display_percent()
    }

    pub fn phase(&self) -> ScanPhase {
        displayed_phase(self.percent())
    }

    /// Status line for the current state, `None` while idle
    pub fn status_text(&self) -> Option<String> {
        match &self.state {
            JobState::Idle => None,
            JobState::Submitting => Some(SUBMITTING_MESSAGE.to_string()),
            JobState::Polling { progress, .. } => Some(progress_message(
                &progress.message,
                progress.percent,
                progress.elapsed,
            )),
            JobState::Succeeded(_) => Some(DONE_MESSAGE.to_string()),
            JobState::Failed { error } => Some(error.clone()),
        }
    }

    fn cancel_task(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }

    fn apply_progress(&mut self, update: JobProgress) {
        if let JobState::Polling { progress, .. } = &mut self.state {
            // The bar never moves backwards.
            progress.percent = progress.percent.max(update.percent);
            progress.message = update.message;
            if update.elapsed.is_some() {
                progress.elapsed = update.elapsed;
            }
        }
    }

    fn apply_outcome(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Succeeded(result) => {
                info!(transactions = result.transactions.len(), "job succeeded");
                self.state = JobState::Succeeded(result);
            }
            JobOutcome::Failed(error) => {
                warn!(error = %error, "job failed");
                self.state = JobState::Failed { error };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JobStatus, ResultMeta, Transaction, INVALID_UFVK_MESSAGE};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Holds the first poll request until released
    #[derive(Default)]
    struct Gate {
        entered: Notify,
        release: Notify,
    }

    /// In-memory backend replaying canned responses
    #[derive(Default)]
    struct ScriptedBackend {
        imports: Mutex<VecDeque<Result<JobId, ViewerError>>>,
        polls: Mutex<VecDeque<Result<JobStatus, ViewerError>>>,
        gate: Mutex<Option<Arc<Gate>>>,
        import_calls: AtomicUsize,
        poll_calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(
            imports: Vec<Result<JobId, ViewerError>>,
            polls: Vec<Result<JobStatus, ViewerError>>,
        ) -> Self {
            Self {
                imports: Mutex::new(imports.into()),
                polls: Mutex::new(polls.into()),
                ..Self::default()
            }
        }

        fn gated(self) -> (Self, Arc<Gate>) {
            let gate = Arc::new(Gate::default());
            *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
            (self, gate)
        }
    }

    #[async_trait]
    impl ScanBackend for ScriptedBackend {
        async fn fetch_height(&self) -> Result<BlockHeight, ViewerError> {
            Ok(2_700_000)
        }

        async fn start_import(&self, _request: &ImportRequest) -> Result<JobId, ViewerError> {
            self.import_calls.fetch_add(1, Ordering::SeqCst);
            self.imports
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(JobId("job".to_string())))
        }

        async fn poll_job(&self, _job_id: &JobId) -> Result<JobStatus, ViewerError> {
            self.poll_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            self.polls.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(ViewerError::Transport {
                    message: "script exhausted".to_string(),
                })
            })
        }
    }

    fn job(id: &str) -> Result<JobId, ViewerError> {
        Ok(JobId(id.to_string()))
    }

    fn pending(percent: u8, message: &str) -> Result<JobStatus, ViewerError> {
        Ok(JobStatus::Pending(JobProgress {
            percent,
            message: message.to_string(),
            elapsed: Some(f64::from(percent)),
        }))
    }

    fn completed(count: usize) -> Result<JobStatus, ViewerError> {
        Ok(JobStatus::Completed(JobResult {
            transactions: (0..count).map(|i| Transaction::new(format!("tx{}", i))).collect(),
            meta: ResultMeta {
                wallet_name: Some(DEFAULT_WALLET_NAME.to_string()),
                birthday: Some(2_600_000),
                slug: Some("vk_0123456789abcdef".to_string()),
            },
            raw_text: "raw".to_string(),
        }))
    }

    fn orchestrator(backend: ScriptedBackend) -> (JobOrchestrator<ScriptedBackend>, Arc<ScriptedBackend>) {
        let backend = Arc::new(backend);
        (
            JobOrchestrator::new(Arc::clone(&backend), PollConfig::default()),
            backend,
        )
    }

    fn form() -> ImportForm {
        ImportForm::new("uview1abcdef", "2600000", "")
    }

    #[rstest]
    #[case::complete(ImportForm::new(" uview1 ", " 42 ", " mine "), Ok(("uview1", 42, "mine")))]
    #[case::default_wallet(ImportForm::new("uview1", "42", "  "), Ok(("uview1", 42, DEFAULT_WALLET_NAME)))]
    #[case::empty_key(ImportForm::new("", "42", ""), Err(ViewerError::MissingInput))]
    #[case::blank_key(ImportForm::new("   ", "42", ""), Err(ViewerError::MissingInput))]
    #[case::empty_birthday(ImportForm::new("uview1", "", ""), Err(ViewerError::MissingInput))]
    #[case::non_numeric_birthday(
        ImportForm::new("uview1", "soon", ""),
        Err(ViewerError::InvalidBirthday { value: "soon".to_string() })
    )]
    #[case::negative_birthday(
        ImportForm::new("uview1", "-5", ""),
        Err(ViewerError::InvalidBirthday { value: "-5".to_string() })
    )]
    fn test_form_validation(
        #[case] form: ImportForm,
        #[case] expected: Result<(&str, BlockHeight, &str), ViewerError>,
    ) {
        let expected = expected.map(|(key, birthday, name)| ImportRequest {
            view_key: key.to_string(),
            birthday,
            wallet_name: name.to_string(),
        });
        assert_eq!(form.validate(), expected);
    }

    #[rstest]
    #[case::defaults(Duration::from_secs(2), None, Duration::from_secs(2), None)]
    #[case::custom(
        Duration::from_millis(500),
        Some(Duration::from_secs(5)),
        Duration::from_millis(500),
        Some(Duration::from_secs(5))
    )]
    #[case::zero_interval(Duration::ZERO, None, DEFAULT_POLL_INTERVAL, None)]
    #[case::zero_timeout(
        Duration::from_secs(1),
        Some(Duration::ZERO),
        Duration::from_secs(1),
        None
    )]
    fn test_poll_config_fallback(
        #[case] interval: Duration,
        #[case] timeout: Option<Duration>,
        #[case] expected_interval: Duration,
        #[case] expected_timeout: Option<Duration>,
    ) {
        let config = PollConfig::new(interval, timeout);
        assert_eq!(config.poll_interval, expected_interval);
        assert_eq!(config.request_timeout, expected_timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_key_sends_nothing() {
        let (mut orchestrator, backend) = orchestrator(ScriptedBackend::default());

        let result = orchestrator.submit(&ImportForm::new("", "2600000", "")).await;

        assert_eq!(result, Err(ViewerError::MissingInput));
        assert!(result.unwrap_err().is_validation());
        assert_eq!(orchestrator.state(), &JobState::Idle);
        assert_eq!(backend.import_calls.load(Ordering::SeqCst), 0);
        assert!(!orchestrator.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failure_keeps_previous_result() {
        let (mut orchestrator, backend) =
            orchestrator(ScriptedBackend::new(vec![job("a")], vec![completed(2)]));
        orchestrator.submit(&form()).await.unwrap();
        orchestrator.run_to_completion().await;

        let result = orchestrator.submit(&ImportForm::new("uview1", "later", "")).await;

        assert!(matches!(result, Err(ViewerError::InvalidBirthday { .. })));
        assert_eq!(orchestrator.result().map(|r| r.count_label()), Some("2 tx".to_string()));
        assert_eq!(backend.import_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_then_success() {
        let (mut orchestrator, backend) = orchestrator(ScriptedBackend::new(
            vec![job("a")],
            vec![pending(10, "Starting…"), pending(55, "Scanning…"), completed(3)],
        ));

        let job_id = orchestrator.submit(&form()).await.unwrap();
        assert_eq!(job_id, JobId("a".to_string()));
        assert_eq!(
            orchestrator.status_text().as_deref(),
            Some("Sync running in background. Please wait... (0% complete)")
        );

        let state = orchestrator.next_event().await.cloned();
        assert!(matches!(state, Some(JobState::Polling { ref progress, .. }) if progress.percent == 10));
        assert_eq!(orchestrator.phase(), ScanPhase::Scanning);

        orchestrator.next_event().await;
        assert_eq!(orchestrator.percent(), 55);
        assert_eq!(orchestrator.phase(), ScanPhase::Parsing);
        assert_eq!(
            orchestrator.status_text().as_deref(),
            Some("Scanning… (55% complete · 55s elapsed)")
        );

        let state = orchestrator.run_to_completion().await;
        assert!(matches!(state, JobState::Succeeded(_)));
        assert_eq!(orchestrator.percent(), 100);
        assert_eq!(orchestrator.phase(), ScanPhase::Ready);
        assert_eq!(orchestrator.result().map(|r| r.count_label()), Some("3 tx".to_string()));
        assert_eq!(orchestrator.status_text().as_deref(), Some(DONE_MESSAGE));
        assert_eq!(backend.poll_calls.load(Ordering::SeqCst), 3);
        assert!(!orchestrator.is_polling());
        assert!(orchestrator.next_event().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_never_moves_backwards() {
        let (mut orchestrator, _backend) = orchestrator(ScriptedBackend::new(
            vec![job("a")],
            vec![pending(40, "Scanning…"), pending(20, "Still scanning…")],
        ));
        orchestrator.submit(&form()).await.unwrap();

        orchestrator.next_event().await;
        orchestrator.next_event().await;

        match orchestrator.state() {
            JobState::Polling { progress, .. } => {
                assert_eq!(progress.percent, 40);
                assert_eq!(progress.message, "Still scanning…");
            }
            other => panic!("expected polling, got {:?}", other),
        }
    }

    #[rstest]
    #[case::bad_key("Invalid viewing key format", INVALID_UFVK_MESSAGE)]
    #[case::backend_tool("Backend tool failed with exit code 1", INVALID_UFVK_MESSAGE)]
    #[case::other("disk full", "disk full")]
    #[tokio::test(start_paused = true)]
    async fn test_job_error_is_prettified(#[case] raw: &str, #[case] expected: &str) {
        let (mut orchestrator, _backend) = orchestrator(ScriptedBackend::new(
            vec![job("a")],
            vec![pending(30, "Scanning…"), Ok(JobStatus::Failed(raw.to_string()))],
        ));
        orchestrator.submit(&form()).await.unwrap();

        let state = orchestrator.run_to_completion().await;

        assert_eq!(state, &JobState::Failed { error: expected.to_string() });
        assert_eq!(orchestrator.percent(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_is_not_retried() {
        let (mut orchestrator, backend) = orchestrator(ScriptedBackend::new(
            vec![job("a")],
            vec![
                Err(ViewerError::Transport {
                    message: "connection refused".to_string(),
                }),
                completed(1),
            ],
        ));
        orchestrator.submit(&form()).await.unwrap();

        let state = orchestrator.run_to_completion().await.clone();
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(
            state,
            JobState::Failed {
                error: "Error checking job status: Request failed: connection refused".to_string()
            }
        );
        assert_eq!(backend.poll_calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[case::server(
        Err(ViewerError::Server { message: INVALID_UFVK_MESSAGE.to_string() }),
        INVALID_UFVK_MESSAGE
    )]
    #[case::transport(
        Err(ViewerError::Transport { message: "connection refused".to_string() }),
        "Request failed: connection refused"
    )]
    #[tokio::test(start_paused = true)]
    async fn test_submission_failure(
        #[case] response: Result<JobId, ViewerError>,
        #[case] expected: &str,
    ) {
        let (mut orchestrator, backend) =
            orchestrator(ScriptedBackend::new(vec![response.clone()], Vec::new()));

        let result = orchestrator.submit(&form()).await;

        assert_eq!(result.map_err(|e| e.to_string()), response.map_err(|e| e.to_string()));
        assert_eq!(orchestrator.state(), &JobState::Failed { error: expected.to_string() });
        assert!(!orchestrator.is_polling());
        assert_eq!(backend.poll_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout_fails_job() {
        let (backend, _gate) = ScriptedBackend::new(vec![job("a")], vec![completed(1)]).gated();
        let backend = Arc::new(backend);
        let config = PollConfig::new(Duration::from_secs(2), Some(Duration::from_millis(500)));
        let mut orchestrator = JobOrchestrator::new(backend, config);
        orchestrator.submit(&form()).await.unwrap();

        let state = orchestrator.run_to_completion().await;

        assert_eq!(
            state,
            &JobState::Failed {
                error: "Error checking job status: Request timed out after 500 ms".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_submission_preempts_polling() {
        let (backend, gate) =
            ScriptedBackend::new(vec![job("a"), job("b")], vec![completed(1)]).gated();
        let (mut orchestrator, backend) = orchestrator(backend);

        orchestrator.submit(&form()).await.unwrap();
        // job a now has a request in flight
        gate.entered.notified().await;

        let job_id = orchestrator.submit(&form()).await.unwrap();
        gate.release.notify_one();

        assert_eq!(job_id, JobId("b".to_string()));
        assert!(matches!(
            orchestrator.state(),
            JobState::Polling { job_id, .. } if job_id.0 == "b"
        ));

        let state = orchestrator.run_to_completion().await;
        assert_eq!(
            state.clone(),
            match completed(1) {
                Ok(JobStatus::Completed(result)) => JobState::Succeeded(result),
                _ => unreachable!(),
            }
        );
        assert_eq!(backend.import_calls.load(Ordering::SeqCst), 2);
        assert_eq!(backend.poll_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_in_flight_response() {
        let (backend, gate) = ScriptedBackend::new(Vec::new(), vec![completed(1)]).gated();
        let mut task = PollTask::spawn(Arc::new(backend), JobId("a".to_string()), PollConfig::default());

        gate.entered.notified().await;
        task.cancel();
        gate.release.notify_one();

        assert!(task.is_cancelled());
        assert_eq!(task.next_event().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_returns_to_idle() {
        let (mut orchestrator, _backend) =
            orchestrator(ScriptedBackend::new(vec![job("a")], vec![pending(10, "Scanning…")]));
        orchestrator.submit(&form()).await.unwrap();

        orchestrator.cancel();

        assert_eq!(orchestrator.state(), &JobState::Idle);
        assert!(orchestrator.next_event().await.is_none());
    }

    /// Import that never answers
    struct StalledImport;

    #[async_trait]
    impl ScanBackend for StalledImport {
        async fn fetch_height(&self) -> Result<BlockHeight, ViewerError> {
            Ok(0)
        }

        async fn start_import(&self, _request: &ImportRequest) -> Result<JobId, ViewerError> {
            std::future::pending().await
        }

        async fn poll_job(&self, _job_id: &JobId) -> Result<JobStatus, ViewerError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_abandoned_submit_returns_to_idle() {
        let mut orchestrator = JobOrchestrator::new(Arc::new(StalledImport), PollConfig::default());

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), orchestrator.submit(&form())).await;
        assert!(abandoned.is_err());
        assert_eq!(orchestrator.state(), &JobState::Submitting);
        assert!(!orchestrator.is_polling());

        orchestrator.cancel();
        assert_eq!(orchestrator.state(), &JobState::Idle);
        assert_eq!(orchestrator.status_text(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_terminal_state_is_noop() {
        let (mut orchestrator, _backend) =
            orchestrator(ScriptedBackend::new(vec![job("a")], vec![completed(2)]));
        orchestrator.submit(&form()).await.unwrap();
        orchestrator.run_to_completion().await;

        orchestrator.cancel();

        assert!(matches!(orchestrator.state(), JobState::Succeeded(_)));

        orchestrator.reset();
        assert_eq!(orchestrator.state(), &JobState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_skips_progress() {
        let backend = Arc::new(ScriptedBackend::new(
            Vec::new(),
            vec![pending(10, "a"), pending(70, "b"), completed(4)],
        ));
        let task = PollTask::spawn(Arc::clone(&backend), JobId("a".to_string()), PollConfig::default());

        let outcome = task.wait().await;

        assert!(matches!(outcome, Some(JobOutcome::Succeeded(ref r)) if r.transactions.len() == 4));
        assert_eq!(backend.poll_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_height() {
        let (orchestrator, _backend) = orchestrator(ScriptedBackend::default());
        assert_eq!(orchestrator.fetch_height().await, Ok(2_700_000));
    }
}

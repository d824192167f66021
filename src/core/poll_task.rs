//! Background poll loop for one job
//!
//! A [`PollTask`] owns a spawned tokio task that asks the backend for the job's
//! status on a fixed interval and forwards what it learns over a channel. The task
//! never touches orchestrator state; the owner applies events as it receives them.
//!
//! # Guarantees
//!
//! - At most one status request is in flight: each tick awaits its response, and
//!   ticks that fall due meanwhile are skipped rather than queued
//! - The loop stops after the first terminal status and never retries a failure
//! - After [`PollTask::cancel`] (or drop) no further event is delivered, including a
//!   response that was already in flight

use super::orchestrator::PollConfig;
use super::traits::ScanBackend;
use crate::types::{prettify_error_message, JobEvent, JobId, JobOutcome, JobStatus, ViewerError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Events buffered between the loop and its owner
const EVENT_BUFFER: usize = 8;

/// Owner side of a running poll loop
///
/// Dropping the handle cancels the loop.
#[derive(Debug)]
pub struct PollTask {
    cancel: CancellationToken,
    events: mpsc::Receiver<JobEvent>,
}

impl PollTask {
    /// Start polling `job_id`
    ///
    /// Must be called from within a tokio runtime. The first request goes out one
    /// full interval after spawning.
    pub fn spawn<B>(backend: Arc<B>, job_id: JobId, config: PollConfig) -> Self
    where
        B: ScanBackend + ?Sized + 'static,
    {
        let cancel = CancellationToken::new();
        let (sender, events) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(poll_loop(
            backend,
            job_id,
            config,
            cancel.clone(),
            sender,
        ));

        Self {
            cancel,
            events,
        }
    }

    /// Stop the loop; any response still in flight is discarded
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the next event
    ///
    /// Returns `None` once the task was cancelled or has exited.
    pub async fn next_event(&mut self) -> Option<JobEvent> {
        if self.cancel.is_cancelled() {
            return None;
        }

        let event = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            event = self.events.recv() => event,
        };

        // An event can race with cancellation; the cancel wins.
        event.filter(|_| !self.cancel.is_cancelled())
    }

    /// Wait for the terminal outcome, skipping progress events
    pub async fn wait(mut self) -> Option<JobOutcome> {
        while let Some(event) = self.next_event().await {
            if let JobEvent::Finished(outcome) = event {
                return Some(outcome);
            }
        }
        None
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Run `request`, failing with [`ViewerError::Timeout`] once `limit` elapses
pub(crate) async fn with_timeout<T, F>(request: F, limit: Option<Duration>) -> Result<T, ViewerError>
where
    F: Future<Output = Result<T, ViewerError>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, request).await {
            Ok(result) => result,
            Err(_) => Err(ViewerError::Timeout {
                millis: limit.as_millis() as u64,
            }),
        },
        None => request.await,
    }
}

/// Translate one poll result into the event reported to the owner
fn poll_event(response: Result<JobStatus, ViewerError>) -> JobEvent {
    match response {
        Ok(JobStatus::Pending(progress)) => JobEvent::Progress(progress),
        Ok(JobStatus::Completed(result)) => JobEvent::Finished(JobOutcome::Succeeded(result)),
        Ok(JobStatus::Failed(raw)) => {
            let message = if raw.is_empty() { "unknown error" } else { raw.as_str() };
            JobEvent::Finished(JobOutcome::Failed(prettify_error_message(message)))
        }
        Err(error) => JobEvent::Finished(JobOutcome::Failed(format!(
            "Error checking job status: {}",
            error
        ))),
    }
}

async fn poll_loop<B>(
    backend: Arc<B>,
    job_id: JobId,
    config: PollConfig,
    cancel: CancellationToken,
    events: mpsc::Sender<JobEvent>,
) where
    B: ScanBackend + ?Sized,
{
    let mut ticker = interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(job_id = %job_id, "poll loop cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        debug!(job_id = %job_id, "polling job status");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(job_id = %job_id, "poll loop cancelled with a request in flight");
                return;
            }
            response = with_timeout(backend.poll_job(&job_id), config.request_timeout) => response,
        };

        if cancel.is_cancelled() {
            warn!(job_id = %job_id, "discarding poll response received after cancellation");
            return;
        }

        let event = poll_event(response);
        let finished = matches!(event, JobEvent::Finished(_));

        if events.send(event).await.is_err() {
            debug!(job_id = %job_id, "poll task owner dropped");
            return;
        }

        if finished {
            debug!(job_id = %job_id, "poll loop finished");
            return;
        }
    }
}

//! Wire format of the scan service
//!
//! Every endpoint answers with a JSON object carrying a `status` discriminator. The
//! decoders here turn response bodies into domain values and never look at sockets,
//! so they are tested without a server.

use crate::types::{
    BlockHeight, JobId, JobProgress, JobResult, JobStatus, ResultMeta, Transaction, ViewerError,
};
use serde::Deserialize;

/// Fallback used when the import endpoint rejects a request without saying why
pub const IMPORT_FALLBACK_ERROR: &str = "Failed to start sync";

/// Message reported for pending jobs that sent none
const DEFAULT_PENDING_MESSAGE: &str = "Working…";

/// Body of `GET /api/height`
#[derive(Debug, Deserialize)]
struct HeightResponse {
    status: String,
    #[serde(default)]
    height: Option<BlockHeight>,
    #[serde(default)]
    error: Option<String>,
}

/// Body of `POST /api/import`
#[derive(Debug, Deserialize)]
struct ImportResponse {
    status: String,
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Body of `GET /api/job/{job_id}`
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JobStatusResponse {
    Pending {
        #[serde(default)]
        progress: f64,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        elapsed: Option<f64>,
    },
    Ok {
        #[serde(default)]
        transactions: Vec<Transaction>,
        #[serde(default)]
        raw_text: Option<String>,
        #[serde(default)]
        wallet_name: Option<String>,
        #[serde(default)]
        birthday: Option<BlockHeight>,
        #[serde(default)]
        slug: Option<String>,
    },
    Error {
        #[serde(default)]
        error: Option<String>,
    },
}

/// Decode the chain height endpoint
pub fn decode_height(body: &str) -> Result<BlockHeight, ViewerError> {
    let response: HeightResponse =
        serde_json::from_str(body).map_err(|e| ViewerError::decode(e.to_string()))?;

    match (response.status.as_str(), response.height) {
        ("ok", Some(height)) => Ok(height),
        ("ok", None) => Err(ViewerError::decode("height missing from response")),
        _ => Err(ViewerError::server(response.error.as_deref().unwrap_or(""))),
    }
}

/// Decode the import endpoint
///
/// `success` is whether the HTTP status was 2xx. A non-2xx answer is a logical error
/// even when its body claims otherwise.
pub fn decode_import(success: bool, body: &str) -> Result<JobId, ViewerError> {
    let response: ImportResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !success => return Err(ViewerError::server(IMPORT_FALLBACK_ERROR)),
        Err(e) => return Err(ViewerError::decode(e.to_string())),
    };

    if success && response.status == "ok" {
        return response
            .job_id
            .filter(|id| !id.is_empty())
            .map(JobId)
            .ok_or_else(|| ViewerError::decode("job_id missing from response"));
    }

    let error = response
        .error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| IMPORT_FALLBACK_ERROR.to_string());
    Err(ViewerError::server(&error))
}

/// Decode the job status endpoint
///
/// The HTTP status is deliberately ignored: unknown jobs come back as a 404 whose
/// body is a regular `error` status.
pub fn decode_job_status(body: &str) -> Result<JobStatus, ViewerError> {
    let response: JobStatusResponse =
        serde_json::from_str(body).map_err(|e| ViewerError::decode(e.to_string()))?;

    Ok(match response {
        JobStatusResponse::Pending {
            progress,
            message,
            elapsed,
        } => JobStatus::Pending(JobProgress {
            percent: JobProgress::clamp_percent(progress),
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_PENDING_MESSAGE.to_string()),
            elapsed: elapsed.filter(|e| e.is_finite() && *e >= 0.0),
        }),
        JobStatusResponse::Ok {
            transactions,
            raw_text,
            wallet_name,
            birthday,
            slug,
        } => JobStatus::Completed(JobResult {
            transactions,
            meta: ResultMeta {
                wallet_name,
                birthday,
                slug,
            },
            raw_text: raw_text.unwrap_or_default(),
        }),
        JobStatusResponse::Error { error } => JobStatus::Failed(error.unwrap_or_default()),
    })
}

//! Provider client error types.

use mediagen_models::VideoJobStatus;
use reqwest::StatusCode;
use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by the provider client and the services built on it.
///
/// None of these trigger a local retry: mutating provider calls (create,
/// remix, generate, edit) are issued exactly once and failures propagate
/// to the caller as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API credential available; checked at first use, not at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or empty input, or a provider response in an unexpected shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Download attempted while the job is not completed yet
    #[error("Video {video_id} not ready (status={status}); poll until completed")]
    NotReady {
        video_id: String,
        status: VideoJobStatus,
    },

    /// The job reached its terminal failure state
    #[error("Video job {video_id} failed: {detail}")]
    JobFailed { video_id: String, detail: String },

    /// The polling loop exceeded its configured deadline; the remote job
    /// keeps running and can still be polled later
    #[error("Video job {video_id} did not complete within {timeout_secs}s")]
    Timeout { video_id: String, timeout_secs: u64 },

    /// Non-2xx reply from the provider
    #[error("Provider returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

//! Remote video job status and the job envelope returned by the provider.
//!
//! The job object lives entirely on the provider side. Locally it is a
//! capability handle: an opaque id plus the last status we observed. We
//! never cache or mutate it.

use serde::{Deserialize, Serialize};

/// Status of a remote video generation job.
///
/// Anything the provider reports that is not `completed` or `failed` is
/// non-terminal. Values we do not recognize parse to [`VideoJobStatus::Unknown`]
/// so that a provider-side vocabulary change degrades to "keep polling"
/// instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoJobStatus {
    /// Job accepted, not yet running
    #[default]
    Pending,
    /// Job waiting for capacity
    Queued,
    /// Job actively rendering
    InProgress,
    /// Job finished, content downloadable
    Completed,
    /// Job hit a terminal error
    Failed,
    /// Unrecognized provider status, treated as non-terminal
    #[serde(other)]
    Unknown,
}

impl VideoJobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoJobStatus::Pending => "pending",
            VideoJobStatus::Queued => "queued",
            VideoJobStatus::InProgress => "in_progress",
            VideoJobStatus::Completed => "completed",
            VideoJobStatus::Failed => "failed",
            VideoJobStatus::Unknown => "unknown",
        }
    }

    /// Check if this is a terminal state (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoJobStatus::Completed | VideoJobStatus::Failed)
    }
}

impl std::fmt::Display for VideoJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error detail attached to a failed job by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJobError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl VideoJobError {
    /// Human-readable detail, falling back to the code when the provider
    /// sent no message.
    pub fn detail(&self) -> String {
        match (&self.message, &self.code) {
            (Some(msg), _) => msg.clone(),
            (None, Some(code)) => code.clone(),
            (None, None) => "unspecified provider error".to_string(),
        }
    }
}

/// Video job object as returned by the provider's create/retrieve/remix calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJobEnvelope {
    /// Provider-assigned opaque job id
    pub id: String,
    /// Current status; absent or unrecognized values stay non-terminal
    #[serde(default)]
    pub status: VideoJobStatus,
    /// Error detail, present only on failed jobs
    #[serde(default)]
    pub error: Option<VideoJobError>,
}

impl VideoJobEnvelope {
    /// Failure detail for a failed job, verbatim from the provider when
    /// available.
    pub fn error_detail(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.detail())
            .unwrap_or_else(|| "unspecified provider error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(VideoJobStatus::Completed.is_terminal());
        assert!(VideoJobStatus::Failed.is_terminal());
        assert!(!VideoJobStatus::Pending.is_terminal());
        assert!(!VideoJobStatus::Queued.is_terminal());
        assert!(!VideoJobStatus::InProgress.is_terminal());
        assert!(!VideoJobStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_unrecognized_status_parses_to_unknown() {
        let envelope: VideoJobEnvelope =
            serde_json::from_str(r#"{"id": "video_123", "status": "moderating"}"#).unwrap();
        assert_eq!(envelope.status, VideoJobStatus::Unknown);
        assert!(!envelope.status.is_terminal());
    }

    #[test]
    fn test_absent_status_defaults_to_pending() {
        let envelope: VideoJobEnvelope = serde_json::from_str(r#"{"id": "video_123"}"#).unwrap();
        assert_eq!(envelope.status, VideoJobStatus::Pending);
    }

    #[test]
    fn test_error_detail_passthrough() {
        let envelope: VideoJobEnvelope = serde_json::from_str(
            r#"{"id": "video_9", "status": "failed", "error": {"code": "moderation_blocked", "message": "content policy violation"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.status, VideoJobStatus::Failed);
        assert_eq!(envelope.error_detail(), "content policy violation");
    }

    #[test]
    fn test_error_detail_falls_back_to_code() {
        let err = VideoJobError {
            code: Some("internal_error".into()),
            message: None,
        };
        assert_eq!(err.detail(), "internal_error");
    }
}

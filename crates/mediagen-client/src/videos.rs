//! Video job lifecycle: create, poll until terminal, download, remix.
//!
//! All transitions happen on the provider side; this service only observes
//! them. Status reads are never cached, and the poll interval is constant
//! for the whole wait (no backoff, no jitter).

use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{debug, info};

use mediagen_models::{VideoJobStatus, VideoModel, VideoSeconds};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{ImageUpload, ProviderClient, VideoCreateCall};

/// Parameters for creating a video job.
#[derive(Debug, Clone, Default)]
pub struct VideoCreateParams {
    pub model: VideoModel,
    pub seconds: VideoSeconds,
    pub size: Option<String>,
    pub input_reference: Option<ImageUpload>,
}

/// Video job lifecycle manager.
pub struct VideoService<'a> {
    client: &'a ProviderClient,
}

impl<'a> VideoService<'a> {
    pub fn new(client: &'a ProviderClient) -> Self {
        Self { client }
    }

    /// Start a video generation job and return the provider-assigned id
    /// immediately; completion is observed by polling.
    pub async fn create(&self, prompt: &str, params: VideoCreateParams) -> ProviderResult<String> {
        let call = VideoCreateCall {
            prompt: prompt.to_string(),
            model: params.model.as_str().to_string(),
            seconds: params.seconds.as_str().to_string(),
            size: params.size.unwrap_or_else(|| "720x1280".to_string()),
            input_reference: params.input_reference,
        };
        let job = self.client.create_video(&call).await?;
        info!(video_id = %job.id, "Video job created");
        Ok(job.id)
    }

    /// Start a remix job derived from an existing job and a new prompt.
    /// The result is a brand-new job with its own independent lifecycle.
    pub async fn remix(&self, video_id: &str, prompt: &str) -> ProviderResult<String> {
        let job = self.client.remix_video(video_id, prompt).await?;
        info!(video_id = %job.id, source = video_id, "Remix job created");
        Ok(job.id)
    }

    /// Current status straight from the provider; repeated calls may
    /// observe a non-terminal value for a long time before settling.
    pub async fn get_status(&self, video_id: &str) -> ProviderResult<VideoJobStatus> {
        Ok(self.client.retrieve_video(video_id).await?.status)
    }

    /// Download the content of a completed job.
    ///
    /// A failed job yields [`ProviderError::JobFailed`] with the provider's
    /// detail verbatim, so callers can tell "will never be ready" from
    /// "not ready yet" ([`ProviderError::NotReady`]). No content fetch is
    /// attempted in either case.
    pub async fn download(&self, video_id: &str) -> ProviderResult<Bytes> {
        let job = self.client.retrieve_video(video_id).await?;
        match job.status {
            VideoJobStatus::Completed => self.client.download_video_content(video_id).await,
            VideoJobStatus::Failed => Err(ProviderError::JobFailed {
                video_id: video_id.to_string(),
                detail: job.error_detail(),
            }),
            status => Err(ProviderError::NotReady {
                video_id: video_id.to_string(),
                status,
            }),
        }
    }

    /// Poll at a fixed interval until the job reaches a terminal state.
    ///
    /// Returns the terminal status. With a timeout configured, the loop
    /// fails with [`ProviderError::Timeout`] once the elapsed time (measured
    /// on a monotonic clock) reaches the deadline; the remote job itself
    /// keeps running and can still be polled later. Without a timeout the
    /// loop may run indefinitely.
    pub async fn wait_until_done(
        &self,
        video_id: &str,
        poll_interval: Duration,
        timeout: Option<Duration>,
    ) -> ProviderResult<VideoJobStatus> {
        let start = Instant::now();
        loop {
            let status = self.get_status(video_id).await?;
            debug!(video_id, %status, "Video status poll");
            if status.is_terminal() {
                return Ok(status);
            }
            if let Some(limit) = timeout {
                if start.elapsed() >= limit {
                    return Err(ProviderError::Timeout {
                        video_id: video_id.to_string(),
                        timeout_secs: limit.as_secs(),
                    });
                }
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

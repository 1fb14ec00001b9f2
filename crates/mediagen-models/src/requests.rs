//! Request and response DTOs shared by the HTTP API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::image_model::ImageModel;
use crate::video_model::{VideoModel, VideoSeconds};

/// Request body for POST /api/images/generate.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateImageRequest {
    /// Text description of the image
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
    /// Model name, defaults to gpt-image-1.5
    #[serde(default)]
    pub model: ImageModel,
    /// e.g. 1024x1024; "auto" for the gpt-image family
    #[serde(default)]
    pub size: Option<String>,
    /// hd/standard for dall-e-3; high/medium/low for gpt-image
    #[serde(default)]
    pub quality: Option<String>,
    /// Number of images (dall-e-3 only ever yields 1)
    #[serde(default = "default_n")]
    #[validate(range(min = 1, max = 4, message = "n must be between 1 and 4"))]
    pub n: u8,
    /// dall-e-3 only: vivid or natural
    #[serde(default)]
    pub style: Option<String>,
}

fn default_n() -> u8 {
    1
}

/// Request body for POST /api/videos/generate.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVideoRequest {
    /// Text description of the video
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
    /// sora-2 or sora-2-pro
    #[serde(default)]
    pub model: VideoModel,
    /// Duration: 4, 8 or 12 (seconds, as a string)
    #[serde(default)]
    pub seconds: VideoSeconds,
    /// Resolution
    #[serde(default = "default_video_size")]
    pub size: String,
}

fn default_video_size() -> String {
    "720x1280".to_string()
}

/// Request body for POST /api/videos/remix.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RemixVideoRequest {
    /// Job id from a previous create or remix
    #[validate(length(min = 1, message = "video_id must not be empty"))]
    pub video_id: String,
    /// New prompt for the remix
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
}

/// Response after creating a video or remix job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJobResponse {
    /// Provider job id; use it for status polling and download
    pub job_id: String,
}

/// Response for GET /api/videos/jobs/{id}/status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStatusResponse {
    pub job_id: String,
    /// pending | queued | in_progress | completed | failed | unknown
    pub status: String,
}

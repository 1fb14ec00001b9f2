//! Shared data models for the mediagen backend.
//!
//! This crate holds the provider-facing model catalogs, the video job
//! status machine, and the request/response DTOs used by both the HTTP
//! API and the CLI.

pub mod image_model;
pub mod job_status;
pub mod requests;
pub mod video_model;

pub use image_model::{ImageModel, ParseImageModelError};
pub use job_status::{VideoJobEnvelope, VideoJobError, VideoJobStatus};
pub use requests::{
    CreateVideoRequest, GenerateImageRequest, RemixVideoRequest, VideoJobResponse,
    VideoStatusResponse,
};
pub use video_model::{
    ParseVideoModelError, ParseVideoSecondsError, VideoModel, VideoSeconds, VIDEO_SIZES,
};

//! Video job handlers: create, status, download, remix.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;
use validator::Validate;

use mediagen_client::{ImageUpload, VideoCreateParams, VideoService};
use mediagen_models::{
    CreateVideoRequest, RemixVideoRequest, VideoJobResponse, VideoModel, VideoSeconds,
    VideoStatusResponse,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/videos/generate
///
/// Start a video generation job and return its id immediately. Poll
/// GET /api/videos/jobs/{id}/status until completed, then download.
pub async fn create_video(
    State(state): State<AppState>,
    Json(body): Json<CreateVideoRequest>,
) -> ApiResult<Json<VideoJobResponse>> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    info!(model = %body.model, seconds = %body.seconds, size = %body.size, "create_video");

    let service = VideoService::new(&state.provider);
    let job_id = service
        .create(
            &body.prompt,
            VideoCreateParams {
                model: body.model,
                seconds: body.seconds,
                size: Some(body.size),
                input_reference: None,
            },
        )
        .await?;
    Ok(Json(VideoJobResponse { job_id }))
}

/// POST /api/videos/generate-with-reference
///
/// Multipart form variant of create: `prompt` plus a required `reference`
/// image file that steers the generation; optional `model`, `seconds`,
/// `size` text fields.
pub async fn create_video_with_reference(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoJobResponse>> {
    let mut prompt: Option<String> = None;
    let mut model = VideoModel::default();
    let mut seconds = VideoSeconds::default();
    let mut size: Option<String> = None;
    let mut reference: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        let text_field = |e| ApiError::bad_request(format!("invalid form field: {e}"));
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("prompt") => prompt = Some(field.text().await.map_err(text_field)?),
            Some("model") => {
                model = field
                    .text()
                    .await
                    .map_err(text_field)?
                    .parse()
                    .map_err(|e: mediagen_models::ParseVideoModelError| {
                        ApiError::bad_request(e.to_string())
                    })?;
            }
            Some("seconds") => {
                seconds = field
                    .text()
                    .await
                    .map_err(text_field)?
                    .parse()
                    .map_err(|e: mediagen_models::ParseVideoSecondsError| {
                        ApiError::bad_request(e.to_string())
                    })?;
            }
            Some("size") => size = Some(field.text().await.map_err(text_field)?),
            Some("reference") => {
                let filename = field.file_name().unwrap_or("reference").to_string();
                let content_type = field.content_type().map(str::to_string).unwrap_or_default();
                if !content_type.starts_with("image/") {
                    return Err(ApiError::bad_request(format!(
                        "File {filename} is not an image"
                    )));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read {filename}: {e}")))?;
                reference = Some(ImageUpload::new(filename, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let prompt = prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("prompt is required"))?;
    let reference =
        reference.ok_or_else(|| ApiError::bad_request("reference image file is required"))?;

    info!(model = %model, seconds = %seconds, "create_video_with_reference");

    let service = VideoService::new(&state.provider);
    let job_id = service
        .create(
            &prompt,
            VideoCreateParams {
                model,
                seconds,
                size,
                input_reference: Some(reference),
            },
        )
        .await?;
    Ok(Json(VideoJobResponse { job_id }))
}

/// GET /api/videos/jobs/{id}/status
///
/// Current status straight from the provider, no caching.
pub async fn get_video_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<VideoStatusResponse>> {
    let service = VideoService::new(&state.provider);
    let status = service.get_status(&job_id).await?;
    Ok(Json(VideoStatusResponse {
        job_id,
        status: status.as_str().to_string(),
    }))
}

/// GET /api/videos/jobs/{id}/download
///
/// Raw MP4 bytes of a completed job. 400 while the job is still running,
/// 422 when it failed (with the provider's detail).
pub async fn download_video(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Response> {
    let service = VideoService::new(&state.provider);
    let bytes = service.download(&job_id).await?;
    Ok(([(header::CONTENT_TYPE, "video/mp4")], bytes).into_response())
}

/// POST /api/videos/remix
///
/// Start a remix job from an existing job id and a new prompt. The new job
/// has its own independent lifecycle.
pub async fn remix_video(
    State(state): State<AppState>,
    Json(body): Json<RemixVideoRequest>,
) -> ApiResult<Json<VideoJobResponse>> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    info!(source = %body.video_id, "remix_video");

    let service = VideoService::new(&state.provider);
    let job_id = service.remix(&body.video_id, &body.prompt).await?;
    Ok(Json(VideoJobResponse { job_id }))
}

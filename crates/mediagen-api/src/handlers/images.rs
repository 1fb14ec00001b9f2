//! Image generation and editing handlers.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;
use validator::Validate;

use mediagen_client::{ImageOptions, ImageService, ImageUpload};
use mediagen_models::{GenerateImageRequest, ImageModel};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn png_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}

/// POST /api/images/generate
///
/// Generate a single image from a text prompt and return it as PNG bytes.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(body): Json<GenerateImageRequest>,
) -> ApiResult<Response> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    info!(model = %body.model, n = body.n, "generate_image");

    let service = ImageService::new(&state.provider);
    let opts = ImageOptions {
        model: body.model,
        size: body.size,
        quality: body.quality,
        n: body.n,
        style: body.style,
    };
    let bytes = service.generate(&body.prompt, &opts).await?;
    Ok(png_response(bytes))
}

/// POST /api/images/edit
///
/// Multipart form: `prompt` (required), optional `model`, and one or more
/// image files. Every file part must declare an image content type; unknown
/// text fields are ignored. Returns the first edited result as PNG bytes.
pub async fn edit_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut prompt: Option<String> = None;
    let mut model = ImageModel::default();
    let mut images: Vec<ImageUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("prompt") => {
                prompt = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("invalid prompt field: {e}")))?,
                );
            }
            Some("model") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("invalid model field: {e}")))?;
                model = value
                    .parse()
                    .map_err(|e: mediagen_models::ParseImageModelError| {
                        ApiError::bad_request(e.to_string())
                    })?;
            }
            _ => {
                // Only parts carrying a file are uploads; stray text fields
                // are ignored, like unknown form fields elsewhere.
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let content_type = field.content_type().map(str::to_string).unwrap_or_default();
                if !content_type.starts_with("image/") {
                    return Err(ApiError::bad_request(format!(
                        "File {filename} is not an image"
                    )));
                }
                // Fully materialize the upload before handing it to the provider.
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read {filename}: {e}")))?;
                images.push(ImageUpload::new(filename, content_type, data.to_vec()));
            }
        }
    }

    let prompt = prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("prompt is required"))?;
    if images.is_empty() {
        return Err(ApiError::bad_request("At least one image file is required"));
    }

    info!(model = %model, count = images.len(), "edit_image");

    let service = ImageService::new(&state.provider);
    let bytes = service.edit(&prompt, &images, model).await?;
    Ok(png_response(bytes))
}

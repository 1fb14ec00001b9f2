//! Authenticated gateway to the remote generative media provider.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mediagen_models::VideoJobEnvelope;

use crate::env::{load_dotenv, resolve_api_key};
use crate::error::{ProviderError, ProviderResult};

/// Default provider API base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// A fully materialized binary image buffer handed to the provider.
///
/// Upload streams must be read to completion before constructing one of
/// these; the order of uploads is preserved through edit calls.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Wire request for POST /images/generations.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationCall {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub response_format: &'static str,
}

/// Wire response from the image endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}

/// One generated/edited image result. The provider returns either an
/// inline base64 payload or a URL; a result carrying neither is a
/// contract violation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageDatum {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Parameters for POST /videos.
#[derive(Debug, Clone)]
pub struct VideoCreateCall {
    pub prompt: String,
    pub model: String,
    pub seconds: String,
    pub size: String,
    pub input_reference: Option<ImageUpload>,
}

/// Single authenticated gateway to the remote provider.
///
/// Construction is cheap and side-effect-free: the credential is only
/// checked when an operation is issued, so a server can boot without a
/// key and fail individual requests instead of refusing to start.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ProviderClient {
    /// Create a client with an explicit credential and base URL.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Create a client from the environment (`OPENAI_API_KEY` or `API_KEY`,
    /// with `.env` discovery). Never fails; a missing credential surfaces
    /// on the first provider call.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::new(resolve_api_key(), DEFAULT_BASE_URL)
    }

    /// Guarded precondition shared by every operation.
    fn credential(&self) -> ProviderResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ProviderError::configuration(
                "Set OPENAI_API_KEY or API_KEY in the environment or in a .env file at the repo root.",
            )
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Turn non-2xx replies into `ProviderError::Api` with the body text.
    async fn check(response: Response) -> ProviderResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Api { status, body })
    }

    /// POST /images/generations
    pub async fn generate_images(&self, call: &ImageGenerationCall) -> ProviderResult<ImagesResponse> {
        let key = self.credential()?;
        debug!(model = %call.model, n = call.n, size = %call.size, "Issuing image generation");
        let response = self
            .http
            .post(self.url("/images/generations"))
            .bearer_auth(key)
            .json(call)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST /images/edits (multipart; image parts keep caller order)
    pub async fn edit_images(
        &self,
        prompt: &str,
        model: &str,
        images: &[ImageUpload],
    ) -> ProviderResult<ImagesResponse> {
        let key = self.credential()?;
        debug!(model, count = images.len(), "Issuing image edit");

        let mut form = Form::new()
            .text("model", model.to_string())
            .text("prompt", prompt.to_string());
        for image in images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.filename.clone())
                .mime_str(&image.content_type)?;
            form = form.part("image[]", part);
        }

        let response = self
            .http
            .post(self.url("/images/edits"))
            .bearer_auth(key)
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST /videos — JSON without a reference image, multipart with one.
    pub async fn create_video(&self, call: &VideoCreateCall) -> ProviderResult<VideoJobEnvelope> {
        let key = self.credential()?;
        debug!(model = %call.model, seconds = %call.seconds, size = %call.size, "Creating video job");

        let request = self.http.post(self.url("/videos")).bearer_auth(key);
        let request = match &call.input_reference {
            None => request.json(&serde_json::json!({
                "prompt": call.prompt,
                "model": call.model,
                "seconds": call.seconds,
                "size": call.size,
            })),
            Some(reference) => {
                let part = Part::bytes(reference.bytes.clone())
                    .file_name(reference.filename.clone())
                    .mime_str(&reference.content_type)?;
                let form = Form::new()
                    .text("prompt", call.prompt.clone())
                    .text("model", call.model.clone())
                    .text("seconds", call.seconds.clone())
                    .text("size", call.size.clone())
                    .part("input_reference", part);
                request.multipart(form)
            }
        };

        Ok(Self::check(request.send().await?).await?.json().await?)
    }

    /// GET /videos/{id} — single uncached remote read.
    pub async fn retrieve_video(&self, video_id: &str) -> ProviderResult<VideoJobEnvelope> {
        let key = self.credential()?;
        let response = self
            .http
            .get(self.url(&format!("/videos/{video_id}")))
            .bearer_auth(key)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /videos/{id}/content — raw MP4 bytes of a completed job.
    pub async fn download_video_content(&self, video_id: &str) -> ProviderResult<Bytes> {
        let key = self.credential()?;
        let response = self
            .http
            .get(self.url(&format!("/videos/{video_id}/content")))
            .bearer_auth(key)
            .send()
            .await?;
        Ok(Self::check(response).await?.bytes().await?)
    }

    /// POST /videos/{id}/remix — new independent job from an existing one.
    pub async fn remix_video(&self, video_id: &str, prompt: &str) -> ProviderResult<VideoJobEnvelope> {
        let key = self.credential()?;
        debug!(video_id, "Creating remix job");
        let response = self
            .http
            .post(self.url(&format!("/videos/{video_id}/remix")))
            .bearer_auth(key)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Plain GET used when an image result arrives as a URL instead of an
    /// inline payload. Not authenticated; provider result URLs are presigned.
    pub async fn fetch_url(&self, url: &str) -> ProviderResult<Bytes> {
        let response = self.http.get(url).send().await?;
        Ok(Self::check(response).await?.bytes().await?)
    }
}

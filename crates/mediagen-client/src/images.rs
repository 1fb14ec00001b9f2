//! Image generation and editing on top of the provider client.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::debug;

use mediagen_models::ImageModel;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{ImageDatum, ImageGenerationCall, ImageUpload, ProviderClient};

/// Caller-supplied generation options. Defaults mirror the API surface:
/// gpt-image-1.5, one image, size resolved per model family.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub model: ImageModel,
    pub size: Option<String>,
    pub quality: Option<String>,
    pub n: u8,
    pub style: Option<String>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            model: ImageModel::default(),
            size: None,
            quality: None,
            n: 1,
            style: None,
        }
    }
}

/// Image operation handler.
pub struct ImageService<'a> {
    client: &'a ProviderClient,
}

impl<'a> ImageService<'a> {
    pub fn new(client: &'a ProviderClient) -> Self {
        Self { client }
    }

    /// Generate image(s) from a prompt and return the first result's bytes.
    pub async fn generate(&self, prompt: &str, opts: &ImageOptions) -> ProviderResult<Vec<u8>> {
        let response = self.client.generate_images(&build_call(prompt, opts)).await?;
        let first = response
            .data
            .first()
            .ok_or_else(|| ProviderError::validation("no image data in response"))?;
        self.decode_item(first).await
    }

    /// Generate up to `n` images and return all of them, in provider order.
    /// DALL-E 3 only ever yields one regardless of the requested count.
    pub async fn generate_all(
        &self,
        prompt: &str,
        opts: &ImageOptions,
    ) -> ProviderResult<Vec<Vec<u8>>> {
        let response = self.client.generate_images(&build_call(prompt, opts)).await?;
        if response.data.is_empty() {
            return Err(ProviderError::validation("no image data in response"));
        }
        let mut images = Vec::with_capacity(response.data.len());
        for item in &response.data {
            images.push(self.decode_item(item).await?);
        }
        Ok(images)
    }

    /// Edit one or more images with a text instruction and return the first
    /// edited result's bytes. Inputs keep their order so prompts like
    /// "replace the object in the first image with the product from the
    /// second" work as written.
    pub async fn edit(
        &self,
        prompt: &str,
        images: &[ImageUpload],
        model: ImageModel,
    ) -> ProviderResult<Vec<u8>> {
        if images.is_empty() {
            return Err(ProviderError::validation("at least one image is required"));
        }
        let response = self
            .client
            .edit_images(prompt, model.as_str(), images)
            .await?;
        let first = response
            .data
            .first()
            .ok_or_else(|| ProviderError::validation("no image data in response"))?;
        self.decode_item(first).await
    }

    /// Extract raw bytes from one result item: inline base64 payload
    /// preferred, URL fetch otherwise. Neither present is a provider
    /// contract violation.
    pub(crate) async fn decode_item(&self, item: &ImageDatum) -> ProviderResult<Vec<u8>> {
        if let Some(b64) = &item.b64_json {
            return BASE64
                .decode(b64)
                .map_err(|e| ProviderError::validation(format!("invalid base64 image payload: {e}")));
        }
        if let Some(url) = &item.url {
            debug!(%url, "Fetching image result from url");
            return Ok(self.client.fetch_url(url).await?.to_vec());
        }
        Err(ProviderError::validation(
            "image result had neither inline data nor a url",
        ))
    }
}

/// Resolve option defaults and model-specific restrictions into a wire call.
fn build_call(prompt: &str, opts: &ImageOptions) -> ImageGenerationCall {
    // DALL-E 3 only accepts n=1; the clamp is silent on purpose.
    let n = if opts.model.single_output_only() { 1 } else { opts.n };
    let size = opts
        .size
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| opts.model.default_size().to_string());
    let quality = opts.quality.clone().filter(|q| !q.is_empty());
    let style = if opts.model.supports_style() {
        opts.style.clone().filter(|s| !s.is_empty())
    } else {
        None
    };

    ImageGenerationCall {
        model: opts.model.as_str().to_string(),
        prompt: prompt.to_string(),
        n,
        size,
        quality,
        style,
        response_format: "b64_json",
    }
}

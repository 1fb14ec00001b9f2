//! Image model catalog and per-family option rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown image model name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown image model: {0}")]
pub struct ParseImageModelError(String);

/// Supported image generation/editing models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    DallE2,
    #[serde(rename = "dall-e-3")]
    DallE3,
    #[serde(rename = "gpt-image-1")]
    GptImage1,
    #[serde(rename = "gpt-image-1-mini")]
    GptImage1Mini,
    #[default]
    #[serde(rename = "gpt-image-1.5")]
    GptImage15,
}

impl ImageModel {
    /// Provider wire name for this model.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::DallE2 => "dall-e-2",
            ImageModel::DallE3 => "dall-e-3",
            ImageModel::GptImage1 => "gpt-image-1",
            ImageModel::GptImage1Mini => "gpt-image-1-mini",
            ImageModel::GptImage15 => "gpt-image-1.5",
        }
    }

    /// Whether this model belongs to the gpt-image family.
    pub fn is_gpt_image(&self) -> bool {
        matches!(
            self,
            ImageModel::GptImage1 | ImageModel::GptImage1Mini | ImageModel::GptImage15
        )
    }

    /// Default size when the caller did not supply one.
    pub fn default_size(&self) -> &'static str {
        if self.is_gpt_image() {
            "auto"
        } else {
            "1024x1024"
        }
    }

    /// DALL-E 3 only ever returns a single image regardless of `n`.
    pub fn single_output_only(&self) -> bool {
        matches!(self, ImageModel::DallE3)
    }

    /// The `style` parameter (vivid/natural) is a DALL-E 3 exclusive.
    pub fn supports_style(&self) -> bool {
        matches!(self, ImageModel::DallE3)
    }

    /// Valid sizes for this model family.
    pub fn sizes(&self) -> &'static [&'static str] {
        match self {
            ImageModel::DallE2 => &["256x256", "512x512", "1024x1024"],
            ImageModel::DallE3 => &["1024x1024", "1792x1024", "1024x1792"],
            _ => &["1024x1024", "1536x1024", "1024x1536", "auto"],
        }
    }
}

impl std::fmt::Display for ImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImageModel {
    type Err = ParseImageModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dall-e-2" => Ok(ImageModel::DallE2),
            "dall-e-3" => Ok(ImageModel::DallE3),
            "gpt-image-1" => Ok(ImageModel::GptImage1),
            "gpt-image-1-mini" => Ok(ImageModel::GptImage1Mini),
            "gpt-image-1.5" => Ok(ImageModel::GptImage15),
            other => Err(ParseImageModelError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_gpt_image_15() {
        assert_eq!(ImageModel::default(), ImageModel::GptImage15);
        assert!(ImageModel::default().is_gpt_image());
    }

    #[test]
    fn test_default_sizes_per_family() {
        assert_eq!(ImageModel::GptImage15.default_size(), "auto");
        assert_eq!(ImageModel::GptImage1Mini.default_size(), "auto");
        assert_eq!(ImageModel::DallE3.default_size(), "1024x1024");
        assert_eq!(ImageModel::DallE2.default_size(), "1024x1024");
    }

    #[test]
    fn test_style_and_single_output_rules() {
        assert!(ImageModel::DallE3.supports_style());
        assert!(ImageModel::DallE3.single_output_only());
        assert!(!ImageModel::GptImage15.supports_style());
        assert!(!ImageModel::GptImage15.single_output_only());
    }

    #[test]
    fn test_unknown_model_parse_error() {
        let err = "dall-e-9".parse::<ImageModel>().unwrap_err();
        assert_eq!(err.to_string(), "unknown image model: dall-e-9");
    }

    #[test]
    fn test_serde_wire_names() {
        let m: ImageModel = serde_json::from_str("\"gpt-image-1.5\"").unwrap();
        assert_eq!(m, ImageModel::GptImage15);
        assert_eq!(serde_json::to_string(&ImageModel::DallE3).unwrap(), "\"dall-e-3\"");
    }
}

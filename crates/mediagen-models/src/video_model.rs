//! Video model catalog and clip option enums.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown video model name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown video model: {0}")]
pub struct ParseVideoModelError(String);

/// Error returned when parsing an unsupported clip duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duration must be 4, 8 or 12 seconds, got {0}")]
pub struct ParseVideoSecondsError(String);

/// Resolutions accepted by the video endpoint.
pub const VIDEO_SIZES: &[&str] = &["720x1280", "1280x720", "1024x1792", "1792x1024"];

/// Supported video generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VideoModel {
    #[default]
    #[serde(rename = "sora-2")]
    Sora2,
    #[serde(rename = "sora-2-pro")]
    Sora2Pro,
}

impl VideoModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoModel::Sora2 => "sora-2",
            VideoModel::Sora2Pro => "sora-2-pro",
        }
    }
}

impl std::fmt::Display for VideoModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VideoModel {
    type Err = ParseVideoModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sora-2" => Ok(VideoModel::Sora2),
            "sora-2-pro" => Ok(VideoModel::Sora2Pro),
            other => Err(ParseVideoModelError(other.to_string())),
        }
    }
}

/// Clip duration. The provider takes these as strings, not numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VideoSeconds {
    #[default]
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "12")]
    Twelve,
}

impl VideoSeconds {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoSeconds::Four => "4",
            VideoSeconds::Eight => "8",
            VideoSeconds::Twelve => "12",
        }
    }
}

impl std::fmt::Display for VideoSeconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VideoSeconds {
    type Err = ParseVideoSecondsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" => Ok(VideoSeconds::Four),
            "8" => Ok(VideoSeconds::Eight),
            "12" => Ok(VideoSeconds::Twelve),
            other => Err(ParseVideoSecondsError(other.to_string())),
        }
    }
}

//! Client for the remote generative media provider.
//!
//! This crate provides:
//! - [`ProviderClient`]: the single authenticated gateway to the provider
//! - [`ImageService`]: image generation and editing on top of it
//! - [`VideoService`]: the asynchronous video job lifecycle
//!   (create, poll until terminal, download, remix)
//!
//! The client holds no state beyond the credential and never retries a
//! mutating call. Job state lives entirely on the provider; status reads
//! always reflect current remote truth.

pub mod env;
pub mod error;
pub mod images;
pub mod provider;
pub mod videos;

pub use env::{load_dotenv, resolve_api_key};
pub use error::{ProviderError, ProviderResult};
pub use images::{ImageOptions, ImageService};
pub use provider::{ImageUpload, ProviderClient, DEFAULT_BASE_URL};
pub use videos::{VideoCreateParams, VideoService};

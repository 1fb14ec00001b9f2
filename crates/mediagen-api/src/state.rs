//! Application state.

use std::sync::Arc;

use mediagen_client::ProviderClient;

use crate::config::ApiConfig;

/// Shared application state.
///
/// The provider client is the only shared resource; it is immutable and
/// constructed without a credential check, so the server boots even when
/// no API key is configured and individual requests fail instead.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub provider: Arc<ProviderClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            provider: Arc::new(ProviderClient::from_env()),
        }
    }
}

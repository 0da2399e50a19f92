//! Video search providers.
//!
//! Every provider implements [`VideoSearch`]; the rest of the application
//! only ever sees the trait object, so handlers are written once regardless
//! of which backend is configured.

pub mod invidious;
pub mod youtube;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::{SearchConfig, SearchProvider};
use crate::models::{RawVideo, VideoDetails};

pub use invidious::InvidiousClient;
pub use youtube::YoutubeClient;

/// Any failure of an upstream search call. Callers treat all variants alike.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{provider} response could not be parsed: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },
}

impl SearchError {
    pub(crate) fn request(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Request { provider, source }
    }

    pub(crate) fn parse(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            message: message.into(),
        }
    }
}

#[async_trait::async_trait]
pub trait VideoSearch: Send + Sync {
    /// Short provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Returns at most `limit` videos for `keyword`, in provider ranking order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport failures, non-success statuses,
    /// and responses in an unexpected shape.
    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<RawVideo>, SearchError>;

    /// Looks up a single video. `Ok(None)` means the provider does not know it.
    async fn video(&self, id: &str) -> Result<Option<VideoDetails>, SearchError>;
}

/// Build the HTTP client shared by the configured provider.
pub fn build_http_client(config: &SearchConfig) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Instantiates the provider selected in the configuration.
pub fn build_provider(config: &SearchConfig) -> anyhow::Result<Arc<dyn VideoSearch>> {
    let client = build_http_client(config)?;

    let provider: Arc<dyn VideoSearch> = match config.provider {
        SearchProvider::Youtube => Arc::new(YoutubeClient::with_shared_client(client, config)),
        SearchProvider::Invidious => {
            Arc::new(InvidiousClient::with_shared_client(client, config)?)
        }
    };

    Ok(provider)
}

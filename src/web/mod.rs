use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::clients::{self, VideoSearch};
use crate::config::Config;
use crate::services::SearchService;

mod error;
mod observability;
mod pages;
pub mod render;

pub use error::PageError;
pub use render::Renderer;

/// Everything a request handler needs. Built once at startup and never
/// mutated afterwards.
pub struct AppState {
    pub config: Arc<Config>,

    pub search: Arc<SearchService>,

    pub renderer: Renderer,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: Config,
        provider: Arc<dyn VideoSearch>,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        let search = Arc::new(SearchService::new(
            provider,
            config.search.result_limit,
            config.search.related_limit,
        ));
        let renderer = Renderer::new(&config.ui);

        Self {
            config: Arc::new(config),
            search,
            renderer,
            prometheus_handle,
        }
    }
}

/// Builds application state with the provider selected in `config`.
pub fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let provider = clients::build_provider(&config.search)?;
    Ok(Arc::new(AppState::new(config, provider, prometheus_handle)))
}

#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/search", get(pages::search))
        .route("/watch", get(pages::watch))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

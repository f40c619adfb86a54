//! HTTP API server for the country exchange service.
//!
//! Exposes the refresh pipeline and the query operations over persisted
//! country records, with structured logging (tracing), Prometheus metrics,
//! and configurable CORS.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use country_store::CountryStore;
use sources::{CatalogSource, RateSource};

pub use config::{Config, ConfigError};
use routes::countries::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C, R, S>(
    state: Arc<AppState<C, R, S>>,
    metrics_handle: PrometheusHandle,
    allowed_origins: &[String],
) -> Router
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/countries/refresh", post(routes::countries::refresh::<C, R, S>))
        .route("/countries/image", get(routes::countries::image::<C, R, S>))
        .route("/countries", get(routes::countries::list::<C, R, S>))
        .route(
            "/countries/{name}",
            get(routes::countries::get_one::<C, R, S>).delete(routes::countries::delete::<C, R, S>),
        )
        .route("/status", get(routes::status::get::<C, R, S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer from the configured origin list. A literal `*`
/// entry allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

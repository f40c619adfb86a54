//! Store status endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use country_store::CountryStore;
use sources::{CatalogSource, RateSource};

use crate::error::ApiError;
use crate::routes::countries::{AppState, iso8601};

#[derive(Serialize)]
pub struct StatusResponse {
    pub total_countries: i64,
    pub last_refreshed_at: Option<String>,
}

/// GET /status — record count and latest refresh timestamp.
#[tracing::instrument(skip(state))]
pub async fn get<C, R, S>(
    State(state): State<Arc<AppState<C, R, S>>>,
) -> Result<Json<StatusResponse>, ApiError>
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    let status = state.service.store_status().await?;

    Ok(Json(StatusResponse {
        total_countries: status.total,
        last_refreshed_at: status.last_refreshed_at.map(iso8601),
    }))
}

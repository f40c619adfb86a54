//! Country refresh, query, deletion, and summary image endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use country_store::{Country, CountryFilter, CountryStore, SortOrder};
use domain::CountryService;
use sources::{CatalogSource, RateSource};

use crate::error::ApiError;

/// How many records the summary image ranks.
const SUMMARY_TOP_N: usize = 5;

/// Shared application state accessible from all handlers.
pub struct AppState<C, R, S> {
    pub service: CountryService<C, R, S>,
    pub summary_image_path: PathBuf,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct CountryResponse {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            name: country.name.as_str().to_string(),
            capital: country.capital,
            region: country.region,
            population: country.population,
            currency_code: country.currency_code,
            exchange_rate: country.exchange_rate,
            estimated_gdp: country.estimated_gdp,
            flag_url: country.flag_url,
            last_refreshed_at: iso8601(country.last_refreshed_at),
        }
    }
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
    pub total: usize,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
}

/// ISO-8601 with a trailing `Z`, the timestamp format of every response.
pub(crate) fn iso8601(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// -- Handlers --

/// POST /countries/refresh — fetch both sources and reconcile storage.
///
/// The summary image is produced by a detached task after the response is
/// built, from a snapshot of the freshly reconciled rows; its failure never
/// affects the reported refresh outcome.
#[tracing::instrument(skip(state))]
pub async fn refresh<C, R, S>(
    State(state): State<Arc<AppState<C, R, S>>>,
) -> Result<Json<RefreshResponse>, ApiError>
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    let outcome = state.service.refresh().await?;

    let status = state.service.store_status().await?;
    let top = state.service.top_by_estimated_gdp(SUMMARY_TOP_N).await?;
    let path = state.summary_image_path.clone();

    tokio::spawn(async move {
        let rendered = tokio::task::spawn_blocking(move || {
            renderer::render_summary(&path, status.total, &top, outcome.refreshed_at)
        })
        .await;

        match rendered {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "summary image generation failed"),
            Err(e) => tracing::warn!(error = %e, "summary image task panicked"),
        }
    });

    Ok(Json(RefreshResponse {
        status: "refresh completed",
        total: outcome.fetched,
    }))
}

/// GET /countries — list records, optionally filtered and sorted.
#[tracing::instrument(skip(state))]
pub async fn list<C, R, S>(
    State(state): State<Arc<AppState<C, R, S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CountryResponse>>, ApiError>
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    let mut filter = CountryFilter::new();

    // Empty query values are treated as absent.
    if let Some(region) = params.region.filter(|region| !region.is_empty()) {
        filter = filter.region(region);
    }
    if let Some(currency) = params.currency.filter(|currency| !currency.is_empty()) {
        filter = filter.currency_code(currency);
    }
    match params.sort.as_deref().filter(|sort| !sort.is_empty()) {
        None => {}
        Some("gdp_desc") => filter = filter.sort(SortOrder::EstimatedGdpDesc),
        Some(other) => {
            return Err(ApiError::Validation {
                field: "sort",
                message: format!("unsupported sort {other:?}, expected \"gdp_desc\""),
            });
        }
    }

    let countries = state.service.list_countries(filter).await?;
    Ok(Json(countries.into_iter().map(Into::into).collect()))
}

/// GET /countries/:name — fetch a single record, name matched
/// case-insensitively.
#[tracing::instrument(skip(state))]
pub async fn get_one<C, R, S>(
    State(state): State<Arc<AppState<C, R, S>>>,
    Path(name): Path<String>,
) -> Result<Json<CountryResponse>, ApiError>
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    let country = state
        .service
        .get_country(&name)
        .await?
        .ok_or(ApiError::NotFound("Country not found"))?;

    Ok(Json(country.into()))
}

/// DELETE /countries/:name — delete a single record, name matched
/// case-insensitively.
#[tracing::instrument(skip(state))]
pub async fn delete<C, R, S>(
    State(state): State<Arc<AppState<C, R, S>>>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError>
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    if !state.service.delete_country(&name).await? {
        return Err(ApiError::NotFound("Country not found"));
    }

    Ok(Json(DeleteResponse { status: "deleted" }))
}

/// GET /countries/image — the most recently generated summary image.
#[tracing::instrument(skip(state))]
pub async fn image<C, R, S>(
    State(state): State<Arc<AppState<C, R, S>>>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CatalogSource + 'static,
    R: RateSource + 'static,
    S: CountryStore + 'static,
{
    match tokio::fs::read(&state.summary_image_path).await {
        Ok(bytes) => Ok((
            [(axum::http::header::CONTENT_TYPE, "image/png")],
            bytes,
        )),
        Err(_) => Err(ApiError::NotFound("Summary image not found")),
    }
}

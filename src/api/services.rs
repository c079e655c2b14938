use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use super::{
    error::ApiError,
    models::{CheckQuery, DomainReport, HealthResponse, LookupQuery},
    state::AppState,
    validation::{resolve_country, validate_bundle_id, validate_domain},
};
use crate::appstore::AppStoreLookupResult;
use crate::manifest::{AppDetails, app_details_from_package};

/// GET /api/check?domain=example.com
pub async fn check_domain(
    State(state): State<AppState>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<DomainReport>, ApiError> {
    run_check(&state, &query.domain).await.map(Json)
}

/// GET /api/domains/{domain}
pub async fn domain_page(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<DomainReport>, ApiError> {
    run_check(&state, &domain).await.map(Json)
}

async fn run_check(state: &AppState, input: &str) -> Result<DomainReport, ApiError> {
    let domain = validate_domain(input)?;

    let _permit = state
        .check_permits
        .acquire()
        .await
        .map_err(|e| ApiError::Internal(format!("check limiter closed: {}", e)))?;

    state.metrics.check_started();
    let result = state.discoverer.check(domain).await;

    info!(
        check_id = %result.check_id,
        origin = %result.origin,
        android_valid = result.android.valid,
        apple_valid = result.apple.valid,
        "Domain check finished"
    );

    Ok(DomainReport::from_result(result))
}

/// GET /api/appstore/lookup?bundle_id=com.example.app&country=us
pub async fn appstore_lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<AppStoreLookupResult>, ApiError> {
    let bundle_id = validate_bundle_id(&query.bundle_id)?;
    let country = resolve_country(
        query.country.as_deref(),
        &state.config.app_store.default_country,
    )?;

    state.metrics.store_lookup();
    debug!(bundle_id, country = %country, "App Store lookup requested");

    Ok(Json(state.store.lookup(bundle_id, &country).await))
}

/// GET /api/android/details/{package}
pub async fn android_details(Path(package): Path<String>) -> Json<AppDetails> {
    Json(app_details_from_package(&package))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: state.metrics.snapshot(),
    };

    (StatusCode::OK, Json(response))
}

//! API route handlers.
//!
//! Every mutating route reads the caller principal from the
//! `x-adnet-caller` header; the registries receive it as the caller identity.
//! `record_earnings` takes the header for attribution in logs but the
//! registry applies no ownership gate to it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, info};

use adnet_core::types::Principal;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Header carrying the caller principal.
pub const CALLER_HEADER: &str = "x-adnet-caller";

/// Extracts the caller principal from the request headers.
fn caller(headers: &HeaderMap) -> Result<Principal> {
    let value = headers
        .get(CALLER_HEADER)
        .ok_or_else(|| ApiError::bad_request(format!("missing {} header", CALLER_HEADER)))?;
    let s = value
        .to_str()
        .map_err(|_| ApiError::bad_request(format!("invalid {} header", CALLER_HEADER)))?;
    Principal::new(s).map_err(ApiError::from)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADS
// ═══════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/ads
pub async fn create_ad(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateAdRequest>,
) -> Result<Json<CreateAdResponse>> {
    let caller = caller(&headers)?;

    let ad_id = state
        .ads
        .create_ad(&caller, req.content_url, req.target_demographics, req.budget)
        .await?;

    info!(ad_id, %caller, "Created ad campaign");
    Ok(Json(CreateAdResponse { ad_id }))
}

/// GET /api/v1/ads/:id
pub async fn get_ad(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<u64>,
) -> Result<Json<AdDto>> {
    let ad = state.ads.get_ad(ad_id).await?;
    Ok(Json(AdDto::from(ad)))
}

/// PUT /api/v1/ads/:id/status
pub async fn update_ad_status(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<u64>,
    headers: HeaderMap,
    Json(req): Json<UpdateAdStatusRequest>,
) -> Result<StatusCode> {
    let caller = caller(&headers)?;

    state.ads.update_ad_status(&caller, ad_id, &req.status).await?;

    debug!(ad_id, status = %req.status, "Updated ad status");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/ads/:id/budget
pub async fn update_ad_budget(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<u64>,
    headers: HeaderMap,
    Json(req): Json<UpdateAdBudgetRequest>,
) -> Result<StatusCode> {
    let caller = caller(&headers)?;

    state.ads.update_ad_budget(&caller, ad_id, req.budget).await?;

    debug!(ad_id, budget = req.budget, "Updated ad budget");
    Ok(StatusCode::NO_CONTENT)
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLISHERS
// ═══════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/publishers
pub async fn register_publisher(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RegisterPublisherRequest>,
) -> Result<Json<RegisterPublisherResponse>> {
    let caller = caller(&headers)?;

    let publisher_id = state
        .publishers
        .register_publisher(&caller, req.website, req.ad_spaces)
        .await?;

    info!(publisher_id, %caller, "Registered publisher");
    Ok(Json(RegisterPublisherResponse { publisher_id }))
}

/// GET /api/v1/publishers/:id
pub async fn get_publisher(
    State(state): State<Arc<AppState>>,
    Path(publisher_id): Path<u64>,
) -> Result<Json<PublisherDto>> {
    let publisher = state.publishers.get_publisher(publisher_id).await?;
    Ok(Json(PublisherDto::from(publisher)))
}

/// PUT /api/v1/publishers/:id/ad-spaces
pub async fn update_ad_spaces(
    State(state): State<Arc<AppState>>,
    Path(publisher_id): Path<u64>,
    headers: HeaderMap,
    Json(req): Json<UpdateAdSpacesRequest>,
) -> Result<StatusCode> {
    let caller = caller(&headers)?;

    state
        .publishers
        .update_ad_spaces(&caller, publisher_id, req.ad_spaces)
        .await?;

    debug!(publisher_id, "Updated ad spaces");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/publishers/:id/earnings
pub async fn record_earnings(
    State(state): State<Arc<AppState>>,
    Path(publisher_id): Path<u64>,
    headers: HeaderMap,
    Json(req): Json<RecordEarningsRequest>,
) -> Result<StatusCode> {
    // Any caller may credit; the header only attributes the credit in logs.
    let caller = caller(&headers)?;

    state.publishers.record_earnings(publisher_id, req.amount).await?;

    info!(publisher_id, amount = req.amount, %caller, "Recorded earnings");
    Ok(StatusCode::NO_CONTENT)
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let ads = state.ads.stats().await?;
    let publishers = state.publishers.stats().await?;
    Ok(Json(StatsResponse { ads, publishers }))
}

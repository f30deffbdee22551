//! Pricing route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::error::{AppError, Result};
use crate::AppState;

use super::models::RatePolicy;
use super::requests::QuoteRequestBody;
use super::responses::{QuoteResponse, RatePolicyResponse};

/// Pricing API routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/rules", get(get_rules).put(put_rules))
}

/// Price a reservation request against the active rules
pub async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequestBody>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(body) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let quote = state.pricing.quote(&body).await?;
    Ok(Json(QuoteResponse::from(quote)))
}

/// Current rate policy
pub async fn get_rules(State(state): State<AppState>) -> Json<RatePolicyResponse> {
    Json(state.pricing.active_policy().await.into())
}

/// Replace the rate policy (rules push)
pub async fn put_rules(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RatePolicy>, JsonRejection>,
) -> Result<Json<RatePolicyResponse>> {
    let Json(policy) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let active = state.pricing.replace_policy(policy).await?;
    info!(updated_at = %active.updated_at, "Pricing rules pushed");
    Ok(Json(active.into()))
}

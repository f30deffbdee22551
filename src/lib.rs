//! Quote engine for pet resort boarding and daycare reservations.

pub mod config;
pub mod error;
pub mod pricing;

use axum::{routing::get, Json, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use pricing::responses::HealthResponse;
use pricing::PricingService;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub pricing: PricingService,
}

impl AppState {
    pub fn new(pricing: PricingService) -> Self {
        Self { pricing }
    }
}

/// Build the full application router
pub fn app(state: AppState, cors_allow_any: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    if cors_allow_any {
        router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    } else {
        router
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

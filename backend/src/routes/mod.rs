//! Route definitions for the Krishi dashboard API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::services::diagnosis::MAX_REQUEST_BYTES;
use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/season", get(handlers::get_season))
        .route("/weather", get(handlers::get_weather))
        .route(
            "/diagnosis",
            post(handlers::diagnose_crop).layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .route("/voice/query", post(handlers::voice_query))
        .nest("/fields/:field_id", field_routes())
        .nest("/market", market_routes())
        .nest("/location", location_routes())
}

/// Per-field panels
fn field_routes() -> Router<AppState> {
    Router::new()
        .route("/soil", get(handlers::get_soil))
        .route("/nutrients", get(handlers::get_nutrients))
        .route("/crop-stage", get(handlers::get_crop_stage))
        .route("/disease-pest", get(handlers::get_disease_pest))
        .route("/sensors", get(handlers::get_sensor_history))
        .route("/satellite", get(handlers::get_satellite))
        .route("/dashboard", get(handlers::get_field_dashboard))
}

/// Market intelligence
fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(handlers::get_market_quotes))
        .route("/:commodity/insight", get(handlers::get_market_insight))
}

/// Geocoding
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/reverse", get(handlers::reverse_geocode))
        .route("/search", get(handlers::search_location))
}

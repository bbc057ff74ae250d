//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub tracked_fields: usize,
    pub integrations: IntegrationStatus,
}

/// true = live integration, false = demo data
#[derive(Serialize)]
pub struct IntegrationStatus {
    pub soilgrids: bool,
    pub weather: bool,
    pub market: bool,
    pub geocoding: bool,
    pub earthdata: bool,
    pub gemini: bool,
    pub elevenlabs: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let integrations = &state.integrations;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        tracked_fields: state.demo.field_count().await,
        integrations: IntegrationStatus {
            soilgrids: integrations.soilgrids.is_some(),
            weather: integrations.weather.is_some(),
            market: integrations.market.is_some(),
            geocoding: integrations.geocoding.is_some(),
            earthdata: integrations.earthdata.is_some(),
            gemini: integrations.gemini.is_some(),
            elevenlabs: integrations.elevenlabs.is_some(),
        },
    })
}

//! Weather handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Sourced, WeatherReport};

use super::{check_field_id, required_location};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Field whose soil moisture drives the irrigation advice
    pub field_id: Option<String>,
}

/// Current conditions, 5-day outlook, irrigation advice and alerts
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<Sourced<WeatherReport>>> {
    let location = required_location(query.lat, query.lon)?;
    if let Some(field_id) = &query.field_id {
        check_field_id(field_id)?;
    }
    let panel = state
        .weather_service()
        .report(location, query.field_id.as_deref())
        .await;
    Ok(Json(panel))
}

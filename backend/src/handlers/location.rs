//! Geocoding handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::Sourced;

use super::required_location;
use crate::error::AppResult;
use crate::external::geocoding::Place;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Place name for coordinates
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> AppResult<Json<Sourced<Place>>> {
    let location = required_location(query.lat, query.lon)?;
    Ok(Json(state.location_service().reverse(location).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Places matching a search text
pub async fn search_location(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Sourced<Vec<Place>>>> {
    Ok(Json(state.location_service().search(&query.q).await?))
}

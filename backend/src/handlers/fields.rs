//! Per-field panel handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{
    CropStageReading, DiseasePestReport, NutrientReport, SatelliteReport, Season, SoilAnalysis,
    Sourced,
};
use validator::Validate;

use super::{check_field_id, optional_location};
use crate::error::AppResult;
use crate::services::dashboard::FieldDashboard;
use crate::services::ExportService;
use crate::AppState;

/// Crop assumed when a request names none
pub const DEFAULT_CROP: &str = "wheat";

#[derive(Debug, Deserialize)]
pub struct FieldLocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Soil panel
pub async fn get_soil(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<FieldLocationQuery>,
) -> AppResult<Json<Sourced<SoilAnalysis>>> {
    check_field_id(&field_id)?;
    let location = optional_location(query.lat, query.lon)?;
    Ok(Json(state.soil_service().analyze(&field_id, location).await))
}

/// Nutrient panel
pub async fn get_nutrients(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<FieldLocationQuery>,
) -> AppResult<Json<Sourced<NutrientReport>>> {
    check_field_id(&field_id)?;
    let location = optional_location(query.lat, query.lon)?;
    Ok(Json(state.soil_service().nutrients(&field_id, location).await))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CropStageQuery {
    #[validate(length(min = 1, max = 50))]
    pub crop: Option<String>,
    pub sowing_date: Option<NaiveDate>,
}

/// Crop growth stage panel
pub async fn get_crop_stage(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<CropStageQuery>,
) -> AppResult<Json<Sourced<CropStageReading>>> {
    check_field_id(&field_id)?;
    query.validate()?;
    let crop = query.crop.as_deref().unwrap_or(DEFAULT_CROP);
    let panel = state
        .crop_stage_service()
        .reading(&field_id, crop, query.sowing_date)
        .await;
    Ok(Json(panel))
}

/// Disease and pest panel
pub async fn get_disease_pest(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> AppResult<Json<Sourced<DiseasePestReport>>> {
    check_field_id(&field_id)?;
    Ok(Json(state.disease_pest_service().report(&field_id).await))
}

#[derive(Debug, Deserialize)]
pub struct SensorQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Rolling sensor history
pub async fn get_sensor_history(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<SensorQuery>,
) -> AppResult<Response> {
    check_field_id(&field_id)?;
    let history = state.demo.history(&field_id).await;

    if query.format.as_deref() == Some("csv") {
        let csv = ExportService::sensor_history_csv(&history)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}_sensors.csv\"", field_id),
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(Sourced::demo(Season::current(), history)).into_response())
    }
}

/// Satellite panel
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<FieldLocationQuery>,
) -> AppResult<Json<Sourced<SatelliteReport>>> {
    check_field_id(&field_id)?;
    let location = optional_location(query.lat, query.lon)?;
    Ok(Json(state.satellite_service().report(&field_id, location).await))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[validate(length(min = 1, max = 50))]
    pub crop: Option<String>,
}

/// Every panel for a field in one response
pub async fn get_field_dashboard(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<FieldDashboard>> {
    check_field_id(&field_id)?;
    query.validate()?;
    let location = optional_location(query.lat, query.lon)?;
    let crop = query.crop.as_deref().unwrap_or(DEFAULT_CROP);
    Ok(Json(
        state
            .dashboard_service()
            .field(&field_id, location, crop)
            .await,
    ))
}

//! Crop photo diagnosis handler

use axum::{extract::State, Json};
use shared::{CropDiagnosis, Sourced};

use crate::error::AppResult;
use crate::services::diagnosis::DiagnosisInput;
use crate::AppState;

pub async fn diagnose_crop(
    State(state): State<AppState>,
    Json(input): Json<DiagnosisInput>,
) -> AppResult<Json<Sourced<CropDiagnosis>>> {
    Ok(Json(state.diagnosis_service().diagnose(&input).await?))
}

//! Voice assistant handler

use axum::{extract::State, Json};
use shared::Sourced;

use crate::error::AppResult;
use crate::services::voice::{VoiceAnswer, VoiceQueryInput};
use crate::AppState;

pub async fn voice_query(
    State(state): State<AppState>,
    Json(input): Json<VoiceQueryInput>,
) -> AppResult<Json<Sourced<VoiceAnswer>>> {
    Ok(Json(state.voice_service().query(&input).await?))
}

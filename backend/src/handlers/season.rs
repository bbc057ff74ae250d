//! Season lookup

use axum::{extract::Query, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::Season;

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub date: NaiveDate,
    pub season: Season,
}

/// Season for a date, today by default
pub async fn get_season(Query(query): Query<SeasonQuery>) -> Json<SeasonResponse> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Json(SeasonResponse {
        date,
        season: Season::from_date(&date),
    })
}

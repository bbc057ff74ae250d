//! Market handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{MarketInsight, MarketQuote, Sourced};

use crate::error::{AppError, AppResult};
use crate::services::market::DEFAULT_COMMODITIES;
use crate::AppState;

const MAX_COMMODITIES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct QuotesQuery {
    /// Comma separated names
    pub commodities: Option<String>,
}

fn parse_commodities(raw: Option<&str>) -> AppResult<Vec<String>> {
    let names: Vec<String> = match raw {
        Some(list) => list
            .split(',')
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .collect(),
        None => DEFAULT_COMMODITIES.iter().map(|c| c.to_string()).collect(),
    };
    if names.is_empty() || names.len() > MAX_COMMODITIES {
        return Err(AppError::invalid(
            "commodities",
            "Give between 1 and 10 commodities",
            "1 से 10 फसलों के नाम दें",
        ));
    }
    Ok(names)
}

/// Price quotes
pub async fn get_market_quotes(
    State(state): State<AppState>,
    Query(query): Query<QuotesQuery>,
) -> AppResult<Json<Sourced<Vec<MarketQuote>>>> {
    let commodities = parse_commodities(query.commodities.as_deref())?;
    Ok(Json(state.market_service().quotes(&commodities).await?))
}

/// Narrative insight for one commodity
pub async fn get_market_insight(
    State(state): State<AppState>,
    Path(commodity): Path<String>,
) -> AppResult<Json<Sourced<MarketInsight>>> {
    let commodity = commodity.trim().to_ascii_lowercase();
    Ok(Json(state.market_service().insight(&commodity).await?))
}

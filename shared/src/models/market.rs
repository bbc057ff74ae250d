//! Market price models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classification::Trend;

/// Price quote for a commodity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub commodity: String,
    pub unit: String,
    pub currency: String,
    pub current_price: Decimal,
    pub change_percent: Decimal,
    pub trend: Trend,
    pub prediction: PricePrediction,
}

/// Projected prices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePrediction {
    pub next_week: Decimal,
    pub next_month: Decimal,
    /// 0..=1
    pub confidence: f64,
}

/// Narrative market intelligence for one commodity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketInsight {
    pub commodity: String,
    pub summary: String,
    pub selling_advice: String,
    pub key_factors: Vec<String>,
    /// 0..=1
    pub confidence: f64,
}

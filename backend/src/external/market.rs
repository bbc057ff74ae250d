//! Alpha Vantage commodities client
//!
//! Only a handful of global commodities are covered. Prices are monthly
//! averages in USD per metric ton, so the quote carries its own unit and
//! currency rather than the mandi INR per quintal of the generated quotes.

use reqwest::Client;
use serde::Deserialize;
use shared::simulation::market::to_price;
use shared::{classify_trend, thresholds, MarketQuote, PricePrediction};

use super::read_json;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CommodityResponse {
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    data: Option<Vec<DataPoint>>,
    /// Rate limit and key notices arrive with a 200 status
    #[serde(rename = "Information", alias = "Note", default)]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DataPoint {
    #[allow(dead_code)]
    date: String,
    value: String,
}

/// Alpha Vantage function name for a commodity
pub fn function_for(commodity: &str) -> Option<&'static str> {
    match commodity.to_ascii_lowercase().as_str() {
        "wheat" => Some("WHEAT"),
        "maize" | "corn" => Some("CORN"),
        "cotton" => Some("COTTON"),
        "sugar" | "sugarcane" => Some("SUGAR"),
        _ => None,
    }
}

impl AlphaVantageClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Latest monthly quote for a commodity
    pub async fn get_quote(&self, commodity: &str) -> AppResult<MarketQuote> {
        let function = function_for(commodity).ok_or_else(|| {
            AppError::ExternalService(format!("Alpha Vantage has no series for {}", commodity))
        })?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", function),
                ("interval", "monthly"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let body: CommodityResponse = read_json(response, "Alpha Vantage").await?;

        quote_from_response(commodity, body)
    }
}

fn quote_from_response(commodity: &str, body: CommodityResponse) -> AppResult<MarketQuote> {
    if let Some(info) = body.information {
        return Err(AppError::ExternalService(format!("Alpha Vantage: {}", info)));
    }

    // Newest first; missing months are reported as "."
    let prices: Vec<f64> = body
        .data
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p.value.parse::<f64>().ok())
        .take(6)
        .collect();

    if prices.len() < 2 {
        return Err(AppError::ExternalService(format!(
            "Alpha Vantage returned too few prices for {}",
            commodity
        )));
    }

    let current = prices[0];
    let previous = prices[1];
    let change_percent = (current - previous) / previous * 100.0;

    // Average month over month slope across the window
    let oldest = prices[prices.len() - 1];
    let monthly_slope = (current - oldest) / (prices.len() - 1) as f64;
    let next_month = current + monthly_slope;
    let next_week = current + monthly_slope / 4.0;

    // Steadier series earn more confidence
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    let variance = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / prices.len() as f64;
    let cv = if mean > 0.0 { variance.sqrt() / mean } else { 1.0 };
    let confidence = (0.9 - cv * 2.0).clamp(0.5, 0.9);

    Ok(MarketQuote {
        commodity: commodity.to_ascii_lowercase(),
        unit: body.unit.unwrap_or_else(|| "dollar per metric ton".to_string()),
        currency: "USD".to_string(),
        current_price: to_price(current),
        change_percent: to_price(change_percent),
        trend: classify_trend(change_percent, thresholds::MARKET_TREND_TOLERANCE_PCT),
        prediction: PricePrediction {
            next_week: to_price(next_week),
            next_month: to_price(next_month),
            confidence,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::Trend;

    fn parse(json: &str) -> CommodityResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_function_mapping() {
        assert_eq!(function_for("Wheat"), Some("WHEAT"));
        assert_eq!(function_for("maize"), Some("CORN"));
        assert_eq!(function_for("onion"), None);
    }

    #[test]
    fn test_quote_from_series() {
        let body = parse(
            r#"{
                "name": "Global Price of Wheat",
                "interval": "monthly",
                "unit": "dollar per metric ton",
                "data": [
                    {"date": "2024-03-01", "value": "220.00"},
                    {"date": "2024-02-01", "value": "200.00"},
                    {"date": "2024-01-01", "value": "."},
                    {"date": "2023-12-01", "value": "180.00"}
                ]
            }"#,
        );
        let quote = quote_from_response("wheat", body).unwrap();
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.current_price, Decimal::new(22000, 2));
        assert_eq!(quote.change_percent, Decimal::new(1000, 2));
        assert_eq!(quote.trend, Trend::Increasing);
        // slope (220 - 180) / 2 = 20
        assert_eq!(quote.prediction.next_month, Decimal::new(24000, 2));
        assert!((0.5..=0.9).contains(&quote.prediction.confidence));
    }

    #[test]
    fn test_rate_limit_notice_is_an_error() {
        let body = parse(r#"{"Information": "Thank you for using Alpha Vantage!"}"#);
        assert!(matches!(
            quote_from_response("wheat", body),
            Err(AppError::ExternalService(_))
        ));
    }

    #[test]
    fn test_short_series_is_an_error() {
        let body = parse(r#"{"data": [{"date": "2024-03-01", "value": "220"}]}"#);
        assert!(quote_from_response("wheat", body).is_err());
    }
}

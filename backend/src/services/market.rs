//! Market price panel and narrative insight

use std::sync::Arc;

use shared::simulation::market::commodity_profile;
use shared::simulation::{generate_quote, FieldContext};
use shared::{DataSource, MarketInsight, MarketQuote, Season, Sourced, Trend};

use super::{log_fallback, DemoService};
use crate::error::{AppError, AppResult};
use crate::external::market::function_for;
use crate::external::{AlphaVantageClient, GeminiClient};

/// Quoted when the request names none
pub const DEFAULT_COMMODITIES: [&str; 3] = ["wheat", "rice", "maize"];

#[derive(Clone)]
pub struct MarketService {
    client: Option<AlphaVantageClient>,
    gemini: Option<GeminiClient>,
    demo: Arc<DemoService>,
}

fn generate(commodity: &str, season: Season) -> AppResult<MarketQuote> {
    let profile = commodity_profile(commodity)
        .ok_or_else(|| AppError::UnsupportedCommodity(commodity.to_string()))?;
    Ok(generate_quote(
        &FieldContext::new(profile.name, season),
        profile,
        &mut rand::thread_rng(),
    ))
}

/// Insight drawn from the quote's trend alone
pub fn rule_based_insight(quote: &MarketQuote) -> MarketInsight {
    let (summary, selling_advice) = match quote.trend {
        Trend::Increasing => (
            format!(
                "{} prices are rising ({}% recently)",
                quote.commodity, quote.change_percent
            ),
            "Hold stock for 1-2 weeks if storage is available".to_string(),
        ),
        Trend::Decreasing => (
            format!(
                "{} prices are falling ({}% recently)",
                quote.commodity, quote.change_percent
            ),
            "Sell soon or use a warehouse receipt to wait out the dip".to_string(),
        ),
        Trend::Stable => (
            format!("{} prices are steady", quote.commodity),
            "Sell in tranches to average out small swings".to_string(),
        ),
    };

    MarketInsight {
        commodity: quote.commodity.clone(),
        summary,
        selling_advice,
        key_factors: vec![
            format!("Current price {} {}/{}", quote.current_price, quote.currency, quote.unit),
            format!("Expected next month {}", quote.prediction.next_month),
            "Seasonal arrivals at the local mandi".to_string(),
        ],
        confidence: quote.prediction.confidence,
    }
}

impl MarketService {
    pub fn new(
        client: Option<AlphaVantageClient>,
        gemini: Option<GeminiClient>,
        demo: Arc<DemoService>,
    ) -> Self {
        Self {
            client,
            gemini,
            demo,
        }
    }

    async fn quote(&self, commodity: &str, season: Season) -> AppResult<(DataSource, MarketQuote)> {
        // Reject unknown names before any upstream call
        let generated = generate(commodity, season)?;

        if let Some(client) = self.client.as_ref().filter(|_| function_for(commodity).is_some()) {
            match client.get_quote(commodity).await {
                Ok(quote) => return Ok((DataSource::AlphaVantage, quote)),
                Err(e) => log_fallback("alphavantage", &e),
            }
        }
        Ok((DataSource::Demo, generated))
    }

    /// Quotes for several commodities. The panel is tagged live only when
    /// every quote is live.
    pub async fn quotes(&self, commodities: &[String]) -> AppResult<Sourced<Vec<MarketQuote>>> {
        let season = Season::current();
        let mut source = DataSource::AlphaVantage;
        let mut quotes = Vec::with_capacity(commodities.len());

        for commodity in commodities {
            let (quote_source, quote) = self.quote(commodity, season).await?;
            if quote_source.is_demo() {
                source = DataSource::Demo;
            }
            quotes.push(quote);
        }

        if source.is_demo() {
            self.demo.simulate_latency().await;
        }
        Ok(Sourced::new(source, season, quotes))
    }

    /// Narrative insight for one commodity
    pub async fn insight(&self, commodity: &str) -> AppResult<Sourced<MarketInsight>> {
        let season = Season::current();
        let (_, quote) = self.quote(commodity, season).await?;

        if let Some(gemini) = &self.gemini {
            let result = gemini
                .market_insight(&quote, season)
                .await
                .and_then(|output| output.into_result());
            match result {
                Ok(payload) => {
                    return Ok(Sourced::new(
                        DataSource::Gemini,
                        season,
                        payload.into_insight(&quote.commodity),
                    ))
                }
                Err(e) => log_fallback("gemini", &e),
            }
        }

        self.demo.simulate_latency().await;
        Ok(Sourced::demo(season, rule_based_insight(&quote)))
    }
}

//! Mandi price generator

use rand::Rng;
use rust_decimal::prelude::*;

use super::{jitter, FieldContext, MetricSpec};
use crate::classification::classify_trend;
use crate::models::{MarketQuote, PricePrediction};
use crate::thresholds;

/// Commodity with its season biased base price in INR per quintal
#[derive(Debug, Clone, Copy)]
pub struct CommodityProfile {
    pub name: &'static str,
    pub base_price: [f64; 4],
    /// Expected monthly drift in [monsoon, kharif, rabi, summer] order
    pub seasonal_drift: [f64; 4],
}

pub const SUPPORTED_COMMODITIES: &[CommodityProfile] = &[
    CommodityProfile { name: "wheat", base_price: [2250.0, 2300.0, 2275.0, 2150.0], seasonal_drift: [0.01, 0.015, -0.01, -0.02] },
    CommodityProfile { name: "rice", base_price: [2100.0, 2040.0, 2150.0, 2200.0], seasonal_drift: [0.01, -0.02, 0.01, 0.015] },
    CommodityProfile { name: "maize", base_price: [2050.0, 1960.0, 2000.0, 2100.0], seasonal_drift: [-0.005, -0.015, 0.01, 0.01] },
    CommodityProfile { name: "cotton", base_price: [6900.0, 6620.0, 6800.0, 7000.0], seasonal_drift: [0.0, -0.02, 0.01, 0.015] },
    CommodityProfile { name: "soybean", base_price: [4700.0, 4600.0, 4750.0, 4800.0], seasonal_drift: [0.005, -0.015, 0.01, 0.01] },
    CommodityProfile { name: "mustard", base_price: [5600.0, 5700.0, 5650.0, 5450.0], seasonal_drift: [0.01, 0.01, -0.015, -0.01] },
    CommodityProfile { name: "chana", base_price: [5400.0, 5500.0, 5440.0, 5300.0], seasonal_drift: [0.01, 0.01, -0.01, -0.01] },
    CommodityProfile { name: "onion", base_price: [2200.0, 2800.0, 1800.0, 1500.0], seasonal_drift: [0.04, 0.02, -0.03, 0.02] },
];

pub fn commodity_profile(name: &str) -> Option<&'static CommodityProfile> {
    SUPPORTED_COMMODITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

const PRICE_FIELD_SCALE: f64 = 0.03;
const PRICE_JITTER: f64 = 0.05;

/// Convert to a two decimal price
pub fn to_price(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

/// Generate a quote. The commodity name doubles as the variation seed.
pub fn generate_quote<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    profile: &CommodityProfile,
    rng: &mut R,
) -> MarketQuote {
    let base = profile.base_price[ctx.season.index()];
    let spec = MetricSpec::new(
        [1.0, 1.0, 1.0, 1.0],
        PRICE_FIELD_SCALE,
        PRICE_JITTER,
    );
    let current = base * ctx.sample(&spec, rng);
    let previous = base * ctx.sample(&spec, rng);
    let change_percent = (current - previous) / previous * 100.0;

    let drift = profile.seasonal_drift[ctx.season.index()] + jitter(rng, 0.02);
    let next_month = current * (1.0 + drift);
    let next_week = current * (1.0 + drift / 4.0);

    MarketQuote {
        commodity: profile.name.to_string(),
        unit: "quintal".to_string(),
        currency: "INR".to_string(),
        current_price: to_price(current),
        change_percent: to_price(change_percent),
        trend: classify_trend(change_percent, thresholds::MARKET_TREND_TOLERANCE_PCT),
        prediction: PricePrediction {
            next_week: to_price(next_week),
            next_month: to_price(next_month),
            confidence: rng.gen_range(0.6..=0.9),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::Season;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn quote_has_two_decimal_prices() {
        let mut rng = StdRng::seed_from_u64(31);
        let profile = commodity_profile("Wheat").unwrap();
        let quote = generate_quote(&FieldContext::new("wheat", Season::Rabi), profile, &mut rng);
        assert!(quote.current_price.scale() <= 2);
        assert!(quote.current_price > Decimal::ZERO);
        assert!((0.6..=0.9).contains(&quote.prediction.confidence));
        assert_eq!(quote.currency, "INR");
    }

    #[test]
    fn price_stays_near_seasonal_base() {
        let mut rng = StdRng::seed_from_u64(32);
        let profile = commodity_profile("cotton").unwrap();
        let quote = generate_quote(&FieldContext::new("cotton", Season::Kharif), profile, &mut rng);
        let price = quote.current_price.to_f64().unwrap();
        // base * (1 +/- (0.03 + 0.05))
        assert!(price >= 6620.0 * 0.92 - 0.01 && price <= 6620.0 * 1.08 + 0.01);
    }

    #[test]
    fn unknown_commodity() {
        assert!(commodity_profile("saffron").is_none());
    }
}

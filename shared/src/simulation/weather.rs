//! Weather generator

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::{jitter, FieldContext, MetricSpec};
use crate::models::{ForecastDay, WeatherSnapshot};
use crate::types::GpsCoordinates;

pub const TEMPERATURE: MetricSpec = MetricSpec::new([29.0, 26.0, 20.0, 35.0], 1.5, 2.0);
pub const HUMIDITY: MetricSpec = MetricSpec::new([85.0, 65.0, 55.0, 35.0], 5.0, 5.0);
pub const PRESSURE: MetricSpec = MetricSpec::new([1002.0, 1010.0, 1016.0, 1006.0], 2.0, 3.0);
pub const WIND_SPEED: MetricSpec = MetricSpec::new([4.5, 3.0, 2.5, 3.5], 0.5, 1.0);
pub const CLOUD_COVER: MetricSpec = MetricSpec::new([75.0, 35.0, 20.0, 15.0], 5.0, 15.0);
pub const RAINFALL: MetricSpec = MetricSpec::new([12.0, 2.0, 0.5, 0.2], 2.0, 4.0);
/// Chance of rain in 0..=1
pub const RAIN_PROBABILITY: MetricSpec = MetricSpec::new([0.7, 0.25, 0.1, 0.08], 0.05, 0.15);

/// Number of days in a generated outlook
pub const FORECAST_DAYS: usize = 5;

/// Short condition label
pub fn describe_conditions(rain_mm: f64, cloud_percent: f64) -> &'static str {
    if rain_mm > 5.0 {
        "Rain"
    } else if rain_mm > 0.5 {
        "Light Rain"
    } else if cloud_percent > 60.0 {
        "Cloudy"
    } else if cloud_percent > 25.0 {
        "Partly Cloudy"
    } else {
        "Clear"
    }
}

pub fn generate_current_weather<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    location: GpsCoordinates,
    now: DateTime<Utc>,
    rng: &mut R,
) -> WeatherSnapshot {
    let temperature = ctx.sample(&TEMPERATURE, rng);
    let humidity = ctx.sample(&HUMIDITY, rng).clamp(0.0, 100.0);
    let cloud = ctx.sample(&CLOUD_COVER, rng).clamp(0.0, 100.0);
    let rain = ctx.sample(&RAINFALL, rng).max(0.0);

    WeatherSnapshot {
        timestamp: now,
        location,
        location_name: None,
        temperature_celsius: temperature,
        // Humid air feels warmer
        feels_like_celsius: temperature + (humidity - 50.0).max(0.0) * 0.05,
        humidity_percent: humidity,
        pressure_hpa: ctx.sample(&PRESSURE, rng),
        wind_speed_mps: ctx.sample(&WIND_SPEED, rng).max(0.0),
        cloud_coverage_percent: cloud,
        rainfall_mm: rain,
        conditions: describe_conditions(rain, cloud).to_string(),
    }
}

pub fn generate_forecast<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    today: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ForecastDay> {
    (1..=FORECAST_DAYS as i64)
        .map(|offset| {
            let mean = ctx.sample(&TEMPERATURE, rng);
            let spread = 4.0 + jitter(rng, 1.5);
            let probability = ctx.sample(&RAIN_PROBABILITY, rng).clamp(0.0, 1.0);
            let rain = if probability >= 0.5 {
                ctx.sample(&RAINFALL, rng).max(0.0)
            } else {
                0.0
            };
            let cloud = ctx.sample(&CLOUD_COVER, rng).clamp(0.0, 100.0);

            ForecastDay {
                date: (today + Duration::days(offset)).date_naive(),
                high_celsius: mean + spread,
                low_celsius: mean - spread,
                humidity_percent: ctx.sample(&HUMIDITY, rng).clamp(0.0, 100.0),
                precipitation_probability: probability,
                precipitation_mm: rain,
                conditions: describe_conditions(rain, cloud).to_string(),
            }
        })
        .collect()
}

//! Weather models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Current conditions at a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub timestamp: DateTime<Utc>,
    pub location: GpsCoordinates,
    pub location_name: Option<String>,
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub humidity_percent: f64,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub cloud_coverage_percent: f64,
    pub rainfall_mm: f64,
    pub conditions: String,
}

/// One day of the outlook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub high_celsius: f64,
    pub low_celsius: f64,
    pub humidity_percent: f64,
    /// 0..=1
    pub precipitation_probability: f64,
    pub precipitation_mm: f64,
    pub conditions: String,
}

/// Weather panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub irrigation_advice: String,
    pub alerts: Vec<String>,
}

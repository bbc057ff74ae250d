//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap API for current conditions and the 5 day /
//! 3 hour forecast, folded into daily outlook rows.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{ForecastDay, GpsCoordinates, WeatherSnapshot};

use super::read_json;
use crate::error::AppResult;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    coord: OWMCoord,
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    clouds: OWMClouds,
    rain: Option<OWMRain>,
    dt: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMClouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    pop: f64,
    rain: Option<OWMRain>,
}

impl WeatherClient {
    /// Create a new WeatherClient; the base URL comes from configuration
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, location: GpsCoordinates) -> AppResult<WeatherSnapshot> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, location.latitude, location.longitude, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let data: OWMCurrentResponse = read_json(response, "OpenWeatherMap").await?;

        Ok(convert_current_response(data))
    }

    /// Fetch the daily outlook by GPS coordinates
    pub async fn get_forecast(&self, location: GpsCoordinates) -> AppResult<Vec<ForecastDay>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, location.latitude, location.longitude, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let data: OWMForecastResponse = read_json(response, "OpenWeatherMap").await?;

        Ok(convert_forecast_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> WeatherSnapshot {
    let rainfall = data
        .rain
        .as_ref()
        .and_then(|r| r.one_hour.or(r.three_hour))
        .unwrap_or(0.0);

    WeatherSnapshot {
        timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
        location: GpsCoordinates::new(data.coord.lat, data.coord.lon),
        location_name: (!data.name.is_empty()).then_some(data.name),
        temperature_celsius: data.main.temp,
        feels_like_celsius: data.main.feels_like,
        humidity_percent: data.main.humidity,
        pressure_hpa: data.main.pressure,
        wind_speed_mps: data.wind.speed,
        cloud_coverage_percent: data.clouds.all,
        rainfall_mm: rainfall,
        conditions: data
            .weather
            .first()
            .map(|w| w.main.clone())
            .unwrap_or_default(),
    }
}

/// Fold 3 hour slots into one row per day
fn convert_forecast_response(data: OWMForecastResponse) -> Vec<ForecastDay> {
    let mut daily: BTreeMap<NaiveDate, Vec<&OWMForecastItem>> = BTreeMap::new();
    for item in &data.list {
        if let Some(timestamp) = DateTime::from_timestamp(item.dt, 0) {
            daily.entry(timestamp.date_naive()).or_default().push(item);
        }
    }

    daily
        .into_iter()
        .map(|(date, items)| {
            let count = items.len().max(1) as f64;
            let high = items
                .iter()
                .map(|i| i.main.temp_max)
                .fold(f64::MIN, f64::max);
            let low = items
                .iter()
                .map(|i| i.main.temp_min)
                .fold(f64::MAX, f64::min);
            let humidity = items.iter().map(|i| i.main.humidity).sum::<f64>() / count;
            let pop = items.iter().map(|i| i.pop).fold(0.0, f64::max);
            let rain: f64 = items
                .iter()
                .filter_map(|i| i.rain.as_ref().and_then(|r| r.three_hour))
                .sum();
            // Midday slot describes the day best
            let conditions = items
                .get(items.len() / 2)
                .and_then(|i| i.weather.first())
                .map(|w| w.main.clone())
                .unwrap_or_default();

            ForecastDay {
                date,
                high_celsius: high,
                low_celsius: low,
                humidity_percent: humidity,
                precipitation_probability: pop,
                precipitation_mm: rain,
                conditions,
            }
        })
        .collect()
}

/// Check if rain is expected in the outlook
pub fn has_rain_forecast(forecast: &[ForecastDay], threshold_mm: f64) -> bool {
    forecast
        .iter()
        .any(|f| f.precipitation_mm >= threshold_mm || f.precipitation_probability >= 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_JSON: &str = r#"{
        "list": [
            {"dt": 1720000800, "main": {"temp": 28.0, "feels_like": 30.0, "temp_min": 27.0, "temp_max": 29.0, "pressure": 1004, "humidity": 80},
             "weather": [{"main": "Clouds"}], "pop": 0.2},
            {"dt": 1720011600, "main": {"temp": 31.0, "feels_like": 34.0, "temp_min": 30.0, "temp_max": 32.5, "pressure": 1003, "humidity": 70},
             "weather": [{"main": "Rain"}], "pop": 0.8, "rain": {"3h": 4.5}},
            {"dt": 1720098000, "main": {"temp": 26.0, "feels_like": 27.0, "temp_min": 25.0, "temp_max": 26.5, "pressure": 1005, "humidity": 90},
             "weather": [{"main": "Rain"}], "pop": 0.9, "rain": {"3h": 12.0}}
        ]
    }"#;

    #[test]
    fn forecast_is_grouped_by_day() {
        let data: OWMForecastResponse = serde_json::from_str(FORECAST_JSON).unwrap();
        let days = convert_forecast_response(data);
        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.high_celsius, 32.5);
        assert_eq!(first.low_celsius, 27.0);
        assert_eq!(first.humidity_percent, 75.0);
        assert_eq!(first.precipitation_probability, 0.8);
        assert_eq!(first.precipitation_mm, 4.5);

        assert_eq!(days[1].precipitation_mm, 12.0);
        assert!(has_rain_forecast(&days, 5.0));
        assert!(!has_rain_forecast(&days[..0], 5.0));
    }

    #[test]
    fn current_response_conversion() {
        let json = r#"{
            "coord": {"lat": 28.61, "lon": 77.21},
            "weather": [{"main": "Haze"}],
            "main": {"temp": 33.0, "feels_like": 36.0, "temp_min": 32.0, "temp_max": 34.0, "pressure": 1002, "humidity": 55},
            "wind": {"speed": 2.1},
            "clouds": {"all": 20},
            "dt": 1720000800,
            "name": "New Delhi"
        }"#;
        let data: OWMCurrentResponse = serde_json::from_str(json).unwrap();
        let snapshot = convert_current_response(data);
        assert_eq!(snapshot.location_name.as_deref(), Some("New Delhi"));
        assert_eq!(snapshot.rainfall_mm, 0.0);
        assert_eq!(snapshot.conditions, "Haze");
    }
}

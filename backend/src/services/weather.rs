//! Weather panel with irrigation advice and alerts

use std::sync::Arc;

use chrono::Utc;
use shared::simulation::{generate_current_weather, generate_forecast, FieldContext};
use shared::{
    classify, irrigation_advice, thresholds, weather_alerts, DataSource, ForecastDay,
    GpsCoordinates, NutrientStatus, Season, Sourced, WeatherReport, WeatherSnapshot,
};

use super::{log_fallback, DemoService};
use crate::external::weather::{has_rain_forecast, WeatherClient};

#[derive(Clone)]
pub struct WeatherService {
    client: Option<WeatherClient>,
    demo: Arc<DemoService>,
}

/// Variation seed for location-only requests
pub fn location_seed(location: GpsCoordinates) -> String {
    format!("{:.3},{:.3}", location.latitude, location.longitude)
}

fn generate_weather(
    seed: &str,
    location: GpsCoordinates,
    season: Season,
) -> (WeatherSnapshot, Vec<ForecastDay>) {
    let ctx = FieldContext::new(seed, season);
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let current = generate_current_weather(&ctx, location, now, &mut rng);
    let forecast = generate_forecast(&ctx, now, &mut rng);
    (current, forecast)
}

impl WeatherService {
    pub fn new(client: Option<WeatherClient>, demo: Arc<DemoService>) -> Self {
        Self { client, demo }
    }

    async fn fetch(
        &self,
        seed: &str,
        location: GpsCoordinates,
        season: Season,
    ) -> (DataSource, WeatherSnapshot, Vec<ForecastDay>) {
        if let Some(client) = &self.client {
            let result = tokio::try_join!(
                client.get_current_weather(location),
                client.get_forecast(location)
            );
            match result {
                Ok((current, forecast)) => return (DataSource::OpenWeatherMap, current, forecast),
                Err(e) => log_fallback("openweathermap", &e),
            }
        }

        self.demo.simulate_latency().await;
        let (current, forecast) = generate_weather(seed, location, season);
        (DataSource::Demo, current, forecast)
    }

    /// Weather panel. Irrigation advice uses the field's simulated soil
    /// moisture when a field is given.
    pub async fn report(
        &self,
        location: GpsCoordinates,
        field_id: Option<&str>,
    ) -> Sourced<WeatherReport> {
        let season = Season::current();
        let seed = field_id
            .map(str::to_string)
            .unwrap_or_else(|| location_seed(location));
        let (source, current, forecast) = self.fetch(&seed, location, season).await;

        let sample = match field_id {
            Some(id) => self.demo.latest(id).await,
            None => None,
        };
        let moisture = sample
            .map(|s| classify(s.soil_moisture, thresholds::SOIL_MOISTURE))
            .unwrap_or(NutrientStatus::Adequate);
        let rain_expected = has_rain_forecast(&forecast, thresholds::RAIN_EXPECTED_MM);
        let alerts = weather_alerts(&current, &forecast);

        Sourced::new(
            source,
            season,
            WeatherReport {
                irrigation_advice: irrigation_advice(moisture, rain_expected).to_string(),
                alerts,
                current,
                forecast,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_location_seed_is_stable() {
        let location = GpsCoordinates::new(28.61391, 77.20902);
        assert_eq!(location_seed(location), "28.614,77.209");
    }

    #[tokio::test]
    async fn test_rejected_weather_call_resolves_with_demo() {
        let client = WeatherClient::with_base_url(
            reqwest::Client::new(),
            "test-key".to_string(),
            "http://127.0.0.1:9".to_string(),
        );
        let service = WeatherService::new(
            Some(client),
            Arc::new(DemoService::new(50, Duration::ZERO)),
        );
        let panel = service
            .report(GpsCoordinates::new(28.6, 77.2), Some("field-1"))
            .await;

        assert_eq!(panel.source, DataSource::Demo);
        assert_eq!(panel.data.forecast.len(), 5);
        assert!(!panel.data.irrigation_advice.is_empty());
    }
}

//! Whole-field dashboard: every panel fetched concurrently

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    CropStageReading, DiseasePestReport, GpsCoordinates, NutrientReport, SatelliteReport, Season,
    SensorReading, SoilAnalysis, Sourced, WeatherReport,
};

use super::{
    CropStageService, DemoService, DiseasePestService, SatelliteService, SoilService,
    WeatherService,
};
use std::sync::Arc;

/// Each panel keeps its own provenance
#[derive(Debug, Serialize)]
pub struct FieldDashboard {
    pub field_id: String,
    pub generated_at: DateTime<Utc>,
    pub season: Season,
    pub soil: Sourced<SoilAnalysis>,
    pub nutrients: Sourced<NutrientReport>,
    pub weather: Option<Sourced<WeatherReport>>,
    pub crop_stage: Sourced<CropStageReading>,
    pub disease_pest: Sourced<DiseasePestReport>,
    pub satellite: Sourced<SatelliteReport>,
    pub latest_sensor: Option<SensorReading>,
}

impl FieldDashboard {
    /// Number of panels served from generated data
    pub fn demo_panel_count(&self) -> usize {
        [
            self.soil.source,
            self.nutrients.source,
            self.crop_stage.source,
            self.disease_pest.source,
            self.satellite.source,
        ]
        .iter()
        .chain(self.weather.as_ref().map(|w| &w.source))
        .filter(|s| s.is_demo())
        .count()
    }
}

#[derive(Clone)]
pub struct DashboardService {
    pub soil: SoilService,
    pub weather: WeatherService,
    pub crop_stage: CropStageService,
    pub disease_pest: DiseasePestService,
    pub satellite: SatelliteService,
    pub demo: Arc<DemoService>,
}

impl DashboardService {
    pub async fn field(
        &self,
        field_id: &str,
        location: Option<GpsCoordinates>,
        crop: &str,
    ) -> FieldDashboard {
        let weather = async {
            match location {
                Some(location) => Some(self.weather.report(location, Some(field_id)).await),
                None => None,
            }
        };

        let (soil, nutrients, weather, crop_stage, disease_pest, satellite, latest_sensor) = tokio::join!(
            self.soil.analyze(field_id, location),
            self.soil.nutrients(field_id, location),
            weather,
            self.crop_stage.reading(field_id, crop, None),
            self.disease_pest.report(field_id),
            self.satellite.report(field_id, location),
            self.demo.latest(field_id),
        );

        let dashboard = FieldDashboard {
            field_id: field_id.to_string(),
            generated_at: Utc::now(),
            season: soil.season,
            soil,
            nutrients,
            weather,
            crop_stage,
            disease_pest,
            satellite,
            latest_sensor,
        };
        tracing::debug!(
            field_id = %field_id,
            demo_panels = dashboard.demo_panel_count(),
            "Assembled field dashboard"
        );
        dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service(latency: Duration) -> DashboardService {
        let demo = Arc::new(DemoService::new(50, latency));
        DashboardService {
            soil: SoilService::new(None, demo.clone()),
            weather: WeatherService::new(None, demo.clone()),
            crop_stage: CropStageService::new(demo.clone()),
            disease_pest: DiseasePestService::new(demo.clone()),
            satellite: SatelliteService::new(None, demo.clone()),
            demo,
        }
    }

    #[tokio::test]
    async fn test_all_panels_demo_without_integrations() {
        let dashboard = service(Duration::ZERO)
            .field("field-1", Some(GpsCoordinates::new(28.6, 77.2)), "wheat")
            .await;
        assert_eq!(dashboard.demo_panel_count(), 6);
        assert!(dashboard.latest_sensor.is_some());
        assert_eq!(dashboard.crop_stage.data.crop, "wheat");
    }

    #[tokio::test]
    async fn test_panels_load_concurrently() {
        let started = std::time::Instant::now();
        let dashboard = service(Duration::from_millis(100))
            .field("field-1", None, "rice")
            .await;
        assert!(dashboard.weather.is_none());
        // Six simulated delays overlap instead of adding up
        assert!(started.elapsed() < Duration::from_millis(450));
    }
}

//! Soil and nutrient panels
//!
//! SoilGrids supplies pH, organic carbon, nitrogen, bulk density and CEC when
//! coordinates are known. Everything else, and everything when SoilGrids is
//! unavailable, comes from the generator.

use std::sync::Arc;

use shared::simulation::{generate_soil_reading, FieldContext};
use shared::{
    DataSource, GpsCoordinates, NutrientReport, Season, SoilAnalysis, SoilReading, Sourced,
};

use super::{log_fallback, DemoService};
use crate::external::SoilGridsClient;

#[derive(Clone)]
pub struct SoilService {
    client: Option<SoilGridsClient>,
    demo: Arc<DemoService>,
}

fn generate_reading(field_id: &str, season: Season) -> SoilReading {
    generate_soil_reading(&FieldContext::new(field_id, season), &mut rand::thread_rng())
}

impl SoilService {
    pub fn new(client: Option<SoilGridsClient>, demo: Arc<DemoService>) -> Self {
        Self { client, demo }
    }

    async fn reading(
        &self,
        field_id: &str,
        location: Option<GpsCoordinates>,
        season: Season,
    ) -> (DataSource, SoilReading) {
        let generated = generate_reading(field_id, season);

        if let (Some(client), Some(location)) = (&self.client, location) {
            match client.get_properties(location).await {
                Ok(properties) => return (DataSource::SoilGrids, properties.overlay(generated)),
                Err(e) => log_fallback("soilgrids", &e),
            }
        }

        self.demo.simulate_latency().await;
        (DataSource::Demo, generated)
    }

    /// Full soil panel
    pub async fn analyze(
        &self,
        field_id: &str,
        location: Option<GpsCoordinates>,
    ) -> Sourced<SoilAnalysis> {
        let season = Season::current();
        let (source, reading) = self.reading(field_id, location, season).await;
        Sourced::new(source, season, SoilAnalysis::from_reading(field_id, reading))
    }

    /// Nutrient panel
    pub async fn nutrients(
        &self,
        field_id: &str,
        location: Option<GpsCoordinates>,
    ) -> Sourced<NutrientReport> {
        let season = Season::current();
        let (source, reading) = self.reading(field_id, location, season).await;
        Sourced::new(source, season, NutrientReport::from_reading(field_id, &reading))
    }
}

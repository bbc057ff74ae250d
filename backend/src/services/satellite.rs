//! Satellite panel
//!
//! Vegetation indices are simulated. When Earthdata is configured and the
//! field has coordinates, the panel also lists recent granules covering it.

use std::sync::Arc;

use shared::simulation::{generate_vegetation_indices, FieldContext};
use shared::{DataSource, GpsCoordinates, SatelliteReport, Season, Sourced};

use super::{log_fallback, DemoService};
use crate::external::EarthdataClient;

#[derive(Clone)]
pub struct SatelliteService {
    client: Option<EarthdataClient>,
    demo: Arc<DemoService>,
}

impl SatelliteService {
    pub fn new(client: Option<EarthdataClient>, demo: Arc<DemoService>) -> Self {
        Self { client, demo }
    }

    pub async fn report(
        &self,
        field_id: &str,
        location: Option<GpsCoordinates>,
    ) -> Sourced<SatelliteReport> {
        let season = Season::current();
        let indices =
            generate_vegetation_indices(&FieldContext::new(field_id, season), &mut rand::thread_rng());

        let mut source = DataSource::Demo;
        let mut assets = Vec::new();
        match (&self.client, location) {
            (Some(client), Some(location)) => match client.recent_granules(location).await {
                Ok(granules) => {
                    source = DataSource::NasaEarthdata;
                    assets = granules;
                }
                Err(e) => log_fallback("earthdata", &e),
            },
            _ => self.demo.simulate_latency().await,
        }

        Sourced::new(
            source,
            season,
            SatelliteReport {
                field_id: field_id.to_string(),
                canopy_concern: indices.vigour(),
                indices,
                assets,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_earthdata_keeps_indices() {
        let client = EarthdataClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9".to_string(),
            "token".to_string(),
            "MOD13Q1".to_string(),
        );
        let service = SatelliteService::new(Some(client), Arc::new(DemoService::new(50, Duration::ZERO)));
        let panel = service
            .report("field-1", Some(GpsCoordinates::new(28.6, 77.2)))
            .await;

        assert!(panel.source.is_demo());
        assert!(panel.data.assets.is_empty());
        assert!((-1.0..=1.0).contains(&panel.data.indices.ndvi));
        assert_eq!(panel.data.canopy_concern, panel.data.indices.vigour());
    }
}

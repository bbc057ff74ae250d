//! Crop growth stage panel (simulated)

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shared::simulation::{generate_crop_stage, FieldContext};
use shared::{CropStageReading, Season, Sourced};

use super::DemoService;

#[derive(Clone)]
pub struct CropStageService {
    demo: Arc<DemoService>,
}

fn generate(field_id: &str, crop: &str, sowing_date: Option<NaiveDate>, season: Season) -> CropStageReading {
    let ctx = FieldContext::new(field_id, season);
    let today = Utc::now().date_naive();
    generate_crop_stage(&ctx, crop, sowing_date, today, &mut rand::thread_rng())
}

impl CropStageService {
    pub fn new(demo: Arc<DemoService>) -> Self {
        Self { demo }
    }

    pub async fn reading(
        &self,
        field_id: &str,
        crop: &str,
        sowing_date: Option<NaiveDate>,
    ) -> Sourced<CropStageReading> {
        let season = Season::current();
        self.demo.simulate_latency().await;
        Sourced::demo(season, generate(field_id, crop, sowing_date, season))
    }
}

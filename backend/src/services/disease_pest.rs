//! Disease and pest panel (simulated from the seasonal catalog)

use std::sync::Arc;

use shared::simulation::{generate_disease_pest, FieldContext};
use shared::{DiseasePestReport, Season, Sourced};

use super::DemoService;

#[derive(Clone)]
pub struct DiseasePestService {
    demo: Arc<DemoService>,
}

impl DiseasePestService {
    pub fn new(demo: Arc<DemoService>) -> Self {
        Self { demo }
    }

    pub async fn report(&self, field_id: &str) -> Sourced<DiseasePestReport> {
        self.report_for_season(field_id, Season::current()).await
    }

    pub async fn report_for_season(&self, field_id: &str, season: Season) -> Sourced<DiseasePestReport> {
        self.demo.simulate_latency().await;
        let report = generate_disease_pest(&FieldContext::new(field_id, season), &mut rand::thread_rng());
        Sourced::demo(season, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ThreatKind;
    use std::time::Duration;

    #[tokio::test]
    async fn test_report_partitions_threats() {
        let service = DiseasePestService::new(Arc::new(DemoService::new(50, Duration::ZERO)));
        let panel = service.report_for_season("field-1", Season::Monsoon).await;

        assert_eq!(panel.season, Season::Monsoon);
        assert!(panel.data.diseases.iter().all(|d| d.kind == ThreatKind::Disease));
        assert!(panel.data.pests.iter().all(|p| p.kind == ThreatKind::Pest));
        assert!(!panel.data.advice.is_empty());
    }
}

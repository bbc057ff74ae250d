//! Panel services for the Krishi dashboard
//!
//! Every panel service tries its live integration first and falls back to
//! generated data tagged as demo when the integration is missing or fails.

pub mod crop_stage;
pub mod dashboard;
pub mod demo;
pub mod diagnosis;
pub mod disease_pest;
pub mod export;
pub mod location;
pub mod market;
pub mod satellite;
pub mod soil;
pub mod voice;
pub mod weather;

pub use crop_stage::CropStageService;
pub use dashboard::DashboardService;
pub use demo::DemoService;
pub use diagnosis::DiagnosisService;
pub use disease_pest::DiseasePestService;
pub use export::ExportService;
pub use location::LocationService;
pub use market::MarketService;
pub use satellite::SatelliteService;
pub use soil::SoilService;
pub use voice::VoiceService;
pub use weather::WeatherService;

use crate::error::AppError;

/// Record why a panel is being served from generated data
pub(crate) fn log_fallback(integration: &'static str, error: &AppError) {
    tracing::warn!(
        integration,
        error = %error,
        "Upstream call failed, serving demo data"
    );
}

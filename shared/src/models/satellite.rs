//! Remote sensing models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classification::RiskLevel;

/// Vegetation and water indices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetationIndices {
    pub ndvi: f64,
    pub evi: f64,
    pub savi: f64,
    pub ndwi: f64,
}

impl VegetationIndices {
    /// Canopy vigour from NDVI
    pub fn vigour(&self) -> RiskLevel {
        // Inverted: dense canopy is low concern
        if self.ndvi >= 0.6 {
            RiskLevel::Low
        } else if self.ndvi >= 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Satellite granule covering a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteAsset {
    pub id: String,
    pub title: String,
    pub time_start: Option<DateTime<Utc>>,
    pub time_end: Option<DateTime<Utc>>,
}

/// Satellite panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteReport {
    pub field_id: String,
    pub indices: VegetationIndices,
    pub canopy_concern: RiskLevel,
    pub assets: Vec<SatelliteAsset>,
}

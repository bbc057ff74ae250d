//! Crop growth stage models

use serde::{Deserialize, Serialize};

use crate::classification::RiskLevel;
use crate::recommendations::Recommendation;

/// Growth stages in field order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Germination,
    Vegetative,
    Flowering,
    GrainFilling,
    Maturity,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Germination,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::GrainFilling,
        GrowthStage::Maturity,
    ];

    /// Percent-complete at which each stage starts
    pub fn starts_at(&self) -> f64 {
        match self {
            GrowthStage::Germination => 0.0,
            GrowthStage::Vegetative => 10.0,
            GrowthStage::Flowering => 45.0,
            GrowthStage::GrainFilling => 65.0,
            GrowthStage::Maturity => 90.0,
        }
    }

    /// Stage for a percent-complete value
    pub fn from_progress(percent: f64) -> Self {
        GrowthStage::ALL
            .iter()
            .rev()
            .copied()
            .find(|stage| percent >= stage.starts_at())
            .unwrap_or(GrowthStage::Germination)
    }

    pub fn next(&self) -> Option<GrowthStage> {
        match self {
            GrowthStage::Germination => Some(GrowthStage::Vegetative),
            GrowthStage::Vegetative => Some(GrowthStage::Flowering),
            GrowthStage::Flowering => Some(GrowthStage::GrainFilling),
            GrowthStage::GrainFilling => Some(GrowthStage::Maturity),
            GrowthStage::Maturity => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "Germination",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering / Heading",
            GrowthStage::GrainFilling => "Grain Filling",
            GrowthStage::Maturity => "Maturity",
        }
    }
}

/// Stress indicators, each in 0..=1
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressIndicators {
    pub water: f64,
    pub nutrient: f64,
    pub disease: f64,
    pub pest: f64,
}

/// Kinds of crop stress
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StressKind {
    Water,
    Nutrient,
    Disease,
    Pest,
}

impl StressIndicators {
    pub fn iter(&self) -> impl Iterator<Item = (StressKind, f64)> {
        [
            (StressKind::Water, self.water),
            (StressKind::Nutrient, self.nutrient),
            (StressKind::Disease, self.disease),
            (StressKind::Pest, self.pest),
        ]
        .into_iter()
    }
}

/// Plant growth measurements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthMetrics {
    pub height_cm: f64,
    pub leaf_count: u32,
    pub root_depth_cm: f64,
    /// t/ha
    pub biomass: f64,
}

/// Crop stage panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropStageReading {
    pub field_id: String,
    pub crop: String,
    pub stage: GrowthStage,
    pub stage_label: String,
    pub next_stage: Option<GrowthStage>,
    pub percent_complete: f64,
    pub days_to_next_stage: Option<u32>,
    pub stress: StressIndicators,
    pub stress_levels: Vec<StressLevel>,
    pub growth: GrowthMetrics,
    pub recommendations: Vec<Recommendation>,
}

/// Classified stress indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressLevel {
    pub kind: StressKind,
    pub value: f64,
    pub level: RiskLevel,
}

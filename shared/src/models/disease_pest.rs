//! Disease and pest incidence models

use serde::{Deserialize, Serialize};

use crate::classification::{RiskLevel, Severity, Trend};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    Disease,
    Pest,
}

/// One disease or pest observed on a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseasePestEntry {
    pub name: String,
    pub kind: ThreatKind,
    /// Percent of plants affected
    pub incidence_percent: f64,
    pub severity: Severity,
    pub risk: RiskLevel,
    pub trend: Trend,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub prevention: Vec<String>,
}

/// Disease/pest panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseasePestReport {
    pub field_id: String,
    pub diseases: Vec<DiseasePestEntry>,
    pub pests: Vec<DiseasePestEntry>,
    pub overall_risk: RiskLevel,
    pub advice: Vec<String>,
}

impl DiseasePestReport {
    /// Highest risk across all entries
    pub fn highest_risk<'a>(entries: impl IntoIterator<Item = &'a DiseasePestEntry>) -> RiskLevel {
        entries
            .into_iter()
            .map(|e| e.risk)
            .max()
            .unwrap_or(RiskLevel::Low)
    }
}

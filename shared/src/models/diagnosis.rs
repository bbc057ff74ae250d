//! Image based crop diagnosis models

use serde::{Deserialize, Serialize};

use crate::classification::Severity;

/// Diagnosis for an uploaded leaf or plant photo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropDiagnosis {
    pub crop: String,
    pub disease_name: String,
    /// 0..=1
    pub confidence: f64,
    pub severity: Severity,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub prevention: Vec<String>,
}

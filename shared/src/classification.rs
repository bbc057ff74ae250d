//! Status classifiers for dashboard badges and progress bars

use serde::{Deserialize, Serialize};

use crate::thresholds;

/// Inclusive optimal range `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

impl OptimalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Three-tier nutrient style status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NutrientStatus {
    Deficient,
    Adequate,
    Excessive,
}

impl NutrientStatus {
    pub fn color(&self) -> StatusColor {
        match self {
            NutrientStatus::Deficient => StatusColor::Red,
            NutrientStatus::Adequate => StatusColor::Green,
            NutrientStatus::Excessive => StatusColor::Orange,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientStatus::Deficient => "deficient",
            NutrientStatus::Adequate => "adequate",
            NutrientStatus::Excessive => "excessive",
        }
    }
}

impl std::fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a reading against its optimal range.
///
/// Below `min` is deficient, `[min, max]` adequate, above `max` excessive.
/// NaN compares false everywhere and is reported as deficient.
pub fn classify(value: f64, range: OptimalRange) -> NutrientStatus {
    if value > range.max {
        NutrientStatus::Excessive
    } else if value >= range.min {
        NutrientStatus::Adequate
    } else {
        NutrientStatus::Deficient
    }
}

/// Soil reaction label for a pH reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhStatus {
    Acidic,
    Optimal,
    Alkaline,
}

impl From<NutrientStatus> for PhStatus {
    fn from(status: NutrientStatus) -> Self {
        match status {
            NutrientStatus::Deficient => PhStatus::Acidic,
            NutrientStatus::Adequate => PhStatus::Optimal,
            NutrientStatus::Excessive => PhStatus::Alkaline,
        }
    }
}

pub fn classify_ph(ph: f64) -> PhStatus {
    classify(ph, thresholds::SOIL_PH).into()
}

/// Breakpoints for a low/medium/high risk metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskBreakpoints {
    /// Values strictly above this are at least medium
    pub medium: f64,
    /// Values strictly above this are high
    pub high: f64,
}

impl RiskBreakpoints {
    pub const fn new(medium: f64, high: f64) -> Self {
        Self { medium, high }
    }
}

/// Three-tier risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn color(&self) -> StatusColor {
        match self {
            RiskLevel::Low => StatusColor::Green,
            RiskLevel::Medium => StatusColor::Yellow,
            RiskLevel::High => StatusColor::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify_risk(value: f64, breakpoints: RiskBreakpoints) -> RiskLevel {
    if value > breakpoints.high {
        RiskLevel::High
    } else if value > breakpoints.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Stress level for a 0..=1 stress indicator
pub fn classify_stress(value: f64) -> RiskLevel {
    classify_risk(value, thresholds::STRESS)
}

/// Outbreak severity tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

pub fn classify_severity(incidence_percent: f64) -> Severity {
    match classify_risk(incidence_percent, thresholds::SEVERITY) {
        RiskLevel::Low => Severity::Mild,
        RiskLevel::Medium => Severity::Moderate,
        RiskLevel::High => Severity::Severe,
    }
}

/// Direction of change between two readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Changes within `tolerance` either way count as stable
pub fn classify_trend(delta: f64, tolerance: f64) -> Trend {
    if delta > tolerance {
        Trend::Increasing
    } else if delta < -tolerance {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Badge color tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Progress bar fill for a reading, as a percentage of `2 * max`
pub fn progress_percent(value: f64, range: OptimalRange) -> f64 {
    if range.max <= 0.0 {
        return 0.0;
    }
    (value / (range.max * 2.0) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_reference_readings() {
        assert_eq!(classify(5.5, thresholds::SOIL_PH), NutrientStatus::Deficient);
        assert_eq!(classify_ph(5.5), PhStatus::Acidic);
        assert_eq!(classify(6.8, thresholds::SOIL_PH), NutrientStatus::Adequate);
        assert_eq!(classify_ph(6.8), PhStatus::Optimal);
        assert_eq!(classify(8.0, thresholds::SOIL_PH), NutrientStatus::Excessive);
        assert_eq!(classify_ph(8.0), PhStatus::Alkaline);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = OptimalRange::new(6.0, 7.5);
        assert_eq!(classify(6.0, range), NutrientStatus::Adequate);
        assert_eq!(classify(7.5, range), NutrientStatus::Adequate);
        assert_eq!(classify(5.999, range), NutrientStatus::Deficient);
        assert_eq!(classify(7.501, range), NutrientStatus::Excessive);
    }

    #[test]
    fn nan_is_deficient() {
        assert_eq!(classify(f64::NAN, thresholds::ZINC), NutrientStatus::Deficient);
    }

    #[test]
    fn risk_breakpoints_are_exclusive() {
        let bp = thresholds::DISEASE_INCIDENCE;
        assert_eq!(classify_risk(10.0, bp), RiskLevel::Low);
        assert_eq!(classify_risk(10.5, bp), RiskLevel::Medium);
        assert_eq!(classify_risk(20.0, bp), RiskLevel::Medium);
        assert_eq!(classify_risk(25.0, bp), RiskLevel::High);
    }

    #[test]
    fn stress_uses_single_table() {
        assert_eq!(classify_stress(0.1), RiskLevel::Low);
        assert_eq!(classify_stress(0.45), RiskLevel::Medium);
        assert_eq!(classify_stress(0.8), RiskLevel::High);
    }

    #[test]
    fn severity_and_trend() {
        assert_eq!(classify_severity(2.0), Severity::Mild);
        assert_eq!(classify_severity(9.0), Severity::Moderate);
        assert_eq!(classify_severity(30.0), Severity::Severe);

        assert_eq!(classify_trend(3.0, 2.0), Trend::Increasing);
        assert_eq!(classify_trend(-3.0, 2.0), Trend::Decreasing);
        assert_eq!(classify_trend(1.5, 2.0), Trend::Stable);
    }

    #[test]
    fn colors() {
        assert_eq!(NutrientStatus::Deficient.color(), StatusColor::Red);
        assert_eq!(NutrientStatus::Adequate.color(), StatusColor::Green);
        assert_eq!(RiskLevel::Medium.color(), StatusColor::Yellow);
    }

    #[test]
    fn progress_is_clamped() {
        let range = OptimalRange::new(10.0, 25.0);
        assert_eq!(progress_percent(25.0, range), 50.0);
        assert_eq!(progress_percent(100.0, range), 100.0);
        assert_eq!(progress_percent(-5.0, range), 0.0);
    }
}

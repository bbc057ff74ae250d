//! Recommendation rule tables
//!
//! Static advice keyed by classifier output. Every table is total over its
//! key space so a panel always has something to show.

use serde::{Deserialize, Serialize};

use crate::classification::{NutrientStatus, RiskLevel};
use crate::models::{ForecastDay, ParameterStatus, SoilParameter, StressKind, WeatherSnapshot};
use crate::thresholds;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Fertilizer,
    SoilAmendment,
    Irrigation,
    CropProtection,
    Monitoring,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A piece of advice drawn from a table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub subject: String,
    pub status: String,
    pub priority: Priority,
    pub advice: String,
}

impl Recommendation {
    fn new(
        category: RecommendationCategory,
        subject: &str,
        status: &str,
        priority: Priority,
        advice: &str,
    ) -> Self {
        Self {
            category,
            subject: subject.to_string(),
            status: status.to_string(),
            priority,
            advice: advice.to_string(),
        }
    }
}

/// Advice strings for a soil parameter at a given status
pub fn soil_advice(parameter: SoilParameter, status: NutrientStatus) -> &'static [&'static str] {
    use NutrientStatus::*;
    use SoilParameter::*;

    match (parameter, status) {
        (Ph, Deficient) => &[
            "Apply agricultural lime (2-4 t/ha) to raise soil pH",
            "Use dolomite where magnesium is also low",
        ],
        (Ph, Adequate) => &["Soil pH is optimal; maintain current practices"],
        (Ph, Excessive) => &[
            "Apply gypsum (2-5 t/ha) or elemental sulphur to lower soil pH",
            "Incorporate farmyard manure to buffer alkalinity",
        ],
        (OrganicCarbon, Deficient) => &[
            "Add farmyard manure or compost (5-10 t/ha)",
            "Retain crop residues and grow a green manure crop",
        ],
        (OrganicCarbon, Adequate) => &["Organic carbon is adequate; continue residue retention"],
        (OrganicCarbon, Excessive) => &["Organic carbon is high; reduce manure for this season"],
        (Nitrogen, Deficient) => &[
            "Apply urea (100-120 kg/ha) in two or three split doses",
            "Include a legume in the next rotation",
        ],
        (Nitrogen, Adequate) => &["Nitrogen is adequate; apply maintenance dose only"],
        (Nitrogen, Excessive) => &["Skip the next nitrogen top-dressing to avoid lodging"],
        (Phosphorus, Deficient) => &[
            "Apply DAP (100 kg/ha) or single super phosphate (250 kg/ha) at sowing",
        ],
        (Phosphorus, Adequate) => &["Phosphorus is adequate; apply basal maintenance dose"],
        (Phosphorus, Excessive) => &["Withhold phosphatic fertilizer this season"],
        (Potassium, Deficient) => &["Apply muriate of potash (60-80 kg/ha)"],
        (Potassium, Adequate) => &["Potassium is adequate; no extra potash needed"],
        (Potassium, Excessive) => &["Avoid potash application; monitor magnesium uptake"],
        (BulkDensity, Deficient) => &["Soil is very loose; roll lightly after sowing"],
        (BulkDensity, Adequate) => &["Soil structure is good"],
        (BulkDensity, Excessive) => &[
            "Soil is compacted; deep plough or subsoil before the next crop",
            "Avoid field traffic when the soil is wet",
        ],
        (Moisture, Deficient) => &[
            "Irrigate within 24 hours",
            "Mulch to reduce evaporation",
        ],
        (Moisture, Adequate) => &["Soil moisture is adequate; no irrigation needed"],
        (Moisture, Excessive) => &[
            "Postpone irrigation",
            "Open drainage channels to remove standing water",
        ],
        (Temperature, Deficient) => &["Soil is cold; delay sowing until it warms"],
        (Temperature, Adequate) => &["Soil temperature suits germination"],
        (Temperature, Excessive) => &["Soil is hot; irrigate in the evening and mulch"],
        (CationExchangeCapacity, Deficient) => &["Low CEC; apply fertilizer in smaller, frequent doses"],
        (CationExchangeCapacity, Adequate) => &["Nutrient holding capacity is good"],
        (CationExchangeCapacity, Excessive) => &["High CEC; expect slower response to fertilizer"],
        (ElectricalConductivity, Deficient) => &["Salinity is very low; no action needed"],
        (ElectricalConductivity, Adequate) => &["Salinity is within the safe range"],
        (ElectricalConductivity, Excessive) => &[
            "Leach salts with good quality irrigation water",
            "Grow salt tolerant varieties",
        ],
        (Iron, Deficient) => &["Spray ferrous sulphate (0.5%) on the foliage"],
        (Iron, Adequate) => &["Iron is adequate"],
        (Iron, Excessive) => &["Improve drainage to reduce iron toxicity"],
        (Zinc, Deficient) => &["Apply zinc sulfate (2-3 kg/ha)"],
        (Zinc, Adequate) => &["Zinc is adequate"],
        (Zinc, Excessive) => &["Stop zinc application for two seasons"],
        (Manganese, Deficient) => &["Spray manganese sulphate (0.5%)"],
        (Manganese, Adequate) => &["Manganese is adequate"],
        (Manganese, Excessive) => &["Raise pH with lime to reduce manganese availability"],
        (Copper, Deficient) => &["Apply copper sulphate (5 kg/ha)"],
        (Copper, Adequate) => &["Copper is adequate"],
        (Copper, Excessive) => &["Avoid copper based fungicides this season"],
        (Boron, Deficient) => &["Apply borax (10 kg/ha) before flowering"],
        (Boron, Adequate) => &["Boron is adequate"],
        (Boron, Excessive) => &["Irrigate well to leach excess boron"],
    }
}

fn soil_category(parameter: SoilParameter) -> RecommendationCategory {
    match parameter {
        SoilParameter::Moisture => RecommendationCategory::Irrigation,
        SoilParameter::Ph
        | SoilParameter::BulkDensity
        | SoilParameter::ElectricalConductivity
        | SoilParameter::Temperature
        | SoilParameter::CationExchangeCapacity => RecommendationCategory::SoilAmendment,
        _ => RecommendationCategory::Fertilizer,
    }
}

/// Recommendations for every parameter outside its optimal range
pub fn soil_recommendations(statuses: &[ParameterStatus]) -> Vec<Recommendation> {
    statuses
        .iter()
        .filter(|s| s.status != NutrientStatus::Adequate)
        .flat_map(|s| {
            let priority = if s.status == NutrientStatus::Deficient {
                Priority::High
            } else {
                Priority::Medium
            };
            soil_advice(s.parameter, s.status).iter().map(move |advice| {
                Recommendation::new(
                    soil_category(s.parameter),
                    s.parameter.label(),
                    s.status.as_str(),
                    priority,
                    advice,
                )
            })
        })
        .collect()
}

/// Advice for a crop stress indicator
pub fn stress_advice(kind: StressKind, level: RiskLevel) -> &'static str {
    match (kind, level) {
        (StressKind::Water, RiskLevel::High) => "Severe water stress: irrigate immediately",
        (StressKind::Water, RiskLevel::Medium) => "Schedule irrigation within 2-3 days",
        (StressKind::Nutrient, RiskLevel::High) => "Apply a foliar NPK spray (19:19:19 at 0.5%)",
        (StressKind::Nutrient, RiskLevel::Medium) => "Plan a top-dressing at the next irrigation",
        (StressKind::Disease, RiskLevel::High) => "Spray a recommended fungicide and remove infected plants",
        (StressKind::Disease, RiskLevel::Medium) => "Inspect leaves for lesions every 2-3 days",
        (StressKind::Pest, RiskLevel::High) => "Apply targeted insecticide at the economic threshold",
        (StressKind::Pest, RiskLevel::Medium) => "Install pheromone and sticky traps",
        (_, RiskLevel::Low) => "No action needed",
    }
}

/// Stress recommendations for medium and high stress only
pub fn stress_recommendations(
    stresses: impl IntoIterator<Item = (StressKind, RiskLevel)>,
) -> Vec<Recommendation> {
    stresses
        .into_iter()
        .filter(|(_, level)| *level != RiskLevel::Low)
        .map(|(kind, level)| {
            let (category, subject) = match kind {
                StressKind::Water => (RecommendationCategory::Irrigation, "Water stress"),
                StressKind::Nutrient => (RecommendationCategory::Fertilizer, "Nutrient stress"),
                StressKind::Disease => (RecommendationCategory::CropProtection, "Disease stress"),
                StressKind::Pest => (RecommendationCategory::CropProtection, "Pest stress"),
            };
            let priority = if level == RiskLevel::High {
                Priority::High
            } else {
                Priority::Medium
            };
            Recommendation::new(category, subject, level.as_str(), priority, stress_advice(kind, level))
        })
        .collect()
}

/// Field level advice for an overall disease/pest risk
pub fn risk_advice(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::High => &[
            "Apply the recommended treatment immediately",
            "Contact the local Krishi Vigyan Kendra for confirmation",
        ],
        RiskLevel::Medium => &[
            "Scout the field every 2-3 days",
            "Keep recommended treatments on hand",
        ],
        RiskLevel::Low => &["Continue routine monitoring"],
    }
}

/// Irrigation advice from soil moisture status and expected rain
pub fn irrigation_advice(moisture: NutrientStatus, rain_expected: bool) -> &'static str {
    match (moisture, rain_expected) {
        (NutrientStatus::Deficient, true) => "Rain is expected; apply a light irrigation only if it does not arrive within 48 hours",
        (NutrientStatus::Deficient, false) => "Irrigate within 24 hours",
        (NutrientStatus::Adequate, true) => "Skip irrigation; expected rain will maintain moisture",
        (NutrientStatus::Adequate, false) => "No irrigation needed; check again in 3 days",
        (NutrientStatus::Excessive, _) => "Postpone irrigation and keep drainage channels open",
    }
}

/// Alerts for the current conditions and the outlook
pub fn weather_alerts(current: &WeatherSnapshot, forecast: &[ForecastDay]) -> Vec<String> {
    let mut alerts = Vec::new();

    if current.humidity_percent > thresholds::HIGH_HUMIDITY_PCT {
        alerts.push(format!(
            "Humidity at {:.0}%: watch for fungal disease",
            current.humidity_percent
        ));
    }
    for day in forecast {
        if day.precipitation_mm >= thresholds::HEAVY_RAIN_MM {
            alerts.push(format!(
                "Heavy rain ({:.0} mm) expected on {}: clear field drainage",
                day.precipitation_mm, day.date
            ));
        }
        if day.high_celsius > thresholds::HEAT_STRESS_C {
            alerts.push(format!(
                "Heat stress ({:.0}°C) on {}: irrigate in the evening",
                day.high_celsius, day.date
            ));
        }
        if day.low_celsius < thresholds::FROST_RISK_C {
            alerts.push(format!(
                "Frost risk ({:.0}°C) on {}: apply light irrigation at night",
                day.low_celsius, day.date
            ));
        }
    }
    alerts
}

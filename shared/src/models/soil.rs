//! Soil chemistry models

use serde::{Deserialize, Serialize};

use crate::classification::{
    classify, classify_ph, NutrientStatus, OptimalRange, PhStatus, StatusColor,
};
use crate::error::ParseError;
use crate::recommendations::{soil_recommendations, Recommendation};
use crate::thresholds;

/// Conversion factor from organic carbon to organic matter
pub const ORGANIC_MATTER_FACTOR: f64 = 1.724;

/// One soil test result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub ph: f64,
    /// Percent
    pub organic_carbon: f64,
    /// Percent
    pub organic_matter: f64,
    /// kg/ha
    pub nitrogen: f64,
    /// kg/ha
    pub phosphorus: f64,
    /// kg/ha
    pub potassium: f64,
    /// g/cm3
    pub bulk_density: f64,
    /// Percent
    pub moisture: f64,
    /// Celsius
    pub temperature: f64,
    /// cmol/kg
    pub cation_exchange_capacity: f64,
    /// dS/m
    pub electrical_conductivity: f64,
    pub micronutrients: Micronutrients,
}

/// Micronutrients in ppm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Micronutrients {
    pub iron: f64,
    pub zinc: f64,
    pub manganese: f64,
    pub copper: f64,
    pub boron: f64,
}

/// Every classified soil property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SoilParameter {
    Ph,
    OrganicCarbon,
    Nitrogen,
    Phosphorus,
    Potassium,
    BulkDensity,
    Moisture,
    Temperature,
    CationExchangeCapacity,
    ElectricalConductivity,
    Iron,
    Zinc,
    Manganese,
    Copper,
    Boron,
}

impl SoilParameter {
    pub const ALL: [SoilParameter; 15] = [
        SoilParameter::Ph,
        SoilParameter::OrganicCarbon,
        SoilParameter::Nitrogen,
        SoilParameter::Phosphorus,
        SoilParameter::Potassium,
        SoilParameter::BulkDensity,
        SoilParameter::Moisture,
        SoilParameter::Temperature,
        SoilParameter::CationExchangeCapacity,
        SoilParameter::ElectricalConductivity,
        SoilParameter::Iron,
        SoilParameter::Zinc,
        SoilParameter::Manganese,
        SoilParameter::Copper,
        SoilParameter::Boron,
    ];

    /// Parameters shown on the nutrient panel
    pub const NUTRIENTS: [SoilParameter; 9] = [
        SoilParameter::Nitrogen,
        SoilParameter::Phosphorus,
        SoilParameter::Potassium,
        SoilParameter::OrganicCarbon,
        SoilParameter::Iron,
        SoilParameter::Zinc,
        SoilParameter::Manganese,
        SoilParameter::Copper,
        SoilParameter::Boron,
    ];

    pub fn optimal_range(&self) -> OptimalRange {
        match self {
            SoilParameter::Ph => thresholds::SOIL_PH,
            SoilParameter::OrganicCarbon => thresholds::ORGANIC_CARBON,
            SoilParameter::Nitrogen => thresholds::NITROGEN,
            SoilParameter::Phosphorus => thresholds::PHOSPHORUS,
            SoilParameter::Potassium => thresholds::POTASSIUM,
            SoilParameter::BulkDensity => thresholds::BULK_DENSITY,
            SoilParameter::Moisture => thresholds::SOIL_MOISTURE,
            SoilParameter::Temperature => thresholds::SOIL_TEMPERATURE,
            SoilParameter::CationExchangeCapacity => thresholds::CEC,
            SoilParameter::ElectricalConductivity => thresholds::ELECTRICAL_CONDUCTIVITY,
            SoilParameter::Iron => thresholds::IRON,
            SoilParameter::Zinc => thresholds::ZINC,
            SoilParameter::Manganese => thresholds::MANGANESE,
            SoilParameter::Copper => thresholds::COPPER,
            SoilParameter::Boron => thresholds::BORON,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SoilParameter::Ph => "",
            SoilParameter::OrganicCarbon | SoilParameter::Moisture => "%",
            SoilParameter::Nitrogen | SoilParameter::Phosphorus | SoilParameter::Potassium => {
                "kg/ha"
            }
            SoilParameter::BulkDensity => "g/cm3",
            SoilParameter::Temperature => "°C",
            SoilParameter::CationExchangeCapacity => "cmol/kg",
            SoilParameter::ElectricalConductivity => "dS/m",
            SoilParameter::Iron
            | SoilParameter::Zinc
            | SoilParameter::Manganese
            | SoilParameter::Copper
            | SoilParameter::Boron => "ppm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilParameter::Ph => "pH",
            SoilParameter::OrganicCarbon => "Organic Carbon",
            SoilParameter::Nitrogen => "Nitrogen (N)",
            SoilParameter::Phosphorus => "Phosphorus (P)",
            SoilParameter::Potassium => "Potassium (K)",
            SoilParameter::BulkDensity => "Bulk Density",
            SoilParameter::Moisture => "Soil Moisture",
            SoilParameter::Temperature => "Soil Temperature",
            SoilParameter::CationExchangeCapacity => "CEC",
            SoilParameter::ElectricalConductivity => "Electrical Conductivity",
            SoilParameter::Iron => "Iron (Fe)",
            SoilParameter::Zinc => "Zinc (Zn)",
            SoilParameter::Manganese => "Manganese (Mn)",
            SoilParameter::Copper => "Copper (Cu)",
            SoilParameter::Boron => "Boron (B)",
        }
    }

    pub fn value_of(&self, reading: &SoilReading) -> f64 {
        match self {
            SoilParameter::Ph => reading.ph,
            SoilParameter::OrganicCarbon => reading.organic_carbon,
            SoilParameter::Nitrogen => reading.nitrogen,
            SoilParameter::Phosphorus => reading.phosphorus,
            SoilParameter::Potassium => reading.potassium,
            SoilParameter::BulkDensity => reading.bulk_density,
            SoilParameter::Moisture => reading.moisture,
            SoilParameter::Temperature => reading.temperature,
            SoilParameter::CationExchangeCapacity => reading.cation_exchange_capacity,
            SoilParameter::ElectricalConductivity => reading.electrical_conductivity,
            SoilParameter::Iron => reading.micronutrients.iron,
            SoilParameter::Zinc => reading.micronutrients.zinc,
            SoilParameter::Manganese => reading.micronutrients.manganese,
            SoilParameter::Copper => reading.micronutrients.copper,
            SoilParameter::Boron => reading.micronutrients.boron,
        }
    }
}

impl std::str::FromStr for SoilParameter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase().replace(['-', ' '], "_");
        let parameter = match key.as_str() {
            "ph" => SoilParameter::Ph,
            "organic_carbon" | "oc" => SoilParameter::OrganicCarbon,
            "nitrogen" | "n" => SoilParameter::Nitrogen,
            "phosphorus" | "p" => SoilParameter::Phosphorus,
            "potassium" | "k" => SoilParameter::Potassium,
            "bulk_density" => SoilParameter::BulkDensity,
            "moisture" => SoilParameter::Moisture,
            "temperature" => SoilParameter::Temperature,
            "cec" | "cation_exchange_capacity" => SoilParameter::CationExchangeCapacity,
            "ec" | "electrical_conductivity" => SoilParameter::ElectricalConductivity,
            "iron" | "fe" => SoilParameter::Iron,
            "zinc" | "zn" => SoilParameter::Zinc,
            "manganese" | "mn" => SoilParameter::Manganese,
            "copper" | "cu" => SoilParameter::Copper,
            "boron" | "b" => SoilParameter::Boron,
            _ => return Err(ParseError::UnknownSoilParameter(s.to_string())),
        };
        Ok(parameter)
    }
}

/// A reading with its badge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterStatus {
    pub parameter: SoilParameter,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub optimal: OptimalRange,
    pub status: NutrientStatus,
    pub color: StatusColor,
}

impl ParameterStatus {
    pub fn evaluate(parameter: SoilParameter, reading: &SoilReading) -> Self {
        let value = parameter.value_of(reading);
        let optimal = parameter.optimal_range();
        let status = classify(value, optimal);
        Self {
            parameter,
            label: parameter.label().to_string(),
            value,
            unit: parameter.unit().to_string(),
            optimal,
            status,
            color: status.color(),
        }
    }
}

/// Soil panel: reading, per-parameter status and advice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub field_id: String,
    pub reading: SoilReading,
    pub ph_status: PhStatus,
    pub parameters: Vec<ParameterStatus>,
    pub health_score: u8,
    pub recommendations: Vec<Recommendation>,
}

impl SoilAnalysis {
    /// Classify every parameter of a reading
    pub fn from_reading(field_id: &str, reading: SoilReading) -> Self {
        let parameters: Vec<ParameterStatus> = SoilParameter::ALL
            .iter()
            .map(|p| ParameterStatus::evaluate(*p, &reading))
            .collect();
        Self {
            field_id: field_id.to_string(),
            ph_status: classify_ph(reading.ph),
            health_score: soil_health_score(&parameters),
            recommendations: soil_recommendations(&parameters),
            parameters,
            reading,
        }
    }
}

/// Nutrient panel: NPK, organic carbon and micronutrients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientReport {
    pub field_id: String,
    pub nutrients: Vec<ParameterStatus>,
    pub deficient_count: usize,
    pub recommendations: Vec<Recommendation>,
}

impl NutrientReport {
    pub fn from_reading(field_id: &str, reading: &SoilReading) -> Self {
        let nutrients: Vec<ParameterStatus> = SoilParameter::NUTRIENTS
            .iter()
            .map(|p| ParameterStatus::evaluate(*p, reading))
            .collect();
        Self {
            field_id: field_id.to_string(),
            deficient_count: nutrients
                .iter()
                .filter(|n| n.status == NutrientStatus::Deficient)
                .count(),
            recommendations: soil_recommendations(&nutrients),
            nutrients,
        }
    }
}

/// Share of adequate parameters, 0..=100
pub fn soil_health_score(parameters: &[ParameterStatus]) -> u8 {
    if parameters.is_empty() {
        return 0;
    }
    let adequate = parameters
        .iter()
        .filter(|p| p.status == NutrientStatus::Adequate)
        .count();
    ((adequate * 100) / parameters.len()) as u8
}

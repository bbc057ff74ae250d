//! Threshold tables for every status classifier
//!
//! Panels read their optimal ranges and risk breakpoints from here so the
//! same reading always gets the same badge.

use crate::classification::{OptimalRange, RiskBreakpoints};

// ============================================================================
// Soil chemistry
// ============================================================================

pub const SOIL_PH: OptimalRange = OptimalRange::new(6.0, 7.5);
/// Organic carbon, percent
pub const ORGANIC_CARBON: OptimalRange = OptimalRange::new(0.5, 0.75);
/// Available nitrogen, kg/ha
pub const NITROGEN: OptimalRange = OptimalRange::new(280.0, 560.0);
/// Available phosphorus, kg/ha
pub const PHOSPHORUS: OptimalRange = OptimalRange::new(10.0, 25.0);
/// Available potassium, kg/ha
pub const POTASSIUM: OptimalRange = OptimalRange::new(108.0, 280.0);
/// Bulk density, g/cm3
pub const BULK_DENSITY: OptimalRange = OptimalRange::new(1.1, 1.5);
/// Volumetric moisture, percent
pub const SOIL_MOISTURE: OptimalRange = OptimalRange::new(20.0, 35.0);
/// Soil temperature, celsius
pub const SOIL_TEMPERATURE: OptimalRange = OptimalRange::new(15.0, 30.0);
/// Cation exchange capacity, cmol/kg
pub const CEC: OptimalRange = OptimalRange::new(10.0, 25.0);
/// Electrical conductivity, dS/m
pub const ELECTRICAL_CONDUCTIVITY: OptimalRange = OptimalRange::new(0.1, 1.0);

// Micronutrients, ppm (DTPA extractable)
pub const IRON: OptimalRange = OptimalRange::new(4.5, 10.0);
pub const ZINC: OptimalRange = OptimalRange::new(0.6, 3.0);
pub const MANGANESE: OptimalRange = OptimalRange::new(2.0, 10.0);
pub const COPPER: OptimalRange = OptimalRange::new(0.2, 3.0);
pub const BORON: OptimalRange = OptimalRange::new(0.5, 2.0);

// ============================================================================
// Risk breakpoints
// ============================================================================

/// Crop stress indicators in 0..=1. One table for every panel.
pub const STRESS: RiskBreakpoints = RiskBreakpoints::new(0.3, 0.6);
/// Disease incidence, percent of plants affected
pub const DISEASE_INCIDENCE: RiskBreakpoints = RiskBreakpoints::new(10.0, 20.0);
/// Pest damage, percent of plants affected
pub const PEST_DAMAGE: RiskBreakpoints = RiskBreakpoints::new(15.0, 30.0);
/// Incidence at which an outbreak is called moderate / severe
pub const SEVERITY: RiskBreakpoints = RiskBreakpoints::new(5.0, 15.0);

/// Percent change treated as flat for market trends
pub const MARKET_TREND_TOLERANCE_PCT: f64 = 1.0;
/// Incidence delta treated as flat for outbreak trends
pub const INCIDENCE_TREND_TOLERANCE: f64 = 2.0;

// ============================================================================
// Weather alerts
// ============================================================================

/// Daily rain that floods low fields, mm
pub const HEAVY_RAIN_MM: f64 = 20.0;
/// Rain that counts as "rain expected" for irrigation planning, mm
pub const RAIN_EXPECTED_MM: f64 = 2.0;
/// Heat stress above this maximum, °C
pub const HEAT_STRESS_C: f64 = 40.0;
/// Frost risk below this minimum, °C
pub const FROST_RISK_C: f64 = 4.0;
/// Fungal disease pressure above this relative humidity, percent
pub const HIGH_HUMIDITY_PCT: f64 = 90.0;

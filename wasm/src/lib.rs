//! WebAssembly module for the Krishi farm dashboard
//!
//! Provides client-side computation for:
//! - Season resolution
//! - Field variation offsets
//! - Soil, pH and stress classification with badge colors
//! - Recommendation lookups
//! - Offline demo soil panels

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::simulation::{generate_soil_reading, FieldContext};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::{
    classify, classify_ph, classify_stress, field_variation, irrigation_advice, soil_advice,
    PhStatus, RiskLevel, Season,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("Krishi dashboard rules loaded"));
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| format!("Invalid date {}: {}", date, e))
}

fn parse_parameter(parameter: &str) -> Result<SoilParameter, String> {
    parameter.parse::<SoilParameter>().map_err(|e| e.to_string())
}

/// Season for a `YYYY-MM-DD` date
#[wasm_bindgen]
pub fn season_for_date(date: &str) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(js_error)?;
    Ok(Season::from_date(&date).to_string())
}

/// Season for a calendar month, 1-12
#[wasm_bindgen]
pub fn season_for_month(month: u32) -> String {
    Season::from_month(month).to_string()
}

/// Season for the browser's local date
#[wasm_bindgen]
pub fn current_season() -> String {
    // getMonth is zero based
    let month = js_sys::Date::new_0().get_month() + 1;
    season_for_month(month)
}

/// Deterministic per-field offset in `[-scale, scale]`
#[wasm_bindgen]
pub fn field_offset(field_id: &str, scale: f64) -> f64 {
    field_variation(field_id, scale)
}

/// Status of a soil parameter: "deficient", "adequate" or "excessive"
#[wasm_bindgen]
pub fn classify_soil_parameter(parameter: &str, value: f64) -> Result<String, JsValue> {
    let parameter = parse_parameter(parameter).map_err(js_error)?;
    Ok(classify(value, parameter.optimal_range()).to_string())
}

/// Badge color for a soil parameter value
#[wasm_bindgen]
pub fn soil_parameter_color(parameter: &str, value: f64) -> Result<String, JsValue> {
    let parameter = parse_parameter(parameter).map_err(js_error)?;
    let color = classify(value, parameter.optimal_range()).color();
    serde_json::to_value(color)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .ok_or_else(|| js_error("Unknown color".to_string()))
}

/// "acidic", "optimal" or "alkaline"
#[wasm_bindgen]
pub fn soil_reaction(ph: f64) -> String {
    match classify_ph(ph) {
        PhStatus::Acidic => "acidic",
        PhStatus::Optimal => "optimal",
        PhStatus::Alkaline => "alkaline",
    }
    .to_string()
}

/// Stress tier for an indicator in 0..=1
#[wasm_bindgen]
pub fn stress_level(value: f64) -> String {
    classify_stress(value).to_string()
}

/// Advice for a soil parameter value, as a JSON array of strings
#[wasm_bindgen]
pub fn soil_advice_for(parameter: &str, value: f64) -> Result<String, JsValue> {
    let parameter = parse_parameter(parameter).map_err(js_error)?;
    let status = classify(value, parameter.optimal_range());
    serde_json::to_string(soil_advice(parameter, status)).map_err(|e| js_error(e.to_string()))
}

/// Irrigation advice from soil moisture percent
#[wasm_bindgen]
pub fn irrigation_advice_for(moisture_percent: f64, rain_expected: bool) -> String {
    let status = classify(moisture_percent, SoilParameter::Moisture.optimal_range());
    irrigation_advice(status, rain_expected).to_string()
}

/// Soil panel generated in the browser, as JSON. The same seed gives the
/// same panel.
#[wasm_bindgen]
pub fn demo_soil_analysis(field_id: &str, date: &str, seed: u32) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(js_error)?;
    let ctx = FieldContext::new(field_id, Season::from_date(&date));
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    let analysis = SoilAnalysis::from_reading(field_id, generate_soil_reading(&ctx, &mut rng));
    serde_json::to_string(&analysis).map_err(|e| js_error(e.to_string()))
}

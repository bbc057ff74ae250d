//! Simulated field sensor samples

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub field_id: String,
    pub timestamp: DateTime<Utc>,
    pub soil_moisture: f64,
    pub soil_temperature: f64,
    pub air_temperature: f64,
    pub humidity: f64,
    pub ph: f64,
}

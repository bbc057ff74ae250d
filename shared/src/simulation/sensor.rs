//! Field sensor sample generator

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{FieldContext, MetricSpec};
use crate::models::SensorReading;

pub const SOIL_MOISTURE: MetricSpec = MetricSpec::new([34.0, 25.0, 21.0, 13.0], 4.0, 2.0);
pub const SOIL_TEMPERATURE: MetricSpec = MetricSpec::new([26.0, 23.0, 17.0, 32.0], 1.5, 0.8);
pub const AIR_TEMPERATURE: MetricSpec = MetricSpec::new([29.0, 26.0, 20.0, 35.0], 1.5, 1.5);
pub const HUMIDITY: MetricSpec = MetricSpec::new([85.0, 65.0, 55.0, 35.0], 5.0, 4.0);
pub const PH: MetricSpec = MetricSpec::new([6.6, 6.8, 7.0, 7.2], 0.3, 0.1);

pub fn generate_sensor_reading<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    timestamp: DateTime<Utc>,
    rng: &mut R,
) -> SensorReading {
    SensorReading {
        field_id: ctx.field_id.to_string(),
        timestamp,
        soil_moisture: ctx.sample(&SOIL_MOISTURE, rng).clamp(0.0, 100.0),
        soil_temperature: ctx.sample(&SOIL_TEMPERATURE, rng),
        air_temperature: ctx.sample(&AIR_TEMPERATURE, rng),
        humidity: ctx.sample(&HUMIDITY, rng).clamp(0.0, 100.0),
        ph: ctx.sample(&PH, rng),
    }
}

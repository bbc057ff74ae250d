//! CSV export of panel data

use serde::Serialize;
use shared::SensorReading;

use crate::error::{AppError, AppResult};

pub struct ExportService;

/// Flat row for sensor exports, rounded for spreadsheets
#[derive(Debug, Serialize)]
struct SensorRow<'a> {
    field_id: &'a str,
    timestamp: String,
    soil_moisture_percent: String,
    soil_temperature_celsius: String,
    air_temperature_celsius: String,
    humidity_percent: String,
    ph: String,
}

impl<'a> From<&'a SensorReading> for SensorRow<'a> {
    fn from(reading: &'a SensorReading) -> Self {
        Self {
            field_id: &reading.field_id,
            timestamp: reading.timestamp.to_rfc3339(),
            soil_moisture_percent: format!("{:.1}", reading.soil_moisture),
            soil_temperature_celsius: format!("{:.1}", reading.soil_temperature),
            air_temperature_celsius: format!("{:.1}", reading.air_temperature),
            humidity_percent: format!("{:.1}", reading.humidity),
            ph: format!("{:.2}", reading.ph),
        }
    }
}

impl ExportService {
    /// Serialize any records to CSV with a header row
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    pub fn sensor_history_csv(readings: &[SensorReading]) -> AppResult<String> {
        let rows: Vec<SensorRow<'_>> = readings.iter().map(SensorRow::from).collect();
        Self::export_to_csv(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_sensor_history_csv() {
        let reading = SensorReading {
            field_id: "field-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 7, 15, 6, 0, 0).unwrap(),
            soil_moisture: 31.26,
            soil_temperature: 26.04,
            air_temperature: 29.5,
            humidity: 84.0,
            ph: 6.789,
        };
        let csv = ExportService::sensor_history_csv(&[reading]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("field_id,timestamp,soil_moisture_percent,soil_temperature_celsius,air_temperature_celsius,humidity_percent,ph")
        );
        assert_eq!(
            lines.next(),
            Some("field-1,2024-07-15T06:00:00+00:00,31.3,26.0,29.5,84.0,6.79")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_export() {
        let rows: Vec<SensorRow<'_>> = Vec::new();
        assert_eq!(ExportService::export_to_csv(&rows).unwrap(), "");
    }
}

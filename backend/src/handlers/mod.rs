//! HTTP handlers for the dashboard API

pub mod diagnosis;
pub mod fields;
pub mod health;
pub mod location;
pub mod market;
pub mod season;
pub mod voice;
pub mod weather;

pub use diagnosis::*;
pub use fields::*;
pub use health::*;
pub use location::*;
pub use market::*;
pub use season::*;
pub use voice::*;
pub use weather::*;

use shared::GpsCoordinates;

use crate::error::{AppError, AppResult};

const MAX_FIELD_ID_LEN: usize = 64;

/// Field ids are used as cache keys and in file names
pub fn check_field_id(field_id: &str) -> AppResult<()> {
    let valid = !field_id.is_empty()
        && field_id.len() <= MAX_FIELD_ID_LEN
        && field_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid(
            "field_id",
            "Field id must be 1-64 letters, digits, '-' or '_'",
            "खेत की पहचान में 1-64 अक्षर, अंक, '-' या '_' होने चाहिए",
        ))
    }
}

/// Optional coordinates from a query string; both or neither must be given
pub fn optional_location(lat: Option<f64>, lon: Option<f64>) -> AppResult<Option<GpsCoordinates>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let location = GpsCoordinates::new(lat, lon);
            if location.is_valid() {
                Ok(Some(location))
            } else {
                Err(AppError::invalid(
                    "lat",
                    "Latitude must be within ±90 and longitude within ±180",
                    "अक्षांश ±90 और देशांतर ±180 के भीतर होना चाहिए",
                ))
            }
        }
        (None, None) => Ok(None),
        _ => Err(AppError::invalid(
            "lon",
            "Both lat and lon are required",
            "अक्षांश और देशांतर दोनों आवश्यक हैं",
        )),
    }
}

/// Coordinates that must be present
pub fn required_location(lat: Option<f64>, lon: Option<f64>) -> AppResult<GpsCoordinates> {
    optional_location(lat, lon)?.ok_or_else(|| {
        AppError::invalid(
            "lat",
            "lat and lon are required",
            "अक्षांश और देशांतर आवश्यक हैं",
        )
    })
}

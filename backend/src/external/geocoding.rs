//! Nominatim geocoding client
//!
//! OpenStreetMap's usage policy requires an identifying User-Agent, which the
//! HTTP client for this integration is built with.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::GpsCoordinates;

use super::read_json;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// A resolved place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub display_name: String,
    pub location: GpsCoordinates,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    village: Option<String>,
    town: Option<String>,
    city: Option<String>,
    state_district: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl TryFrom<NominatimPlace> for Place {
    type Error = AppError;

    fn try_from(place: NominatimPlace) -> Result<Self, Self::Error> {
        let latitude = place.lat.parse::<f64>().map_err(|_| {
            AppError::ExternalService(format!("Nominatim returned bad latitude {}", place.lat))
        })?;
        let longitude = place.lon.parse::<f64>().map_err(|_| {
            AppError::ExternalService(format!("Nominatim returned bad longitude {}", place.lon))
        })?;
        let address = place.address.unwrap_or_default();

        Ok(Place {
            display_name: place.display_name,
            location: GpsCoordinates::new(latitude, longitude),
            village: address.village.or(address.town).or(address.city),
            district: address.state_district.or(address.county),
            state: address.state,
            country: address.country,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Place(NominatimPlace),
    Error { error: String },
}

impl NominatimClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Place name for coordinates
    pub async fn reverse(&self, location: GpsCoordinates) -> AppResult<Place> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        match read_json::<ReverseResponse>(response, "Nominatim").await? {
            ReverseResponse::Place(place) => place.try_into(),
            ReverseResponse::Error { error } => Err(AppError::ExternalService(format!(
                "Nominatim: {}",
                error
            ))),
        }
    }

    /// Places matching a free-text query
    pub async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<Place>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query.to_string()),
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let places: Vec<NominatimPlace> = read_json(response, "Nominatim").await?;
        places.into_iter().map(Place::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_response_to_place() {
        let json = r#"{
            "place_id": 1,
            "lat": "28.6139",
            "lon": "77.2090",
            "display_name": "Connaught Place, New Delhi, Delhi, India",
            "address": {
                "city": "New Delhi",
                "state_district": "New Delhi",
                "state": "Delhi",
                "country": "India"
            }
        }"#;
        let response: ReverseResponse = serde_json::from_str(json).unwrap();
        let place = match response {
            ReverseResponse::Place(p) => Place::try_from(p).unwrap(),
            ReverseResponse::Error { .. } => panic!("expected a place"),
        };
        assert_eq!(place.location, GpsCoordinates::new(28.6139, 77.2090));
        assert_eq!(place.village.as_deref(), Some("New Delhi"));
        assert_eq!(place.state.as_deref(), Some("Delhi"));
    }

    #[test]
    fn test_reverse_error_body() {
        let response: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(matches!(response, ReverseResponse::Error { .. }));
    }

    #[test]
    fn test_bad_coordinates_rejected() {
        let place = NominatimPlace {
            display_name: "x".to_string(),
            lat: "north".to_string(),
            lon: "0".to_string(),
            address: None,
        };
        assert!(Place::try_from(place).is_err());
    }
}

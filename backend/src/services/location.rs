//! Reverse and forward geocoding with an offline gazetteer fallback

use std::sync::Arc;

use shared::{DataSource, GpsCoordinates, Season, Sourced};

use super::{log_fallback, DemoService};
use crate::error::{AppError, AppResult};
use crate::external::geocoding::Place;
use crate::external::NominatimClient;

pub const SEARCH_LIMIT: usize = 5;

struct KnownPlace {
    name: &'static str,
    district: &'static str,
    state: &'static str,
    latitude: f64,
    longitude: f64,
}

const GAZETTEER: &[KnownPlace] = &[
    KnownPlace { name: "Ludhiana", district: "Ludhiana", state: "Punjab", latitude: 30.901, longitude: 75.857 },
    KnownPlace { name: "Karnal", district: "Karnal", state: "Haryana", latitude: 29.686, longitude: 76.990 },
    KnownPlace { name: "Hisar", district: "Hisar", state: "Haryana", latitude: 29.149, longitude: 75.721 },
    KnownPlace { name: "Meerut", district: "Meerut", state: "Uttar Pradesh", latitude: 28.984, longitude: 77.706 },
    KnownPlace { name: "New Delhi", district: "New Delhi", state: "Delhi", latitude: 28.614, longitude: 77.209 },
    KnownPlace { name: "Indore", district: "Indore", state: "Madhya Pradesh", latitude: 22.720, longitude: 75.858 },
    KnownPlace { name: "Nashik", district: "Nashik", state: "Maharashtra", latitude: 19.998, longitude: 73.790 },
    KnownPlace { name: "Guntur", district: "Guntur", state: "Andhra Pradesh", latitude: 16.307, longitude: 80.436 },
    KnownPlace { name: "Thanjavur", district: "Thanjavur", state: "Tamil Nadu", latitude: 10.787, longitude: 79.138 },
    KnownPlace { name: "Bardhaman", district: "Purba Bardhaman", state: "West Bengal", latitude: 23.232, longitude: 87.863 },
];

impl KnownPlace {
    fn to_place(&self) -> Place {
        Place {
            display_name: format!("{}, {}, {}, India", self.name, self.district, self.state),
            location: GpsCoordinates::new(self.latitude, self.longitude),
            village: Some(self.name.to_string()),
            district: Some(self.district.to_string()),
            state: Some(self.state.to_string()),
            country: Some("India".to_string()),
        }
    }

    /// Squared equirectangular distance, enough for ranking
    fn distance_to(&self, location: GpsCoordinates) -> f64 {
        let mean_lat = ((self.latitude + location.latitude) / 2.0).to_radians();
        let dx = (self.longitude - location.longitude) * mean_lat.cos();
        let dy = self.latitude - location.latitude;
        dx * dx + dy * dy
    }
}

/// Closest gazetteer entry
fn nearest_place(location: GpsCoordinates) -> Place {
    GAZETTEER
        .iter()
        .min_by(|a, b| a.distance_to(location).total_cmp(&b.distance_to(location)))
        .map(KnownPlace::to_place)
        .unwrap_or_else(|| Place {
            display_name: "Unknown location".to_string(),
            location,
            village: None,
            district: None,
            state: None,
            country: None,
        })
}

fn search_gazetteer(query: &str) -> Vec<Place> {
    let query = query.to_lowercase();
    GAZETTEER
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query)
                || p.district.to_lowercase().contains(&query)
                || p.state.to_lowercase().contains(&query)
        })
        .take(SEARCH_LIMIT)
        .map(KnownPlace::to_place)
        .collect()
}

#[derive(Clone)]
pub struct LocationService {
    client: Option<NominatimClient>,
    demo: Arc<DemoService>,
}

impl LocationService {
    pub fn new(client: Option<NominatimClient>, demo: Arc<DemoService>) -> Self {
        Self { client, demo }
    }

    pub async fn reverse(&self, location: GpsCoordinates) -> AppResult<Sourced<Place>> {
        if !location.is_valid() {
            return Err(AppError::invalid(
                "lat",
                "Coordinates are out of range",
                "निर्देशांक सीमा से बाहर हैं",
            ));
        }
        let season = Season::current();

        if let Some(client) = &self.client {
            match client.reverse(location).await {
                Ok(place) => return Ok(Sourced::new(DataSource::Nominatim, season, place)),
                Err(e) => log_fallback("nominatim", &e),
            }
        }

        self.demo.simulate_latency().await;
        let mut place = nearest_place(location);
        place.location = location;
        Ok(Sourced::demo(season, place))
    }

    pub async fn search(&self, query: &str) -> AppResult<Sourced<Vec<Place>>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid(
                "q",
                "Search text is required",
                "खोज के लिए शब्द लिखें",
            ));
        }
        let season = Season::current();

        if let Some(client) = &self.client {
            match client.search(query, SEARCH_LIMIT).await {
                Ok(places) => return Ok(Sourced::new(DataSource::Nominatim, season, places)),
                Err(e) => log_fallback("nominatim", &e),
            }
        }

        self.demo.simulate_latency().await;
        Ok(Sourced::demo(season, search_gazetteer(query)))
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are inside the WGS84 domain
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Supported response languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Hindi,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::English => "en",
        }
    }
}

/// Where a panel's data came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataSource {
    #[serde(rename = "SoilGrids (ISRIC)")]
    SoilGrids,
    #[serde(rename = "OpenWeatherMap")]
    OpenWeatherMap,
    #[serde(rename = "Alpha Vantage")]
    AlphaVantage,
    #[serde(rename = "OpenStreetMap Nominatim")]
    Nominatim,
    #[serde(rename = "NASA Earthdata")]
    NasaEarthdata,
    #[serde(rename = "Google Gemini")]
    Gemini,
    #[serde(rename = "ElevenLabs")]
    ElevenLabs,
    #[serde(rename = "Demo Data (simulated)")]
    Demo,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::SoilGrids => "SoilGrids (ISRIC)",
            DataSource::OpenWeatherMap => "OpenWeatherMap",
            DataSource::AlphaVantage => "Alpha Vantage",
            DataSource::Nominatim => "OpenStreetMap Nominatim",
            DataSource::NasaEarthdata => "NASA Earthdata",
            DataSource::Gemini => "Google Gemini",
            DataSource::ElevenLabs => "ElevenLabs",
            DataSource::Demo => "Demo Data (simulated)",
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, DataSource::Demo)
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_source_label_mentions_demo() {
        assert!(DataSource::Demo.label().contains("Demo"));
        assert!(DataSource::Demo.is_demo());
        assert!(!DataSource::SoilGrids.is_demo());
    }

    #[test]
    fn coordinates_validity() {
        assert!(GpsCoordinates::new(28.61, 77.21).is_valid());
        assert!(!GpsCoordinates::new(91.0, 77.21).is_valid());
        assert!(!GpsCoordinates::new(28.61, -181.0).is_valid());
    }
}

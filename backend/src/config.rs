//! Configuration management for the Krishi dashboard server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRI_ prefix
//!
//! Integrations without a key (or with the key `demo`) are left
//! unconfigured and their panels are served from the simulator.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Demo data simulator
    pub simulation: SimulationConfig,

    /// SoilGrids REST API
    pub soilgrids: SoilGridsConfig,

    /// OpenWeatherMap API
    pub weather: WeatherConfig,

    /// Alpha Vantage commodity prices
    pub market: MarketConfig,

    /// Nominatim geocoding
    pub geocoding: GeocodingConfig,

    /// NASA Earthdata CMR search
    pub earthdata: EarthdataConfig,

    /// Google Gemini
    pub gemini: GeminiConfig,

    /// ElevenLabs text to speech
    pub elevenlabs: ElevenLabsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Seconds between sensor cache ticks
    pub tick_interval_secs: u64,

    /// Readings kept per field
    pub history_capacity: usize,

    /// Fields tracked at once; the oldest is dropped past this
    pub max_fields: usize,

    /// Artificial delay before demo responses, milliseconds
    pub latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilGridsConfig {
    pub enabled: bool,
    pub api_endpoint: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WeatherConfig {
    pub api_endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MarketConfig {
    pub api_endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    pub enabled: bool,
    pub api_endpoint: String,
    /// Nominatim rejects requests without an identifying User-Agent
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EarthdataConfig {
    pub api_endpoint: String,
    pub token: String,
    /// CMR collection short name
    pub collection: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeminiConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ElevenLabsConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub voice_id_hindi: String,
    pub voice_id_english: String,
}

/// Whether a key is present and not the demo placeholder
pub fn is_configured(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !key.eq_ignore_ascii_case("demo")
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("simulation.tick_interval_secs", 5)?
            .set_default("simulation.history_capacity", 50)?
            .set_default("simulation.max_fields", 500)?
            .set_default("simulation.latency_ms", 300)?
            .set_default("soilgrids.enabled", true)?
            .set_default(
                "soilgrids.api_endpoint",
                "https://rest.isric.org/soilgrids/v2.0",
            )?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("market.api_endpoint", "https://www.alphavantage.co/query")?
            .set_default("market.api_key", "")?
            .set_default("geocoding.enabled", true)?
            .set_default("geocoding.api_endpoint", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "krishi-dashboard/0.1 (support@krishi.example)")?
            .set_default("earthdata.api_endpoint", "https://cmr.earthdata.nasa.gov/search")?
            .set_default("earthdata.token", "")?
            .set_default("earthdata.collection", "MOD13Q1")?
            .set_default(
                "gemini.api_endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.api_key", "")?
            .set_default("gemini.model", "gemini-1.5-flash")?
            .set_default("elevenlabs.api_endpoint", "https://api.elevenlabs.io/v1")?
            .set_default("elevenlabs.api_key", "")?
            .set_default("elevenlabs.voice_id_hindi", "")?
            .set_default("elevenlabs.voice_id_english", "")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 5,
            history_capacity: 50,
            max_fields: 500,
            latency_ms: 0,
        }
    }
}

impl Default for SoilGridsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_endpoint: "https://rest.isric.org/soilgrids/v2.0".to_string(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "krishi-dashboard/0.1".to_string(),
        }
    }
}

//! External API integrations
//!
//! Every client here is optional. Services hold an `Option<Client>` and fall
//! back to generated data when a client is missing or a call fails.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::{is_configured, Config};
use crate::error::{AppError, AppResult};

pub mod earthdata;
pub mod elevenlabs;
pub mod gemini;
pub mod geocoding;
pub mod market;
pub mod soilgrids;
pub mod weather;

pub use earthdata::EarthdataClient;
pub use elevenlabs::ElevenLabsClient;
pub use gemini::GeminiClient;
pub use geocoding::NominatimClient;
pub use market::AlphaVantageClient;
pub use soilgrids::SoilGridsClient;
pub use weather::WeatherClient;

/// Request timeout for every upstream call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build an HTTP client with the shared timeout
pub fn build_http_client(user_agent: Option<&str>) -> AppResult<Client> {
    let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent.to_string());
    }
    builder
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Check the status and decode a JSON body
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    service: &str,
) -> AppResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalService(format!(
            "{} API error: {} - {}",
            service, status, body
        )));
    }

    response.json().await.map_err(|e| {
        AppError::ExternalService(format!("Failed to parse {} response: {}", service, e))
    })
}

/// All configured upstream clients
#[derive(Clone, Default)]
pub struct Integrations {
    pub soilgrids: Option<SoilGridsClient>,
    pub weather: Option<WeatherClient>,
    pub market: Option<AlphaVantageClient>,
    pub geocoding: Option<NominatimClient>,
    pub earthdata: Option<EarthdataClient>,
    pub gemini: Option<GeminiClient>,
    pub elevenlabs: Option<ElevenLabsClient>,
}

impl Integrations {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = build_http_client(None)?;

        let soilgrids = config
            .soilgrids
            .enabled
            .then(|| SoilGridsClient::new(http.clone(), config.soilgrids.api_endpoint.clone()));

        let weather = is_configured(&config.weather.api_key).then(|| {
            WeatherClient::with_base_url(
                http.clone(),
                config.weather.api_key.clone(),
                config.weather.api_endpoint.clone(),
            )
        });

        let market = is_configured(&config.market.api_key).then(|| {
            AlphaVantageClient::new(
                http.clone(),
                config.market.api_endpoint.clone(),
                config.market.api_key.clone(),
            )
        });

        let geocoding = if config.geocoding.enabled {
            let client = build_http_client(Some(&config.geocoding.user_agent))?;
            Some(NominatimClient::new(client, config.geocoding.api_endpoint.clone()))
        } else {
            None
        };

        let earthdata = is_configured(&config.earthdata.token).then(|| {
            EarthdataClient::new(
                http.clone(),
                config.earthdata.api_endpoint.clone(),
                config.earthdata.token.clone(),
                config.earthdata.collection.clone(),
            )
        });

        let gemini = is_configured(&config.gemini.api_key).then(|| {
            GeminiClient::new(
                http.clone(),
                config.gemini.api_endpoint.clone(),
                config.gemini.api_key.clone(),
                config.gemini.model.clone(),
            )
        });

        let elevenlabs = is_configured(&config.elevenlabs.api_key).then(|| {
            ElevenLabsClient::new(
                http.clone(),
                config.elevenlabs.api_endpoint.clone(),
                config.elevenlabs.api_key.clone(),
                config.elevenlabs.voice_id_hindi.clone(),
                config.elevenlabs.voice_id_english.clone(),
            )
        });

        let integrations = Self {
            soilgrids,
            weather,
            market,
            geocoding,
            earthdata,
            gemini,
            elevenlabs,
        };
        integrations.log_status();
        Ok(integrations)
    }

    fn log_status(&self) {
        let status = |configured: bool| if configured { "live" } else { "demo" };
        tracing::info!(
            soilgrids = status(self.soilgrids.is_some()),
            weather = status(self.weather.is_some()),
            market = status(self.market.is_some()),
            geocoding = status(self.geocoding.is_some()),
            earthdata = status(self.earthdata.is_some()),
            gemini = status(self.gemini.is_some()),
            elevenlabs = status(self.elevenlabs.is_some()),
            "Integrations configured"
        );
    }
}

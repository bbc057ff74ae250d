//! Krishi Dashboard - Backend Server
//!
//! Serves the farm dashboard panels (soil, weather, crop stage, disease and
//! pest, market, satellite) from live agricultural APIs where configured and
//! from the season-aware simulator everywhere else.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::Integrations;
use services::{
    CropStageService, DashboardService, DemoService, DiagnosisService, DiseasePestService,
    LocationService, MarketService, SatelliteService, SoilService, VoiceService, WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub integrations: Integrations,
    pub demo: Arc<DemoService>,
}

impl AppState {
    pub fn new(config: Config, integrations: Integrations) -> Self {
        let demo = Arc::new(DemoService::from_config(&config.simulation));
        Self {
            config: Arc::new(config),
            integrations,
            demo,
        }
    }

    pub fn soil_service(&self) -> SoilService {
        SoilService::new(self.integrations.soilgrids.clone(), self.demo.clone())
    }

    pub fn weather_service(&self) -> WeatherService {
        WeatherService::new(self.integrations.weather.clone(), self.demo.clone())
    }

    pub fn crop_stage_service(&self) -> CropStageService {
        CropStageService::new(self.demo.clone())
    }

    pub fn disease_pest_service(&self) -> DiseasePestService {
        DiseasePestService::new(self.demo.clone())
    }

    pub fn satellite_service(&self) -> SatelliteService {
        SatelliteService::new(self.integrations.earthdata.clone(), self.demo.clone())
    }

    pub fn market_service(&self) -> MarketService {
        MarketService::new(
            self.integrations.market.clone(),
            self.integrations.gemini.clone(),
            self.demo.clone(),
        )
    }

    pub fn diagnosis_service(&self) -> DiagnosisService {
        DiagnosisService::new(self.integrations.gemini.clone(), self.demo.clone())
    }

    pub fn location_service(&self) -> LocationService {
        LocationService::new(self.integrations.geocoding.clone(), self.demo.clone())
    }

    pub fn voice_service(&self) -> VoiceService {
        VoiceService::new(
            self.integrations.gemini.clone(),
            self.integrations.elevenlabs.clone(),
            self.demo.clone(),
        )
    }

    pub fn dashboard_service(&self) -> DashboardService {
        DashboardService {
            soil: self.soil_service(),
            weather: self.weather_service(),
            crop_stage: self.crop_stage_service(),
            disease_pest: self.disease_pest_service(),
            satellite: self.satellite_service(),
            demo: self.demo.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Krishi Dashboard Server");
    tracing::info!("Environment: {}", config.environment);

    let integrations = Integrations::from_config(&config)?;
    let state = AppState::new(config.clone(), integrations);

    // Sensor simulation runs until shutdown
    let simulation = state.demo.start_simulation(Duration::from_secs(
        config.simulation.tick_interval_secs.max(1),
    ));

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    simulation.stop().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Krishi Dashboard API v1"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn state_with(config: Config) -> AppState {
        let integrations = Integrations::from_config(&config).unwrap();
        AppState::new(config, integrations)
    }

    fn app() -> Router {
        create_app(state_with(Config::default()))
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn diagnosis_body(image_bytes: usize) -> String {
        use base64::Engine;
        let image = base64::engine::general_purpose::STANDARD.encode(vec![0u8; image_bytes]);
        serde_json::json!({
            "crop": "Wheat",
            "image_base64": image,
            "mime_type": "image/jpeg",
        })
        .to_string()
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["integrations"]["weather"], false);
    }

    #[tokio::test]
    async fn test_season_endpoint() {
        let (status, body) = get_json("/api/v1/season?date=2024-11-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["season"], "kharif");
    }

    #[tokio::test]
    async fn test_soil_panel_is_wrapped_demo_data() {
        let (status, body) = get_json("/api/v1/fields/field-7/soil?lat=28.6&lon=77.2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "Demo Data (simulated)");
        assert!(body["generated_at"].is_string());
        assert!(body["season"].is_string());
        assert_eq!(body["data"]["field_id"], "field-7");
    }

    #[tokio::test]
    async fn test_bad_coordinates_rejected() {
        let (status, body) = get_json("/api/v1/weather?lat=120&lon=77.2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message_hi"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_commodity_is_not_found() {
        let (status, body) = get_json("/api/v1/market/quotes?commodities=wheat,saffron").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_COMMODITY");
    }

    #[tokio::test]
    async fn test_sensor_csv_export() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/fields/field-7/sensors?format=csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("field_id,timestamp"));
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_voice_query() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/voice/query")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text": "मंडी भाव क्या है?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["language"], "hindi");
        assert!(json["data"].get("audio_base64").is_none());
    }

    #[tokio::test]
    async fn test_diagnosis_accepts_three_megabyte_image() {
        let (status, body) = post_json("/api/v1/diagnosis", diagnosis_body(3 * 1024 * 1024)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "Demo Data (simulated)");
        assert_eq!(body["data"]["crop"], "wheat");
    }

    #[tokio::test]
    async fn test_oversized_image_gets_error_envelope() {
        let size = services::diagnosis::MAX_IMAGE_BYTES + 1024;
        let (status, body) = post_json("/api/v1/diagnosis", diagnosis_body(size)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "image_base64");
    }

    #[tokio::test]
    async fn test_tracked_fields_are_capped() {
        let mut config = Config::default();
        config.simulation.max_fields = 5;
        let state = state_with(config);
        let app = create_app(state.clone());

        for i in 0..8 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/api/v1/fields/f{}/sensors", i))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(state.demo.field_count().await, 5);
    }
}

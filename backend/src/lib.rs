//! KrishiMitra gateway
//!
//! A thin HTTP gateway for the KrishiMitra farmer app. Each endpoint forwards
//! to one third-party service (OpenWeatherMap, data.gov.in mandi prices,
//! Tesseract OCR, a chat completion API) and reshapes the answer.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{
    CompletionClient, MandiClient, MandiPriceSource, OpenAiClient, TesseractOcr, TextExtractor,
    WeatherClient, WeatherProvider,
};

/// Application state shared across handlers
///
/// Upstream integrations are trait objects so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: Arc<dyn WeatherProvider>,
    pub mandi: Arc<dyn MandiPriceSource>,
    pub ocr: Arc<dyn TextExtractor>,
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    /// Build state with the real upstream clients
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let weather = Arc::new(WeatherClient::new(&config.weather));
        let mandi = Arc::new(MandiClient::new(&config.mandi)?);
        let ocr = Arc::new(TesseractOcr::new(&config.ocr));
        let llm = Arc::new(OpenAiClient::new(&config.llm));

        for (name, configured) in [
            ("weather", config.weather.api_key.is_some()),
            ("mandi", config.mandi.api_key.is_some()),
            ("llm", config.llm.api_key.is_some()),
        ] {
            if !configured {
                tracing::warn!("No {} API key configured; those endpoints will return 500", name);
            }
        }

        Ok(Self {
            config: Arc::new(config),
            weather,
            mandi,
            ocr,
            llm,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // The browser client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes(state.config.ocr.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

//! Route definitions for the KrishiMitra gateway

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // Weather (OpenWeatherMap)
        .nest("/weather", weather_routes())
        .route("/forecast/:city", get(handlers::get_forecast))
        // Mandi prices (data.gov.in)
        .route("/mandi-prices", get(handlers::get_mandi_prices))
        // Soil profile and report OCR
        .nest("/soil", soil_routes(max_upload_bytes))
        // Crop recommendation (weather + language model)
        .route("/recommend-crop", post(handlers::recommend_crop))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_weather_by_coordinates))
        .route("/:city", get(handlers::get_weather))
        .route("/:city/advisory", get(handlers::get_weather_advisory))
}

/// Soil routes
fn soil_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_soil_profile))
        .route(
            "/upload-image",
            get(handlers::upload_notice)
                .post(handlers::upload_soil_report)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

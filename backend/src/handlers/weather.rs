//! HTTP handlers for weather endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use shared::WeatherForecast;

use crate::error::{AppError, AppResult};
use crate::services::weather::{CityAdvisory, WeatherService};
use crate::AppState;

/// Current weather for a city, passed through from the provider
pub async fn get_weather(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Value>> {
    let Path(city) = city?;
    let service = WeatherService::new(state.weather);
    let payload = service.current_by_city(&city).await?;
    Ok(Json(payload))
}

/// Query parameters for weather by coordinates
#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Current weather for a coordinate pair, passed through from the provider
pub async fn get_weather_by_coordinates(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> AppResult<Json<Value>> {
    let Query(query) = query?;
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(AppError::validation("Please provide lat and lon"));
    };

    let service = WeatherService::new(state.weather);
    let payload = service.current_by_coordinates(lat, lon).await?;
    Ok(Json(payload))
}

/// Query parameters for the daily forecast
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<usize>,
}

/// Daily forecast for a city
pub async fn get_forecast(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> AppResult<Json<WeatherForecast>> {
    let Path(city) = city?;
    let Query(query) = query?;
    let service = WeatherService::new(state.weather);
    let forecast = service.forecast(&city, query.days).await?;
    Ok(Json(forecast))
}

/// Current weather for a city with the farming advisory
pub async fn get_weather_advisory(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
) -> AppResult<Json<CityAdvisory>> {
    let Path(city) = city?;
    let service = WeatherService::new(state.weather);
    let advisory = service.advisory(&city).await?;
    Ok(Json(advisory))
}

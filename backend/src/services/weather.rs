//! Weather service: current conditions, daily forecasts and field advisories

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shared::{validate_city, validate_coordinates, WeatherAdvisory, WeatherForecast, WeatherSnapshot};

use crate::error::{AppError, AppResult};
use crate::external::weather::{parse_current, parse_forecast, WeatherProvider};

/// Days returned when the caller does not ask for a number
pub const DEFAULT_FORECAST_DAYS: usize = 3;
/// The provider's free forecast covers five days
pub const MAX_FORECAST_DAYS: usize = 5;

/// Current conditions for a city with the matching advisory
#[derive(Debug, Clone, Serialize)]
pub struct CityAdvisory {
    pub city: String,
    pub snapshot: WeatherSnapshot,
    pub advisory: WeatherAdvisory,
}

/// Weather service wrapping the injected provider
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Current weather for a city, exactly as the provider returned it
    pub async fn current_by_city(&self, city: &str) -> AppResult<Value> {
        let city = validate_city(city).map_err(AppError::validation)?;
        self.provider.current_by_city(city).await
    }

    /// Current weather for a coordinate pair, exactly as the provider returned it
    pub async fn current_by_coordinates(&self, latitude: f64, longitude: f64) -> AppResult<Value> {
        let coordinates = validate_coordinates(latitude, longitude).map_err(AppError::validation)?;
        self.provider.current_by_coordinates(coordinates).await
    }

    /// Typed snapshot of the current weather in a city
    pub async fn snapshot(&self, city: &str) -> AppResult<WeatherSnapshot> {
        let payload = self.current_by_city(city).await?;
        parse_current(&payload)
    }

    /// Daily forecast for a city
    pub async fn forecast(&self, city: &str, days: Option<usize>) -> AppResult<WeatherForecast> {
        let city = validate_city(city).map_err(AppError::validation)?;
        let days = days.unwrap_or(DEFAULT_FORECAST_DAYS);
        if days == 0 || days > MAX_FORECAST_DAYS {
            return Err(AppError::validation(format!(
                "days must be between 1 and {}",
                MAX_FORECAST_DAYS
            )));
        }

        let payload = self.provider.forecast_by_city(city).await?;
        parse_forecast(&payload, days)
    }

    /// Current weather for a city classified into a farming advisory
    pub async fn advisory(&self, city: &str) -> AppResult<CityAdvisory> {
        let snapshot = self.snapshot(city).await?;
        let advisory = snapshot.advisory();
        tracing::debug!(city, category = %advisory.category, "Weather advisory");

        Ok(CityAdvisory {
            city: city.trim().to_string(),
            snapshot,
            advisory,
        })
    }
}

//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and forecasts. The
//! raw provider JSON is returned as-is so the gateway can pass it through;
//! [`parse_current`] and [`parse_forecast`] turn it into shared models when a
//! handler needs typed values.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use shared::{mps_to_kmh, DailyForecast, GpsCoordinates, WeatherForecast, WeatherSnapshot};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "Weather API";

/// Source of weather data
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fail early when the provider cannot be called at all
    fn ensure_configured(&self) -> AppResult<()> {
        Ok(())
    }

    /// Current conditions for a city name
    async fn current_by_city(&self, city: &str) -> AppResult<Value>;

    /// Current conditions for a coordinate pair
    async fn current_by_coordinates(&self, coordinates: GpsCoordinates) -> AppResult<Value>;

    /// 5-day forecast in 3-hour steps for a city name
    async fn forecast_by_city(&self, city: &str) -> AppResult<Value>;
}

/// OpenWeatherMap client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("WEATHER_API_KEY missing".to_string()))
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> AppResult<Value> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "Fetching weather");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(SERVICE, format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("Failed to parse weather response: {}", e)))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    fn ensure_configured(&self) -> AppResult<()> {
        self.api_key().map(|_| ())
    }

    async fn current_by_city(&self, city: &str) -> AppResult<Value> {
        self.get("weather", &[("q", city.to_string())]).await
    }

    async fn current_by_coordinates(&self, coordinates: GpsCoordinates) -> AppResult<Value> {
        self.get(
            "weather",
            &[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
            ],
        )
        .await
    }

    async fn forecast_by_city(&self, city: &str) -> AppResult<Value> {
        self.get("forecast", &[("q", city.to_string())]).await
    }
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    name: String,
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    #[serde(default)]
    pop: f64,
}

/// Convert an OpenWeatherMap current-weather payload to a snapshot
pub fn parse_current(payload: &Value) -> AppResult<WeatherSnapshot> {
    let data = OWMCurrentResponse::deserialize(payload)
        .map_err(|e| AppError::upstream(SERVICE, format!("Unexpected weather payload: {}", e)))?;
    let weather = data.weather.first();

    Ok(WeatherSnapshot {
        location: data.name,
        temperature_celsius: data.main.temp,
        feels_like_celsius: data.main.feels_like,
        humidity_percent: data.main.humidity,
        wind_speed_kmh: mps_to_kmh(data.wind.speed),
        condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
    })
}

#[derive(Default)]
struct DayAccumulator {
    high: Option<f64>,
    low: Option<f64>,
    pop: f64,
    conditions: Vec<(String, usize)>,
}

impl DayAccumulator {
    fn add(&mut self, item: &OWMForecastItem) {
        self.high = Some(self.high.map_or(item.main.temp_max, |h| h.max(item.main.temp_max)));
        self.low = Some(self.low.map_or(item.main.temp_min, |l| l.min(item.main.temp_min)));
        self.pop = self.pop.max(item.pop);

        if let Some(weather) = item.weather.first() {
            match self.conditions.iter_mut().find(|(c, _)| *c == weather.main) {
                Some((_, count)) => *count += 1,
                None => self.conditions.push((weather.main.clone(), 1)),
            }
        }
    }

    fn finish(self, date: NaiveDate) -> DailyForecast {
        // Ties go to the condition seen first in the day
        let condition = self
            .conditions
            .iter()
            .fold(None::<&(String, usize)>, |best, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
            .map(|(c, _)| c.clone())
            .unwrap_or_default();

        DailyForecast {
            date,
            high_celsius: self.high.unwrap_or_default(),
            low_celsius: self.low.unwrap_or_default(),
            condition,
            precipitation_probability: (self.pop * 100.0).round() as i32,
        }
    }
}

/// Fold a 3-hourly OpenWeatherMap forecast into at most `days` daily entries
pub fn parse_forecast(payload: &Value, days: usize) -> AppResult<WeatherForecast> {
    let data = OWMForecastResponse::deserialize(payload)
        .map_err(|e| AppError::upstream(SERVICE, format!("Unexpected forecast payload: {}", e)))?;

    let mut by_day: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for item in &data.list {
        // Group by the city's local calendar day
        let Some(local) = DateTime::from_timestamp(item.dt + data.city.timezone, 0) else {
            continue;
        };
        by_day.entry(local.date_naive()).or_default().add(item);
    }

    Ok(WeatherForecast {
        city: data.city.name,
        days: by_day
            .into_iter()
            .take(days)
            .map(|(date, acc)| acc.finish(date))
            .collect(),
    })
}

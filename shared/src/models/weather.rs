//! Weather snapshot, forecast and advisory models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wind speed above which field work is dangerous (km/h)
pub const DANGER_WIND_KMH: f64 = 50.0;
/// Temperature above which a heat warning is issued (°C)
pub const HEAT_WARNING_CELSIUS: f64 = 35.0;
/// Temperature below which frost damage is likely (°C)
pub const COLD_WARNING_CELSIUS: f64 = 5.0;
/// Humidity above which fungal disease pressure is high (%)
pub const HIGH_HUMIDITY_PERCENT: f64 = 85.0;

/// Current conditions for a location, already converted to display units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub humidity_percent: i32,
    pub wind_speed_kmh: f64,
    pub condition: String,
    pub description: String,
}

impl WeatherSnapshot {
    /// Classify this snapshot with the advisory table
    pub fn advisory(&self) -> WeatherAdvisory {
        classify_advisory(
            &self.condition,
            self.temperature_celsius,
            self.wind_speed_kmh,
            f64::from(self.humidity_percent),
        )
    }
}

/// One day of a multi-day forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high_celsius: f64,
    pub low_celsius: f64,
    /// Most frequent condition over the day's forecast slots
    pub condition: String,
    /// Highest probability of precipitation over the day (0-100)
    pub precipitation_probability: i32,
}

/// Multi-day forecast for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub city: String,
    pub days: Vec<DailyForecast>,
}

/// Advisory categories shown next to the weather widget
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCategory {
    Danger,
    HeatWarning,
    ColdWarning,
    RainAdvisory,
    HumidityAdvisory,
    Ideal,
    General,
}

impl std::fmt::Display for AdvisoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisoryCategory::Danger => write!(f, "Danger"),
            AdvisoryCategory::HeatWarning => write!(f, "Heat Warning"),
            AdvisoryCategory::ColdWarning => write!(f, "Cold Warning"),
            AdvisoryCategory::RainAdvisory => write!(f, "Rain Advisory"),
            AdvisoryCategory::HumidityAdvisory => write!(f, "Humidity Advisory"),
            AdvisoryCategory::Ideal => write!(f, "Ideal Conditions"),
            AdvisoryCategory::General => write!(f, "General"),
        }
    }
}

/// Farming advice derived from current conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeatherAdvisory {
    pub category: AdvisoryCategory,
    pub message: String,
}

impl WeatherAdvisory {
    fn new(category: AdvisoryCategory, message: &str) -> Self {
        Self {
            category,
            message: message.to_string(),
        }
    }
}

fn is_storm(condition: &str) -> bool {
    ["thunder", "storm", "tornado", "squall"]
        .iter()
        .any(|c| condition.contains(c))
}

fn is_wet(condition: &str) -> bool {
    ["rain", "drizzle", "shower"]
        .iter()
        .any(|c| condition.contains(c))
}

/// Classify weather into an advisory. Rules are checked in order and the
/// first match wins, so high wind is always `Danger`.
pub fn classify_advisory(
    condition: &str,
    temperature_celsius: f64,
    wind_speed_kmh: f64,
    humidity_percent: f64,
) -> WeatherAdvisory {
    let condition = condition.to_lowercase();

    if wind_speed_kmh > DANGER_WIND_KMH {
        return WeatherAdvisory::new(
            AdvisoryCategory::Danger,
            "High winds: avoid spraying and secure sheds, nets and young plants.",
        );
    }
    if is_storm(&condition) {
        return WeatherAdvisory::new(
            AdvisoryCategory::Danger,
            "Storm conditions: stay out of open fields and protect livestock.",
        );
    }
    if temperature_celsius > HEAT_WARNING_CELSIUS {
        return WeatherAdvisory::new(
            AdvisoryCategory::HeatWarning,
            "Heat warning: irrigate in the early morning or evening and provide shade for seedlings.",
        );
    }
    if temperature_celsius < COLD_WARNING_CELSIUS {
        return WeatherAdvisory::new(
            AdvisoryCategory::ColdWarning,
            "Frost risk: cover sensitive crops overnight and apply light irrigation.",
        );
    }
    if is_wet(&condition) {
        return WeatherAdvisory::new(
            AdvisoryCategory::RainAdvisory,
            "Rain expected: postpone fertilizer and pesticide application, check field drainage.",
        );
    }
    if humidity_percent > HIGH_HUMIDITY_PERCENT {
        return WeatherAdvisory::new(
            AdvisoryCategory::HumidityAdvisory,
            "High humidity: watch for fungal disease and improve air circulation.",
        );
    }
    if (20.0..=30.0).contains(&temperature_celsius)
        && (40.0..=70.0).contains(&humidity_percent)
        && wind_speed_kmh < 20.0
    {
        return WeatherAdvisory::new(
            AdvisoryCategory::Ideal,
            "Ideal conditions for sowing, spraying and field work.",
        );
    }

    WeatherAdvisory::new(
        AdvisoryCategory::General,
        "Good weather for field work today. Consider watering crops in the evening.",
    )
}

/// Icon shown for a weather condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sunny,
    Rain,
    Cloudy,
}

/// Map a provider condition ("Clear", "light rain", "overcast clouds") to an icon
pub fn icon_for_condition(condition: &str) -> WeatherIcon {
    let condition = condition.to_lowercase();
    if is_wet(&condition) || is_storm(&condition) {
        WeatherIcon::Rain
    } else if ["cloud", "mist", "fog", "haze", "overcast", "smoke"]
        .iter()
        .any(|c| condition.contains(c))
    {
        WeatherIcon::Cloudy
    } else {
        WeatherIcon::Sunny
    }
}

/// Convert metres per second (provider units) to km/h
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

/// Round a reading to a whole number for display
pub fn round_for_display(value: f64) -> i64 {
    value.round() as i64
}

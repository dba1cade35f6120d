//! HTTP handlers for the KrishiMitra gateway

pub mod crop;
pub mod health;
pub mod mandi;
pub mod soil;
pub mod weather;

pub use crop::recommend_crop;
pub use health::{health_check, root};
pub use mandi::get_mandi_prices;
pub use soil::{get_soil_profile, upload_notice, upload_soil_report};
pub use weather::{get_forecast, get_weather, get_weather_advisory, get_weather_by_coordinates};

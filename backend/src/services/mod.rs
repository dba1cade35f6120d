//! Gateway services for KrishiMitra

pub mod crop;
pub mod mandi;
pub mod soil;
pub mod weather;

pub use crop::CropRecommendationService;
pub use mandi::MandiService;
pub use soil::SoilService;
pub use weather::WeatherService;

//! Crop recommendation service
//!
//! Combines soil readings with the current weather for the farmer's city and
//! asks the language model for crop suggestions. The model's reply is passed
//! through as free text.

use std::sync::Arc;

use shared::{CropRecommendation, CropRecommendationRequest, Language, SoilNutrients, WeatherSnapshot};

use crate::error::{AppError, AppResult};
use crate::external::llm::{ChatMessage, CompletionClient};
use crate::external::weather::{parse_current, WeatherProvider};

pub const SYSTEM_PROMPT: &str =
    "You are an agriculture expert. Based on soil nutrients and weather, recommend best crops.";

#[derive(Clone)]
pub struct CropRecommendationService {
    weather: Arc<dyn WeatherProvider>,
    llm: Arc<dyn CompletionClient>,
}

/// Build the user prompt from soil readings and weather
pub fn build_prompt(nutrients: &SoilNutrients, weather: &WeatherSnapshot, language: &Language) -> String {
    let mut prompt = format!(
        "Soil data: pH={}, N={}, P={}, K={}. Weather: {}, Temp={}°C, Humidity={}%. \
         Recommend 3 best crops with short reasons.",
        nutrients.ph,
        nutrients.nitrogen,
        nutrients.phosphorus,
        nutrients.potassium,
        weather.description,
        weather.temperature_celsius,
        weather.humidity_percent,
    );
    if *language != Language::English {
        prompt.push_str(&format!(" Reply in {}.", language.name()));
    }
    prompt
}

impl CropRecommendationService {
    pub fn new(weather: Arc<dyn WeatherProvider>, llm: Arc<dyn CompletionClient>) -> Self {
        Self { weather, llm }
    }

    /// Validate the request, fetch weather, then ask the model
    pub async fn recommend(&self, request: &CropRecommendationRequest) -> AppResult<CropRecommendation> {
        let request = request.validate().map_err(AppError::Validation)?;

        self.weather.ensure_configured()?;
        self.llm.ensure_configured()?;

        let payload = self.weather.current_by_city(&request.city).await?;
        let snapshot = parse_current(&payload)?;

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(&request.nutrients, &snapshot, &request.language)),
        ];
        let recommendation = self.llm.complete(&messages).await?;
        tracing::info!(city = %request.city, "Crop recommendation generated");

        Ok(CropRecommendation { recommendation })
    }
}

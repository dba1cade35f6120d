//! HTTP handler for crop recommendations

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared::{CropRecommendation, CropRecommendationRequest};

use crate::error::AppResult;
use crate::services::CropRecommendationService;
use crate::AppState;

/// Recommend crops from soil readings and local weather
pub async fn recommend_crop(
    State(state): State<AppState>,
    body: Result<Json<CropRecommendationRequest>, JsonRejection>,
) -> AppResult<Json<CropRecommendation>> {
    let Json(request) = body?;
    let service = CropRecommendationService::new(state.weather, state.llm);
    let recommendation = service.recommend(&request).await?;
    Ok(Json(recommendation))
}

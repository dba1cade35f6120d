//! HTTP handlers for mandi price endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use shared::{MandiPriceQuery, MandiPriceResponse};

use crate::error::AppResult;
use crate::services::MandiService;
use crate::AppState;

/// One page of mandi prices matching the filters
pub async fn get_mandi_prices(
    State(state): State<AppState>,
    query: Result<Query<MandiPriceQuery>, QueryRejection>,
) -> AppResult<Json<MandiPriceResponse>> {
    let Query(query) = query?;
    let service = MandiService::new(state.mandi, state.config.mandi.default_limit);
    let prices = service.get_prices(&query).await?;
    Ok(Json(prices))
}

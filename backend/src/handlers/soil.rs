//! HTTP handlers for soil endpoints

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection, Multipart, Query, State,
    },
    Json,
};
use serde::Deserialize;
use shared::{SoilProfile, SoilReportText};

use crate::error::{AppError, AppResult};
use crate::services::SoilService;
use crate::AppState;

/// Multipart field carrying the soil report
pub const REPORT_FIELD: &str = "report";

#[derive(Debug, Deserialize)]
pub struct SoilQuery {
    pub state: Option<String>,
    pub district: Option<String>,
}

/// Reference soil profile for a district
pub async fn get_soil_profile(
    query: Result<Query<SoilQuery>, QueryRejection>,
) -> AppResult<Json<SoilProfile>> {
    let Query(query) = query?;
    let profile =
        SoilService::reference_profile(query.state.as_deref(), query.district.as_deref())?;
    Ok(Json(profile))
}

/// Browser-friendly notice for the upload endpoint
pub async fn upload_notice() -> &'static str {
    "Soil upload endpoint is live. Send a POST with a multipart 'report' file to extract text."
}

/// Extract text from an uploaded soil report
pub async fn upload_soil_report(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SoilReportText>> {
    let mut multipart = multipart?;

    let mut report = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(REPORT_FIELD) {
            report = Some(field.bytes().await?);
            break;
        }
    }
    let report = report.ok_or_else(|| AppError::validation("No file uploaded"))?;

    let service = SoilService::new(state.ocr, &state.config.ocr.upload_dir);
    let text = service.extract_report(&report).await?;
    Ok(Json(text))
}

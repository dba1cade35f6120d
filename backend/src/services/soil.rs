//! Soil service: reference profiles and soil report text extraction

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::{missing_fields, SoilProfile, SoilReportText};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::ocr::TextExtractor;

/// An uploaded file on disk that is removed when the guard goes away
///
/// Call [`remove`](Self::remove) on the normal path; if the guard is dropped
/// early (error, panic, cancelled request) the file is removed synchronously.
pub struct TempUpload {
    path: PathBuf,
    removed: bool,
}

impl TempUpload {
    /// Write `bytes` to a uniquely named file inside `dir`
    pub async fn create(dir: &Path, bytes: &[u8]) -> AppResult<Self> {
        let upload = Self::claim(dir).await?;
        upload.write(bytes).await?;
        Ok(upload)
    }

    /// Reserve a unique path in `dir`. The guard owns it before anything is
    /// written, so a partial file is removed if the write fails.
    async fn claim(dir: &Path) -> AppResult<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Processing(format!("Cannot create upload directory: {}", e)))?;

        Ok(Self {
            path: dir.join(Uuid::new_v4().to_string()),
            removed: false,
        })
    }

    async fn write(&self, bytes: &[u8]) -> AppResult<()> {
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::Processing(format!("Cannot store upload: {}", e)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now
    pub async fn remove(mut self) {
        self.removed = true;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove upload");
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if !self.removed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[derive(Clone)]
pub struct SoilService {
    extractor: Arc<dyn TextExtractor>,
    upload_dir: PathBuf,
}

impl SoilService {
    pub fn new(extractor: Arc<dyn TextExtractor>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor,
            upload_dir: upload_dir.into(),
        }
    }

    /// Reference soil profile for a state and district
    pub fn reference_profile(state: Option<&str>, district: Option<&str>) -> AppResult<SoilProfile> {
        let missing = missing_fields(&[("state", state), ("district", district)]);
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Please provide {}",
                missing.join(" and ")
            )));
        }

        Ok(SoilProfile::reference(
            state.unwrap_or_default().trim(),
            district.unwrap_or_default().trim(),
        ))
    }

    /// Run OCR over an uploaded soil report. The stored copy is deleted
    /// whether or not extraction succeeds.
    pub async fn extract_report(&self, bytes: &[u8]) -> AppResult<SoilReportText> {
        if bytes.is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }

        let upload = TempUpload::create(&self.upload_dir, bytes).await?;
        tracing::info!(path = %upload.path().display(), size = bytes.len(), "Running OCR on soil report");

        let result = self.extractor.extract_text(upload.path()).await;
        upload.remove().await;

        let raw_text = result?;
        Ok(SoilReportText {
            raw_text,
            message: "Soil report text extracted successfully".to_string(),
        })
    }
}

//! OCR text extraction
//!
//! Runs the `tesseract` command line engine on a file and reads the
//! recognised text from stdout.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::OcrConfig;
use crate::error::{AppError, AppResult};

/// Extracts plain text from an image or scanned document
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> AppResult<String>;
}

/// Tesseract CLI wrapper
#[derive(Clone)]
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            language: config.language.clone(),
        }
    }
}

#[async_trait]
impl TextExtractor for TesseractOcr {
    async fn extract_text(&self, path: &Path) -> AppResult<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AppError::Processing(format!("Failed to start OCR engine: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = %output.status, %stderr, "OCR engine failed");
            return Err(AppError::Processing("OCR failed".to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

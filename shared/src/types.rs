//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "or")]
    Odia,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "hry")]
    Haryanvi,
    #[serde(rename = "bn")]
    Bengali,
}

/// Languages offered in the app's language picker
pub const SUPPORTED_LANGUAGES: [Language; 6] = [
    Language::English,
    Language::Hindi,
    Language::Odia,
    Language::Punjabi,
    Language::Haryanvi,
    Language::Bengali,
];

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Odia => "or",
            Language::Punjabi => "pa",
            Language::Haryanvi => "hry",
            Language::Bengali => "bn",
        }
    }

    /// English name of the language, as used in prompts
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Odia => "Odia",
            Language::Punjabi => "Punjabi",
            Language::Haryanvi => "Haryanvi",
            Language::Bengali => "Bengali",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "hi" => Some(Language::Hindi),
            "or" => Some(Language::Odia),
            "pa" => Some(Language::Punjabi),
            "hry" => Some(Language::Haryanvi),
            "bn" => Some(Language::Bengali),
            _ => None,
        }
    }
}

//! Configuration management for the KrishiMitra gateway
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with KM__ prefix
//! 4. The plain variable names older deployments use (PORT, DATA_GOV_API_KEY, ...)
//!
//! Upstream credentials are optional here. A missing key is reported per
//! request as a configuration error instead of stopping the server.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// OpenWeatherMap configuration
    pub weather: WeatherConfig,

    /// data.gov.in mandi price configuration
    pub mandi: MandiConfig,

    /// Chat completion API configuration
    pub llm: LlmConfig,

    /// OCR and upload handling
    pub ocr: OcrConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub base_url: String,

    /// Weather API key
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MandiConfig {
    /// Open government data API endpoint
    pub base_url: String,

    /// Resource holding daily commodity prices
    pub resource_id: String,

    /// data.gov.in API key
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size when the caller sends no limit
    pub default_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API endpoint
    pub base_url: String,

    /// Model used for crop recommendations
    pub model: String,

    /// API key
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// Tesseract executable
    pub binary: String,

    /// Tesseract language pack
    pub language: String,

    /// Directory for temporary uploads
    pub upload_dir: String,

    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("KM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default("mandi.base_url", "https://api.data.gov.in/resource")?
            .set_default("mandi.resource_id", "9ef84268-d588-465a-a308-a864a43d0070")?
            .set_default("mandi.timeout_secs", 15)?
            .set_default("mandi.default_limit", i64::from(shared::MANDI_DEFAULT_LIMIT))?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("ocr.binary", "tesseract")?
            .set_default("ocr.language", "eng")?
            .set_default("ocr.upload_dir", "uploads")?
            .set_default("ocr.max_upload_bytes", 10 * 1024 * 1024)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KM__ prefix)
            .add_source(
                Environment::with_prefix("KM")
                    .separator("__")
                    .try_parsing(true),
            )
            // Legacy variable names from the .env files already in use
            .set_override_option("server.port", env_var("PORT"))?
            .set_override_option(
                "weather.api_key",
                env_var("VITE_OPENWEATHER_API_KEY").or_else(|| env_var("OPENWEATHER_API_KEY")),
            )?
            .set_override_option("mandi.api_key", env_var("DATA_GOV_API_KEY"))?
            .set_override_option("llm.api_key", env_var("OPENAI_API_KEY"))?
            .build()?;

        config.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Test fixture: public endpoints, no credentials, uploads under the
    /// system temp directory
    #[doc(hidden)]
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig {
                base_url: "https://api.openweathermap.org/data/2.5".to_string(),
                api_key: None,
            },
            mandi: MandiConfig {
                base_url: "https://api.data.gov.in/resource".to_string(),
                resource_id: "9ef84268-d588-465a-a308-a864a43d0070".to_string(),
                api_key: None,
                timeout_secs: 15,
                default_limit: shared::MANDI_DEFAULT_LIMIT,
            },
            llm: LlmConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: None,
            },
            ocr: OcrConfig {
                binary: "tesseract".to_string(),
                language: "eng".to_string(),
                upload_dir: std::env::temp_dir()
                    .join("krishimitra-uploads")
                    .to_string_lossy()
                    .into_owned(),
                max_upload_bytes: 10 * 1024 * 1024,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}


//! External API integrations

pub mod llm;
pub mod mandi;
pub mod ocr;
pub mod weather;

pub use llm::{ChatMessage, CompletionClient, OpenAiClient};
pub use mandi::{MandiClient, MandiPriceSource, MandiUpstreamQuery, RawMandiRecord};
pub use ocr::{TesseractOcr, TextExtractor};
pub use weather::{WeatherClient, WeatherProvider};

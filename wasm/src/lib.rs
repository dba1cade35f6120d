//! WebAssembly module for the KrishiMitra farmer app
//!
//! Provides client-side computation for:
//! - Weather advisories, display units and icons
//! - Contact form validation
//! - Mandi price summaries

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("KrishiMitra helpers loaded"));
}

/// Classify current weather into a farming advisory.
/// Returns `{"category": ..., "message": ...}` as JSON.
#[wasm_bindgen]
pub fn weather_advisory(
    condition: &str,
    temperature_celsius: f64,
    wind_speed_kmh: f64,
    humidity_percent: f64,
) -> Result<String, JsValue> {
    let advisory = classify_advisory(condition, temperature_celsius, wind_speed_kmh, humidity_percent);
    serde_json::to_string(&advisory)
        .map_err(|e| JsValue::from_str(&format!("Cannot encode advisory: {}", e)))
}

/// Advisory title for display ("Heat Warning", "Ideal Conditions", ...)
#[wasm_bindgen]
pub fn weather_advisory_title(
    condition: &str,
    temperature_celsius: f64,
    wind_speed_kmh: f64,
    humidity_percent: f64,
) -> String {
    classify_advisory(condition, temperature_celsius, wind_speed_kmh, humidity_percent)
        .category
        .to_string()
}

/// Convert the provider's wind speed (m/s) to km/h
#[wasm_bindgen]
pub fn wind_speed_kmh(mps: f64) -> f64 {
    mps_to_kmh(mps)
}

/// Round a temperature or speed for the widget
#[wasm_bindgen]
pub fn display_value(value: f64) -> f64 {
    round_for_display(value) as f64
}

/// Icon name for a weather condition: "sunny", "rain" or "cloudy"
#[wasm_bindgen]
pub fn weather_icon(condition: &str) -> String {
    match icon_for_condition(condition) {
        WeatherIcon::Sunny => "sunny",
        WeatherIcon::Rain => "rain",
        WeatherIcon::Cloudy => "cloudy",
    }
    .to_string()
}

/// Check an Indian mobile number
#[wasm_bindgen]
pub fn validate_phone(phone: &str) -> bool {
    validate_indian_phone(phone).is_ok()
}

/// Validate the contact form. Returns a JSON array of `{field, message}`;
/// an empty array means the form can be submitted.
#[wasm_bindgen]
pub fn contact_form_errors(form_json: &str) -> Result<String, JsValue> {
    let form: ContactForm = serde_json::from_str(form_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid form JSON: {}", e)))?;

    let errors = validate_contact_form(&form).err().unwrap_or_default();
    serde_json::to_string(&errors).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Summarize a page of mandi records returned by the gateway.
/// Accepts either the full `{count, records}` response or a bare array.
#[wasm_bindgen]
pub fn mandi_price_summary(response_json: &str) -> Result<String, JsValue> {
    let records: Vec<MandiPriceRecord> = match serde_json::from_str::<MandiPriceResponse>(response_json) {
        Ok(page) => page.records,
        Err(_) => serde_json::from_str(response_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid mandi JSON: {}", e)))?,
    };

    serde_json::to_string(&summarize_prices(&records)).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Language codes the app can answer in
#[wasm_bindgen]
pub fn supported_languages() -> js_sys::Array {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| JsValue::from_str(lang.code()))
        .collect()
}

/// English name for a language code, if supported
#[wasm_bindgen]
pub fn language_name(code: &str) -> Option<String> {
    Language::from_code(code).map(|lang| lang.name().to_string())
}

//! Validation utilities for KrishiMitra
//!
//! Includes India-specific validations for contact details.

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

// ============================================================================
// Gateway Input Validations
// ============================================================================

/// Longest city name accepted for weather lookups
pub const MAX_CITY_LENGTH: usize = 100;

/// Validate a city name for weather lookups and return it trimmed
pub fn validate_city(city: &str) -> Result<&str, &'static str> {
    let city = city.trim();
    if city.is_empty() {
        return Err("City is required");
    }
    if city.chars().count() > MAX_CITY_LENGTH {
        return Err("City name is too long");
    }
    Ok(city)
}

/// Validate soil pH is on the 0-14 scale
pub fn validate_ph(ph: f64) -> Result<(), &'static str> {
    if !(0.0..=14.0).contains(&ph) {
        return Err("pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate a coordinate pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<GpsCoordinates, &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(GpsCoordinates::new(latitude, longitude))
}

/// Return the names of required fields that are absent or blank
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map(|v| v.trim().is_empty()).unwrap_or(true))
        .map(|(name, _)| *name)
        .collect()
}

// ============================================================================
// India-Specific Validations
// ============================================================================

/// Validate Indian mobile number format
/// Accepts: 9876543210, 98765-43210, 09876543210, +91 98765 43210
pub fn validate_indian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('0') => &digits[1..],
        12 if digits.starts_with("91") => &digits[2..],
        _ => return Err("Invalid Indian mobile number format"),
    };

    // Mobile numbers start with 6, 7, 8 or 9
    match national.chars().next() {
        Some('6'..='9') => Ok(()),
        _ => Err("Indian mobile numbers start with 6, 7, 8 or 9"),
    }
}

// ============================================================================
// Contact Form
// ============================================================================

/// Feedback submitted from the contact page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub feedback: String,
}

/// A field-level validation failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validate the contact form, collecting every field error
pub fn validate_contact_form(form: &ContactForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "Name is required",
        });
    }
    if let Err(message) = validate_indian_phone(&form.phone) {
        errors.push(FieldError {
            field: "phone",
            message,
        });
    }
    if form.location.trim().is_empty() {
        errors.push(FieldError {
            field: "location",
            message: "Village or district is required",
        });
    }
    if form.feedback.trim().is_empty() {
        errors.push(FieldError {
            field: "feedback",
            message: "Please write your question or feedback",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

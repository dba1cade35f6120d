//! Crop recommendation models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Language;
use crate::validation::validate_ph;

/// Body of a crop recommendation request
///
/// Nutrient values arrive either as JSON numbers or as the strings an HTML
/// form submits, so they are kept loose until [`validate`](Self::validate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropRecommendationRequest {
    pub ph: Option<Value>,
    pub nitrogen: Option<Value>,
    pub phosphorus: Option<Value>,
    pub potassium: Option<Value>,
    pub city: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
}

/// Soil nutrient readings (N, P, K in kg/ha)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilNutrients {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

/// A crop recommendation request with every field present and numeric
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCropRequest {
    pub nutrients: SoilNutrients,
    pub city: String,
    pub language: Language,
}

fn is_blank(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn as_number(field: &str, value: &Option<Value>) -> Result<f64, String> {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("{} must be a number", field))
}

impl CropRecommendationRequest {
    /// Check that all five fields are present and well formed
    pub fn validate(&self) -> Result<ValidCropRequest, String> {
        let city = self
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let mut missing = Vec::new();
        for (name, value) in [
            ("ph", &self.ph),
            ("nitrogen", &self.nitrogen),
            ("phosphorus", &self.phosphorus),
            ("potassium", &self.potassium),
        ] {
            if is_blank(value) {
                missing.push(name);
            }
        }
        if city.is_none() {
            missing.push("city");
        }
        if !missing.is_empty() {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        }

        let nutrients = SoilNutrients {
            ph: as_number("ph", &self.ph)?,
            nitrogen: as_number("nitrogen", &self.nitrogen)?,
            phosphorus: as_number("phosphorus", &self.phosphorus)?,
            potassium: as_number("potassium", &self.potassium)?,
        };
        validate_ph(nutrients.ph).map_err(str::to_string)?;

        Ok(ValidCropRequest {
            nutrients,
            city: city.unwrap_or_default().to_string(),
            language: self.language.clone().unwrap_or_default(),
        })
    }
}

/// Free-text recommendation returned by the language model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub recommendation: String,
}

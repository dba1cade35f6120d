//! Soil profile and soil report models

use serde::{Deserialize, Serialize};

/// Soil profile for a district
///
/// There is no soil survey behind this yet; every district gets the same
/// reference profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoilProfile {
    pub state: String,
    pub district: String,
    pub ph: f64,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub organic_carbon: String,
    pub recommendation: String,
}

impl SoilProfile {
    /// Reference profile for the given location
    pub fn reference(state: &str, district: &str) -> Self {
        Self {
            state: state.to_string(),
            district: district.to_string(),
            ph: 6.8,
            nitrogen: "280 kg/ha".to_string(),
            phosphorus: "25 kg/ha".to_string(),
            potassium: "210 kg/ha".to_string(),
            organic_carbon: "0.75%".to_string(),
            recommendation: "Add 40kg Urea, 25kg DAP, 15kg MOP per acre for this crop.".to_string(),
        }
    }
}

/// Text extracted from an uploaded soil report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilReportText {
    pub raw_text: String,
    pub message: String,
}

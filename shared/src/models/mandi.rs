//! Mandi (wholesale market) price models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Page size used when the caller does not ask for one
pub const MANDI_DEFAULT_LIMIT: u32 = 50;

/// Filters accepted by the mandi price endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MandiPriceQuery {
    pub commodity: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub market: Option<String>,
    /// Arrival date in `YYYY-MM-DD`
    pub date: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// A single price record, reduced to the fields the client displays
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MandiPriceRecord {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub variety: String,
    /// Arrival date as the upstream reports it (`DD/MM/YYYY`)
    pub arrival_date: String,
    /// Prices in rupees per quintal
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub modal_price: Option<Decimal>,
}

/// One page of mandi price records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandiPriceResponse {
    /// Number of records in this page, not the upstream total
    pub count: usize,
    pub records: Vec<MandiPriceRecord>,
}

impl MandiPriceResponse {
    pub fn new(records: Vec<MandiPriceRecord>) -> Self {
        Self {
            count: records.len(),
            records,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MandiDateError {
    #[error("date must be a calendar date in YYYY-MM-DD format, got '{0}'")]
    Malformed(String),
}

/// Convert a `YYYY-MM-DD` date filter to the upstream's `DD/MM/YYYY`
pub fn to_upstream_date(date: &str) -> Result<String, MandiDateError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| MandiDateError::Malformed(date.to_string()))?;
    Ok(parsed.format("%d/%m/%Y").to_string())
}

/// Read a price the upstream may send as a number, a numeric string, or a
/// placeholder such as "NA"
pub fn parse_price(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Price overview for a page of records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSummary {
    pub records: usize,
    pub lowest_price: Option<Decimal>,
    pub highest_price: Option<Decimal>,
    pub average_modal_price: Option<Decimal>,
}

/// Summarize the lowest, highest and average modal price of a page
pub fn summarize_prices(records: &[MandiPriceRecord]) -> PriceSummary {
    let lowest_price = records.iter().filter_map(|r| r.min_price).min();
    let highest_price = records.iter().filter_map(|r| r.max_price).max();

    let modal: Vec<Decimal> = records.iter().filter_map(|r| r.modal_price).collect();
    let average_modal_price = if modal.is_empty() {
        None
    } else {
        let total: Decimal = modal.iter().sum();
        Some((total / Decimal::from(modal.len())).round_dp(2))
    };

    PriceSummary {
        records: records.len(),
        lowest_price,
        highest_price,
        average_modal_price,
    }
}

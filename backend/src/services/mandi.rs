//! Mandi price service: filter translation and record reshaping

use std::sync::Arc;

use shared::{parse_price, to_upstream_date, MandiPriceQuery, MandiPriceRecord, MandiPriceResponse};

use crate::error::{AppError, AppResult};
use crate::external::mandi::{MandiPriceSource, MandiUpstreamQuery, RawMandiRecord};

/// Largest page the open-data API serves in one call
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Clone)]
pub struct MandiService {
    source: Arc<dyn MandiPriceSource>,
    default_limit: u32,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl MandiService {
    pub fn new(source: Arc<dyn MandiPriceSource>, default_limit: u32) -> Self {
        Self {
            source,
            default_limit,
        }
    }

    /// Translate caller filters into the upstream query
    pub fn build_query(&self, query: &MandiPriceQuery) -> AppResult<MandiUpstreamQuery> {
        let limit = query.limit.unwrap_or(self.default_limit);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let mut filters = Vec::new();
        for (field, value) in [
            ("commodity", &query.commodity),
            ("state", &query.state),
            ("district", &query.district),
            ("market", &query.market),
        ] {
            if let Some(value) = non_blank(value) {
                filters.push((field, value));
            }
        }
        if let Some(date) = non_blank(&query.date) {
            let date = to_upstream_date(&date).map_err(|e| AppError::validation(e.to_string()))?;
            filters.push(("arrival_date", date));
        }

        Ok(MandiUpstreamQuery {
            limit,
            offset: query.offset.unwrap_or(0),
            filters,
        })
    }

    /// Fetch one page of price records
    pub async fn get_prices(&self, query: &MandiPriceQuery) -> AppResult<MandiPriceResponse> {
        let upstream = self.build_query(query)?;
        let raw = self.source.fetch_records(&upstream).await?;
        let records: Vec<MandiPriceRecord> = raw.into_iter().map(to_price_record).collect();

        if records.len() as u32 == upstream.limit {
            tracing::debug!(limit = upstream.limit, "Mandi page is full; more records may exist");
        }

        Ok(MandiPriceResponse::new(records))
    }
}

/// Reduce an upstream record to the fields the client displays
pub fn to_price_record(raw: RawMandiRecord) -> MandiPriceRecord {
    MandiPriceRecord {
        min_price: parse_price(&raw.min_price),
        max_price: parse_price(&raw.max_price),
        modal_price: parse_price(&raw.modal_price),
        state: raw.state,
        district: raw.district,
        market: raw.market,
        commodity: raw.commodity,
        variety: raw.variety,
        arrival_date: raw.arrival_date,
    }
}

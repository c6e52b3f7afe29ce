//! Deterministic fallback price records for when the portal yields nothing.
//!
//! Records are derived from a per-commodity base triple, decayed by a fixed
//! amount per day into the past, then clamped so that
//! `500 <= min <= modal <= max` and `max >= min + 300`.

use agmarknet_api::{PriceRecord, PORTAL_DATE_FORMAT};
use chrono::{Days, NaiveDate};

use crate::error::PipelineError;

/// Days of history generated when the caller does not say otherwise.
pub const DEFAULT_DAYS: u32 = 7;
/// Longest history the synthesizer will build.
pub const MAX_DAYS: u32 = 366;
pub const PRICE_FLOOR: i64 = 500;
pub const MIN_SPREAD: i64 = 300;
pub const DAILY_DECAY: i64 = 50;

pub const ESTIMATE_NOTE: &str = "Estimated data - live prices unavailable";
pub const SAMPLE_NOTE: &str = "Sample data - actual data unavailable";

const SYNTHETIC_VARIETY: &str = "General";

/// Reference `(min, max, modal)` prices in rupees per quintal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasePrices {
    pub min: i64,
    pub max: i64,
    pub modal: i64,
}

const fn prices(min: i64, max: i64, modal: i64) -> BasePrices {
    BasePrices { min, max, modal }
}

const BASE_PRICES: &[(&str, BasePrices)] = &[
    ("potato", prices(1200, 1800, 1500)),
    ("tomato", prices(1500, 2500, 2000)),
    ("onion", prices(800, 1200, 1000)),
    ("rice", prices(2500, 3500, 3000)),
    ("wheat", prices(1800, 2200, 2000)),
    ("maize", prices(1400, 1800, 1600)),
];

pub const DEFAULT_PRICES: BasePrices = prices(1000, 2000, 1500);

/// Base triple for a commodity, or [`DEFAULT_PRICES`] when it is not listed.
pub fn base_prices(commodity: &str) -> BasePrices {
    let key = commodity.trim().to_lowercase();
    BASE_PRICES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, p)| *p)
        .unwrap_or(DEFAULT_PRICES)
}

/// Prices for `offset` days before today, after decay and clamping.
pub fn decayed(base: BasePrices, offset: u32) -> BasePrices {
    let variation = DAILY_DECAY * i64::from(offset);
    let min = (base.min - variation).max(PRICE_FLOOR);
    let max = (base.max - variation).max(min + MIN_SPREAD);
    let modal = (base.modal - variation).clamp(min, max);
    BasePrices { min, max, modal }
}

/// Builds one record per day for `days` days ending at `today`, most recent
/// first. Fails if `days` exceeds [`MAX_DAYS`] or a date falls outside the
/// calendar range.
pub fn try_synthesize(
    commodity: &str,
    market: &str,
    days: u32,
    today: NaiveDate,
) -> Result<Vec<PriceRecord>, PipelineError> {
    if days > MAX_DAYS {
        return Err(PipelineError::Synthesis(format!(
            "{} days exceeds the limit of {}",
            days, MAX_DAYS
        )));
    }
    let base = base_prices(commodity);
    let mut records = Vec::with_capacity(days as usize);
    for offset in 0..days {
        let date = today
            .checked_sub_days(Days::new(u64::from(offset)))
            .ok_or_else(|| {
                PipelineError::Synthesis(format!("{} days before {} is out of range", offset, today))
            })?;
        let p = decayed(base, offset);
        records.push(PriceRecord {
            sequence_number: (offset + 1).to_string(),
            date: date.format(PORTAL_DATE_FORMAT).to_string(),
            market: market.to_string(),
            commodity: commodity.to_string(),
            variety: SYNTHETIC_VARIETY.to_string(),
            min_price: p.min.to_string(),
            max_price: p.max.to_string(),
            modal_price: p.modal.to_string(),
            note: Some(ESTIMATE_NOTE.to_string()),
        });
    }
    Ok(records)
}

/// Like [`try_synthesize`], but never fails: any internal error yields the
/// single [`degraded`] record instead.
pub fn synthesize(commodity: &str, market: &str, days: u32, today: NaiveDate) -> Vec<PriceRecord> {
    match try_synthesize(commodity, market, days, today) {
        Ok(records) => {
            tracing::info!("Generated sample data with {} entries", records.len());
            records
        }
        Err(e) => {
            tracing::error!("Error generating sample data: {}", e);
            vec![degraded(commodity, market, today)]
        }
    }
}

/// Fixed single-record sample used as the last resort.
pub fn degraded(commodity: &str, market: &str, today: NaiveDate) -> PriceRecord {
    PriceRecord {
        sequence_number: "1".to_string(),
        date: today.format(PORTAL_DATE_FORMAT).to_string(),
        market: market.to_string(),
        commodity: commodity.to_string(),
        variety: SYNTHETIC_VARIETY.to_string(),
        min_price: "1500".to_string(),
        max_price: "1800".to_string(),
        modal_price: "1650".to_string(),
        note: Some(SAMPLE_NOTE.to_string()),
    }
}

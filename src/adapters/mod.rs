use crate::domain::money::{Currency, Money};
use crate::domain::order::{Order, Platform};
use crate::error::IngestionError;
use chrono::{DateTime, Utc};

pub mod all_offers;
pub mod world_market;

/// Translates one platform's raw webhook payload into the canonical order.
/// Adapters are pure: same payload in, same projection out. Money fields are
/// left in the source currency; the converter runs afterwards. Unknown enum
/// values fail fast with a typed error naming the raw value; guessing a
/// default would corrupt the state machine's input.
pub trait SourceAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    fn normalize(&self, payload: &serde_json::Value) -> Result<Order, IngestionError>;
}

pub(crate) fn parse_timestamp(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, IngestionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| IngestionError::InvalidTimestamp {
            field,
            value: raw.to_string(),
        })
}

pub(crate) fn money_from_major(
    field: &'static str,
    value: f64,
    currency: Currency,
) -> Result<Money, IngestionError> {
    if value < 0.0 {
        return Err(IngestionError::InvalidAmount { field, value });
    }
    Ok(Money::from_major_units(value, currency))
}

pub(crate) fn check_quantity(field: &'static str, value: i32) -> Result<i32, IngestionError> {
    if value <= 0 {
        return Err(IngestionError::InvalidQuantity { field, value });
    }
    Ok(value)
}

pub(crate) fn parse_currency(raw: &str) -> Result<Currency, IngestionError> {
    Currency::parse(raw).ok_or_else(|| IngestionError::UnsupportedCurrency(raw.to_string()))
}

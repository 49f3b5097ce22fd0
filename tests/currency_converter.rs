use anyhow::Result;
use chrono::NaiveDate;
use orders_ingest::currency::converter::CurrencyConverter;
use orders_ingest::currency::rate_source::{RateSource, StaticRateTable};
use orders_ingest::domain::money::{Currency, Money};
use orders_ingest::error::IngestionError;
use std::sync::Arc;

struct NoQuotes;

#[async_trait::async_trait]
impl RateSource for NoQuotes {
    async fn rate(&self, _: Currency, _: Currency, _: NaiveDate) -> Result<Option<f64>> {
        Ok(None)
    }
}

struct Unreachable;

#[async_trait::async_trait]
impl RateSource for Unreachable {
    async fn rate(&self, _: Currency, _: Currency, _: NaiveDate) -> Result<Option<f64>> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn same_currency_is_identity() {
    let converter = converter_with_live(StaticRateTable::new());
    let amount = Money::new(12345, Currency::Brl);

    let out = converter
        .convert(amount, Currency::Brl, day())
        .await
        .unwrap();

    assert_eq!(out, amount);
}

#[tokio::test]
async fn converts_with_live_rate() {
    let live = StaticRateTable::new().with_rate(Currency::Usd, Currency::Brl, 5.20);
    let converter = converter_with_live(live);

    // 100.00 USD at 5.20 -> 52000 BRL cents.
    let out = converter
        .convert(Money::new(10_000, Currency::Usd), Currency::Brl, day())
        .await
        .unwrap();

    assert_eq!(out, Money::new(52_000, Currency::Brl));
}

#[tokio::test]
async fn rounds_half_up() {
    let live = StaticRateTable::new().with_rate(Currency::Usd, Currency::Brl, 1.01);
    let converter = converter_with_live(live);

    // 250 * 1.01 = 252.5, rounds up to 253.
    let out = converter
        .convert(Money::new(250, Currency::Usd), Currency::Brl, day())
        .await
        .unwrap();

    assert_eq!(out.amount_in_cents, 253);
}

#[tokio::test]
async fn falls_back_when_live_source_is_down() {
    let converter = CurrencyConverter {
        live: Arc::new(Unreachable),
        fallback: Arc::new(StaticRateTable::new().with_rate(Currency::Eur, Currency::Brl, 6.10)),
    };

    let out = converter
        .convert(Money::new(1_000, Currency::Eur), Currency::Brl, day())
        .await
        .unwrap();

    assert_eq!(out.amount_in_cents, 6_100);
}

#[tokio::test]
async fn falls_back_when_live_source_has_no_quote() {
    let converter = CurrencyConverter {
        live: Arc::new(NoQuotes),
        fallback: Arc::new(StaticRateTable::new().with_rate(Currency::Usd, Currency::Brl, 5.00)),
    };

    let out = converter
        .convert(Money::new(200, Currency::Usd), Currency::Brl, day())
        .await
        .unwrap();

    assert_eq!(out.amount_in_cents, 1_000);
}

#[tokio::test]
async fn missing_rate_everywhere_is_a_hard_error() {
    let converter = CurrencyConverter {
        live: Arc::new(NoQuotes),
        fallback: Arc::new(StaticRateTable::new()),
    };

    let err = converter
        .convert(Money::new(100, Currency::Eur), Currency::Brl, day())
        .await
        .unwrap_err();

    match err {
        IngestionError::CurrencyRateUnavailable { from, to, .. } => {
            assert_eq!(from, Currency::Eur);
            assert_eq!(to, Currency::Brl);
        }
        other => panic!("expected CurrencyRateUnavailable, got {other:?}"),
    }
}

fn converter_with_live(live: StaticRateTable) -> CurrencyConverter {
    CurrencyConverter {
        live: Arc::new(live),
        fallback: Arc::new(StaticRateTable::new()),
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

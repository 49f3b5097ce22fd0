use crate::domain::money::Currency;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Where exchange rates come from. `Ok(None)` is a typed absence ("no rate
/// for this pair/date"), distinct from a transport failure.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync {
    async fn rate(&self, from: Currency, to: Currency, as_of: NaiveDate) -> Result<Option<f64>>;
}

/// Daily quote lookup against the awesomeapi currency service. The quote is
/// keyed by pair and reference date; the response is a JSON array whose
/// first element carries the `ask` price. An empty array means the provider
/// has no quote for that date.
pub struct AwesomeApiRateSource {
    pub base_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl RateSource for AwesomeApiRateSource {
    async fn rate(&self, from: Currency, to: Currency, as_of: NaiveDate) -> Result<Option<f64>> {
        let day = as_of.format("%Y%m%d").to_string();
        let url = format!(
            "{}/json/daily/{}-{}/1?start_date={}&end_date={}",
            self.base_url, from, to, day, day
        );

        let quotes: Vec<serde_json::Value> = self
            .client
            .get(url)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ask = quotes
            .first()
            .and_then(|q| q.get("ask"))
            .and_then(|a| a.as_str())
            .and_then(|a| a.parse::<f64>().ok());

        Ok(ask)
    }
}

/// In-memory pair table, used as the fallback when the live source is down
/// or has no quote.
#[derive(Default, Clone)]
pub struct StaticRateTable {
    rates: HashMap<(Currency, Currency), f64>,
}

impl StaticRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: Currency, to: Currency, rate: f64) -> Self {
        self.rates.insert((from, to), rate);
        self
    }
}

#[async_trait::async_trait]
impl RateSource for StaticRateTable {
    async fn rate(&self, from: Currency, to: Currency, _as_of: NaiveDate) -> Result<Option<f64>> {
        Ok(self.rates.get(&(from, to)).copied())
    }
}

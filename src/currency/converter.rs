use crate::currency::rate_source::RateSource;
use crate::domain::money::{Currency, Money};
use crate::error::IngestionError;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct CurrencyConverter {
    pub live: Arc<dyn RateSource>,
    pub fallback: Arc<dyn RateSource>,
}

impl CurrencyConverter {
    /// Converts `money` into `target` minor units, rounding half-up.
    /// Same-currency conversion is the identity, bit-for-bit. Failure to
    /// resolve a rate is a hard error; there is no silent 1:1 default.
    pub async fn convert(
        &self,
        money: Money,
        target: Currency,
        as_of: NaiveDate,
    ) -> Result<Money, IngestionError> {
        if money.currency == target {
            return Ok(money);
        }

        let rate = self.resolve_rate(money.currency, target, as_of).await?;

        Ok(Money {
            amount_in_cents: (money.amount_in_cents as f64 * rate).round() as i64,
            currency: target,
        })
    }

    async fn resolve_rate(
        &self,
        from: Currency,
        to: Currency,
        as_of: NaiveDate,
    ) -> Result<f64, IngestionError> {
        match self.live.rate(from, to, as_of).await {
            Ok(Some(rate)) => return Ok(rate),
            Ok(None) => {
                tracing::warn!(%from, %to, %as_of, "live rate source has no quote, trying fallback");
            }
            Err(e) => {
                tracing::warn!(%from, %to, %as_of, error = %e, "live rate lookup failed, trying fallback");
            }
        }

        match self.fallback.rate(from, to, as_of).await {
            Ok(Some(rate)) => Ok(rate),
            _ => Err(IngestionError::CurrencyRateUnavailable { from, to, as_of }),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Every persisted amount is converted into this currency's minor units.
pub const CANONICAL_CURRENCY: Currency = Currency::Brl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Brl,
    Usd,
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn parse(raw: &str) -> Option<Currency> {
        match raw {
            "BRL" => Some(Currency::Brl),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            _ => None,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary amount as a whole number of the currency's minor unit (cents).
/// Amounts are non-negative; refund deltas are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount_in_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_in_cents: i64, currency: Currency) -> Self {
        Self {
            amount_in_cents,
            currency,
        }
    }

    /// Source platforms report amounts in major units (e.g. `100.00`);
    /// round-half-up into integer cents.
    pub fn from_major_units(value: f64, currency: Currency) -> Self {
        Self {
            amount_in_cents: (value * 100.0).round() as i64,
            currency,
        }
    }
}

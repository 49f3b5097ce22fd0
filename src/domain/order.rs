use crate::domain::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    AllOffers,
    WorldMarket,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::AllOffers => "ALL_OFFERS",
            Platform::WorldMarket => "WORLD_MARKET",
        }
    }

    pub fn parse(raw: &str) -> Option<Platform> {
        match raw {
            "ALL_OFFERS" => Some(Platform::AllOffers),
            "WORLD_MARKET" => Some(Platform::WorldMarket),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Pix,
    Billet,
    CreditCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Billet => "BILLET",
            PaymentMethod::CreditCard => "CREDIT_CARD",
        }
    }

    pub fn parse(raw: &str) -> Option<PaymentMethod> {
        match raw {
            "PIX" => Some(PaymentMethod::Pix),
            "BILLET" => Some(PaymentMethod::Billet),
            "CREDIT_CARD" => Some(PaymentMethod::CreditCard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Paid,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Paid => "PAID",
            TransactionStatus::Refunded => "REFUNDED",
        }
    }

    pub fn parse(raw: &str) -> Option<TransactionStatus> {
        match raw {
            "PENDING" => Some(TransactionStatus::Pending),
            "PAID" => Some(TransactionStatus::Paid),
            "REFUNDED" => Some(TransactionStatus::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: Option<String>,
}

/// Order-level amounts. `shipping` stays `None` when the source reports no
/// shipping data at all; "no data" and "zero cost" are different facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderValues {
    pub total: Money,
    pub seller: Money,
    pub platform: Money,
    pub shipping: Option<Money>,
}

/// The unified record every source payload normalizes into. One logical order
/// is named by the identity key `(platform, sale_id, external_webhook_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub sale_id: String,
    pub external_webhook_id: String,
    pub platform: Platform,
    pub payment_method: PaymentMethod,
    pub transaction_status: TransactionStatus,
    pub products: Vec<Product>,
    pub customer: Customer,
    pub values: OrderValues,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredOrder {
    pub id: Uuid,
    pub sale_id: String,
    pub external_webhook_id: String,
    pub platform: Platform,
    pub payment_method: PaymentMethod,
    pub transaction_status: TransactionStatus,
    pub products: Vec<Product>,
    pub customer: Customer,
    pub values: OrderValues,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
}

use crate::adapters::{
    check_quantity, money_from_major, parse_currency, parse_timestamp, SourceAdapter,
};
use crate::domain::money::Currency;
use crate::domain::order::{
    Customer, Order, OrderValues, PaymentMethod, Platform, Product, TransactionStatus,
};
use crate::error::IngestionError;
use serde::Deserialize;

/// WorldMarket delivers snake_case JSON. Amounts live under `order_details`
/// in major units of `payment_details.currency`, including a real shipping
/// fee. The payload has no dedicated refund timestamp; the order's
/// `updated_at` stands in for it on refund events.
pub struct WorldMarketAdapter;

#[derive(Debug, Deserialize)]
pub struct WorldMarketBody {
    pub order_id: String,
    pub webhook_id: String,
    pub customer: WorldMarketCustomer,
    pub order_details: WorldMarketOrderDetails,
    pub payment_details: WorldMarketPaymentDetails,
    pub order_status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct WorldMarketCustomer {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<WorldMarketAddress>,
}

#[derive(Debug, Deserialize)]
pub struct WorldMarketAddress {
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorldMarketOrderDetails {
    pub products: Vec<WorldMarketProduct>,
    pub total: f64,
    pub shipping_fee: f64,
    pub platform_fee: f64,
    pub seller_fee: f64,
}

#[derive(Debug, Deserialize)]
pub struct WorldMarketProduct {
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
    pub price_unit: f64,
}

#[derive(Debug, Deserialize)]
pub struct WorldMarketPaymentDetails {
    pub payment_method: String,
    pub currency: String,
    pub paid_at: Option<String>,
}

impl SourceAdapter for WorldMarketAdapter {
    fn platform(&self) -> Platform {
        Platform::WorldMarket
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Order, IngestionError> {
        let body =
            WorldMarketBody::deserialize(payload).map_err(IngestionError::MalformedPayload)?;

        let currency = parse_currency(&body.payment_details.currency)?;
        let payment_method = map_payment_method(&body.payment_details.payment_method)?;
        let transaction_status = map_transaction_status(&body.order_status)?;
        let products = map_products(&body.order_details.products, currency)?;
        let customer = map_customer(&body.customer);
        let values = map_values(&body.order_details, currency)?;
        let (created_at, paid_at, refunded_at) = map_timestamps(&body, transaction_status)?;

        Ok(Order {
            sale_id: body.order_id,
            external_webhook_id: body.webhook_id,
            platform: Platform::WorldMarket,
            payment_method,
            transaction_status,
            products,
            customer,
            values,
            created_at,
            paid_at,
            refunded_at,
        })
    }
}

fn map_payment_method(raw: &str) -> Result<PaymentMethod, IngestionError> {
    match raw {
        "pix" => Ok(PaymentMethod::Pix),
        "boleto" => Ok(PaymentMethod::Billet),
        "credit_card" => Ok(PaymentMethod::CreditCard),
        _ => Err(IngestionError::UnknownPaymentMethod(raw.to_string())),
    }
}

fn map_transaction_status(raw: &str) -> Result<TransactionStatus, IngestionError> {
    match raw {
        "pending" => Ok(TransactionStatus::Pending),
        "approved" => Ok(TransactionStatus::Paid),
        "refunded" => Ok(TransactionStatus::Refunded),
        _ => Err(IngestionError::UnknownTransactionStatus(raw.to_string())),
    }
}

fn map_products(
    products: &[WorldMarketProduct],
    currency: Currency,
) -> Result<Vec<Product>, IngestionError> {
    products
        .iter()
        .map(|p| {
            Ok(Product {
                id: p.product_id.clone(),
                name: p.name.clone(),
                quantity: check_quantity("products.quantity", p.quantity)?,
                unit_price: money_from_major("products.price_unit", p.price_unit, currency)?,
            })
        })
        .collect()
}

fn map_customer(customer: &WorldMarketCustomer) -> Customer {
    Customer {
        id: customer.customer_id.clone(),
        full_name: customer.name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        country: customer.address.as_ref().and_then(|a| a.country.clone()),
    }
}

fn map_values(
    details: &WorldMarketOrderDetails,
    currency: Currency,
) -> Result<OrderValues, IngestionError> {
    Ok(OrderValues {
        total: money_from_major("order_details.total", details.total, currency)?,
        seller: money_from_major("order_details.seller_fee", details.seller_fee, currency)?,
        platform: money_from_major("order_details.platform_fee", details.platform_fee, currency)?,
        shipping: Some(money_from_major(
            "order_details.shipping_fee",
            details.shipping_fee,
            currency,
        )?),
    })
}

type Timestamps = (
    chrono::DateTime<chrono::Utc>,
    Option<chrono::DateTime<chrono::Utc>>,
    Option<chrono::DateTime<chrono::Utc>>,
);

fn map_timestamps(
    body: &WorldMarketBody,
    status: TransactionStatus,
) -> Result<Timestamps, IngestionError> {
    let created_at = parse_timestamp("created_at", &body.created_at)?;

    let paid_at = match (status, body.payment_details.paid_at.as_deref()) {
        (TransactionStatus::Paid, Some(raw)) => {
            Some(parse_timestamp("payment_details.paid_at", raw)?)
        }
        _ => None,
    };

    let refunded_at = match status {
        TransactionStatus::Refunded => Some(parse_timestamp("updated_at", &body.updated_at)?),
        _ => None,
    };

    Ok((created_at, paid_at, refunded_at))
}

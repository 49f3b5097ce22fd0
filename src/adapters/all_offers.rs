use crate::adapters::{
    check_quantity, money_from_major, parse_currency, parse_timestamp, SourceAdapter,
};
use crate::domain::money::Currency;
use crate::domain::order::{
    Customer, Order, OrderValues, PaymentMethod, Platform, Product, TransactionStatus,
};
use crate::error::IngestionError;
use serde::Deserialize;

/// AllOffers delivers PascalCase JSON with amounts in major units of the
/// order's `Currency` (BRL, USD or EUR). The order body carries no shipping
/// amount, so the canonical shipping value is `None`, never zero.
pub struct AllOffersAdapter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllOffersBody {
    pub webhook_id: String,
    pub order_id: String,
    pub payment_method: String,
    pub user_commission: f64,
    pub total_sale_amount: f64,
    pub platform_commission: f64,
    pub currency: String,
    pub sale_status: String,
    pub customer: AllOffersCustomer,
    pub order_created_date: String,
    pub payment_date: Option<String>,
    pub refund_date: Option<String>,
    pub items: Vec<AllOffersItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllOffersCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllOffersItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: f64,
}

impl SourceAdapter for AllOffersAdapter {
    fn platform(&self) -> Platform {
        Platform::AllOffers
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Order, IngestionError> {
        let body = AllOffersBody::deserialize(payload).map_err(IngestionError::MalformedPayload)?;

        let currency = parse_currency(&body.currency)?;
        let payment_method = map_payment_method(&body.payment_method)?;
        let transaction_status = map_transaction_status(&body.sale_status)?;
        let products = map_products(&body.items, currency)?;
        let customer = map_customer(&body.customer);
        let values = map_values(&body, currency)?;
        let (created_at, paid_at, refunded_at) = map_timestamps(&body, transaction_status)?;

        Ok(Order {
            sale_id: body.order_id,
            external_webhook_id: body.webhook_id,
            platform: Platform::AllOffers,
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
        "Pix" => Ok(PaymentMethod::Pix),
        "Boleto" => Ok(PaymentMethod::Billet),
        "CreditCard" => Ok(PaymentMethod::CreditCard),
        _ => Err(IngestionError::UnknownPaymentMethod(raw.to_string())),
    }
}

fn map_transaction_status(raw: &str) -> Result<TransactionStatus, IngestionError> {
    match raw {
        "AwaitingPayment" => Ok(TransactionStatus::Pending),
        "Paid" => Ok(TransactionStatus::Paid),
        "Refunded" => Ok(TransactionStatus::Refunded),
        _ => Err(IngestionError::UnknownTransactionStatus(raw.to_string())),
    }
}

fn map_products(
    items: &[AllOffersItem],
    currency: Currency,
) -> Result<Vec<Product>, IngestionError> {
    items
        .iter()
        .map(|item| {
            Ok(Product {
                id: item.item_id.clone(),
                name: item.item_name.clone(),
                quantity: check_quantity("Items.Quantity", item.quantity)?,
                unit_price: money_from_major("Items.UnitPrice", item.unit_price, currency)?,
            })
        })
        .collect()
}

fn map_customer(customer: &AllOffersCustomer) -> Customer {
    // The source has no customer id of its own; the email is the stable key.
    Customer {
        id: customer.email.clone(),
        full_name: format!("{} {}", customer.first_name, customer.last_name),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        country: customer.country.clone(),
    }
}

fn map_values(body: &AllOffersBody, currency: Currency) -> Result<OrderValues, IngestionError> {
    Ok(OrderValues {
        total: money_from_major("TotalSaleAmount", body.total_sale_amount, currency)?,
        seller: money_from_major("UserCommission", body.user_commission, currency)?,
        platform: money_from_major("PlatformCommission", body.platform_commission, currency)?,
        shipping: None,
    })
}

type Timestamps = (
    chrono::DateTime<chrono::Utc>,
    Option<chrono::DateTime<chrono::Utc>>,
    Option<chrono::DateTime<chrono::Utc>>,
);

fn map_timestamps(
    body: &AllOffersBody,
    status: TransactionStatus,
) -> Result<Timestamps, IngestionError> {
    let created_at = parse_timestamp("OrderCreatedDate", &body.order_created_date)?;

    let paid_at = match (status, body.payment_date.as_deref()) {
        (TransactionStatus::Paid, Some(raw)) => Some(parse_timestamp("PaymentDate", raw)?),
        _ => None,
    };

    let refunded_at = match (status, body.refund_date.as_deref()) {
        (TransactionStatus::Refunded, Some(raw)) => Some(parse_timestamp("RefundDate", raw)?),
        _ => None,
    };

    Ok((created_at, paid_at, refunded_at))
}

use crate::domain::money::{Currency, Money};
use crate::domain::order::{
    Customer, Order, OrderValues, PaymentMethod, Platform, Product, StoredOrder, TransactionStatus,
};
use crate::error::IngestionError;
use crate::lifecycle::transitions::{decide, TransitionDecision, TransitionPolicy};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Bounded optimistic retry before a hot identity key surfaces as a
/// transient conflict to the caller.
const MAX_UPSERT_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct OrdersRepo {
    pub pool: PgPool,
}

/// What one upsert attempt should do, given the status observed for the
/// identity key (or its absence). Pure, so the deny/guard rules are
/// checkable without a database; the SQL below only executes the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePlan {
    Insert,
    /// Conditional update, valid only while the stored status still equals
    /// `guard_status`.
    Update { guard_status: TransactionStatus },
    Deny { current: TransactionStatus },
}

pub fn plan_write(
    policy: &TransitionPolicy,
    observed: Option<TransactionStatus>,
    requested: TransactionStatus,
) -> WritePlan {
    let Some(current) = observed else {
        return WritePlan::Insert;
    };
    match decide(policy, Some(current), requested) {
        TransitionDecision::Allow => WritePlan::Update {
            guard_status: current,
        },
        TransitionDecision::Deny => WritePlan::Deny { current },
    }
}

impl OrdersRepo {
    /// Applies one canonical order write, exactly-once-effective under
    /// at-least-once delivery and concurrent writers on the same identity
    /// key `(platform, sale_id, external_webhook_id)`:
    ///
    /// 1. read the stored record for the key;
    /// 2. if none, insert under the unique index — a conflict means a
    ///    concurrent writer won the first delivery, so converge into the
    ///    update path instead of propagating the violation;
    /// 3. gate the update on the status state machine;
    /// 4. update conditionally on the status observed in step 1, so an
    ///    interleaved writer invalidates the write and we retry.
    ///
    /// `created_at` is fixed by the original insert; `paid_at`/`refunded_at`
    /// are merged with COALESCE so a recorded timestamp is never overwritten.
    pub async fn upsert(
        &self,
        order: &Order,
        policy: &TransitionPolicy,
    ) -> Result<StoredOrder, IngestionError> {
        for _ in 0..MAX_UPSERT_ATTEMPTS {
            let observed = self
                .find_by_identity(order.platform, &order.sale_id, &order.external_webhook_id)
                .await?
                .map(|existing| existing.transaction_status);

            match plan_write(policy, observed, order.transaction_status) {
                WritePlan::Insert => match self.try_insert(order).await? {
                    Some(stored) => return Ok(stored),
                    // Lost the first-delivery race; re-read and update.
                    None => continue,
                },
                WritePlan::Deny { current } => {
                    return Err(IngestionError::DeniedTransition {
                        current,
                        requested: order.transaction_status,
                    })
                }
                WritePlan::Update { guard_status } => {
                    match self.try_update(order, guard_status).await? {
                        Some(stored) => return Ok(stored),
                        // Status guard failed underneath us; re-evaluate from scratch.
                        None => continue,
                    }
                }
            }
        }

        Err(IngestionError::StorageConflict {
            attempts: MAX_UPSERT_ATTEMPTS,
        })
    }

    pub async fn find_by_identity(
        &self,
        platform: Platform,
        sale_id: &str,
        external_webhook_id: &str,
    ) -> Result<Option<StoredOrder>, IngestionError> {
        let row = sqlx::query(
            r#"
            SELECT *
            FROM orders
            WHERE platform = $1 AND sale_id = $2 AND external_webhook_id = $3
            "#,
        )
        .bind(platform.as_str())
        .bind(sale_id)
        .bind(external_webhook_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_stored).transpose()
    }

    async fn try_insert(&self, order: &Order) -> Result<Option<StoredOrder>, IngestionError> {
        let row = sqlx::query(
            r#"
            INSERT INTO orders (
                id, sale_id, external_webhook_id, platform, payment_method,
                transaction_status, products, customer, currency,
                total_value_in_cents, seller_value_in_cents,
                platform_value_in_cents, shipping_value_in_cents,
                created_at, updated_at, paid_at, refunded_at
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11,
                $12, $13,
                $14, now(), $15, $16
            )
            ON CONFLICT (platform, sale_id, external_webhook_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&order.sale_id)
        .bind(&order.external_webhook_id)
        .bind(order.platform.as_str())
        .bind(order.payment_method.as_str())
        .bind(order.transaction_status.as_str())
        .bind(Json(&order.products))
        .bind(Json(&order.customer))
        .bind(order.values.total.currency.as_str())
        .bind(order.values.total.amount_in_cents)
        .bind(order.values.seller.amount_in_cents)
        .bind(order.values.platform.amount_in_cents)
        .bind(order.values.shipping.map(|m| m.amount_in_cents))
        .bind(order.created_at)
        .bind(order.paid_at)
        .bind(order.refunded_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_stored).transpose()
    }

    async fn try_update(
        &self,
        order: &Order,
        expected_status: TransactionStatus,
    ) -> Result<Option<StoredOrder>, IngestionError> {
        let row = sqlx::query(
            r#"
            UPDATE orders SET
                payment_method = $1,
                transaction_status = $2,
                products = $3,
                customer = $4,
                currency = $5,
                total_value_in_cents = $6,
                seller_value_in_cents = $7,
                platform_value_in_cents = $8,
                shipping_value_in_cents = $9,
                updated_at = now(),
                paid_at = COALESCE(paid_at, $10),
                refunded_at = COALESCE(refunded_at, $11)
            WHERE platform = $12 AND sale_id = $13 AND external_webhook_id = $14
              AND transaction_status = $15
            RETURNING *
            "#,
        )
        .bind(order.payment_method.as_str())
        .bind(order.transaction_status.as_str())
        .bind(Json(&order.products))
        .bind(Json(&order.customer))
        .bind(order.values.total.currency.as_str())
        .bind(order.values.total.amount_in_cents)
        .bind(order.values.seller.amount_in_cents)
        .bind(order.values.platform.amount_in_cents)
        .bind(order.values.shipping.map(|m| m.amount_in_cents))
        .bind(order.paid_at)
        .bind(order.refunded_at)
        .bind(order.platform.as_str())
        .bind(&order.sale_id)
        .bind(&order.external_webhook_id)
        .bind(expected_status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_stored).transpose()
    }
}

fn row_to_stored(row: PgRow) -> Result<StoredOrder, IngestionError> {
    let platform_raw: String = row.get("platform");
    let platform = Platform::parse(&platform_raw).ok_or_else(|| decode("platform", &platform_raw))?;

    let method_raw: String = row.get("payment_method");
    let payment_method =
        PaymentMethod::parse(&method_raw).ok_or_else(|| decode("payment_method", &method_raw))?;

    let status_raw: String = row.get("transaction_status");
    let transaction_status = TransactionStatus::parse(&status_raw)
        .ok_or_else(|| decode("transaction_status", &status_raw))?;

    let currency_raw: String = row.get("currency");
    let currency = Currency::parse(&currency_raw).ok_or_else(|| decode("currency", &currency_raw))?;

    let products: Json<Vec<Product>> = row.get("products");
    let customer: Json<Customer> = row.get("customer");

    let shipping: Option<i64> = row.get("shipping_value_in_cents");

    Ok(StoredOrder {
        id: row.get("id"),
        sale_id: row.get("sale_id"),
        external_webhook_id: row.get("external_webhook_id"),
        platform,
        payment_method,
        transaction_status,
        products: products.0,
        customer: customer.0,
        values: OrderValues {
            total: Money::new(row.get("total_value_in_cents"), currency),
            seller: Money::new(row.get("seller_value_in_cents"), currency),
            platform: Money::new(row.get("platform_value_in_cents"), currency),
            shipping: shipping.map(|v| Money::new(v, currency)),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        paid_at: row.get("paid_at"),
        refunded_at: row.get("refunded_at"),
    })
}

fn decode(column: &str, raw: &str) -> IngestionError {
    IngestionError::StorageUnavailable(sqlx::Error::Decode(
        format!("unexpected {column} value in orders row: {raw}").into(),
    ))
}

use crate::adapters::SourceAdapter;
use crate::currency::converter::CurrencyConverter;
use crate::domain::money::CANONICAL_CURRENCY;
use crate::domain::order::{Order, Platform, StoredOrder};
use crate::error::IngestionError;
use crate::lifecycle::transitions::TransitionPolicy;
use crate::repo::orders_repo::OrdersRepo;
use std::sync::Arc;

/// Coordinates one incoming webhook event: adapter -> currency conversion ->
/// idempotent upsert. Constructed once at bootstrap with the concrete
/// adapter set, converter and repo; holds no other state.
#[derive(Clone)]
pub struct IngestionService {
    pub adapters: Vec<Arc<dyn SourceAdapter>>,
    pub converter: CurrencyConverter,
    pub orders_repo: OrdersRepo,
    pub policy: TransitionPolicy,
}

impl IngestionService {
    pub async fn ingest(
        &self,
        platform: Platform,
        payload: &serde_json::Value,
    ) -> Result<StoredOrder, IngestionError> {
        let adapter = self
            .adapters
            .iter()
            .find(|a| a.platform() == platform)
            .ok_or(IngestionError::AdapterNotConfigured(platform))?;

        let order = adapter.normalize(payload)?;
        let order = self.to_canonical_currency(order).await?;

        let stored = self.orders_repo.upsert(&order, &self.policy).await?;

        tracing::info!(
            platform = platform.as_str(),
            sale_id = %stored.sale_id,
            status = stored.transaction_status.as_str(),
            "order persisted"
        );

        Ok(stored)
    }

    /// Converts every money field into canonical minor units. The rate is
    /// referenced at the order's creation date, not the processing time.
    async fn to_canonical_currency(&self, mut order: Order) -> Result<Order, IngestionError> {
        let as_of = order.created_at.date_naive();

        for product in &mut order.products {
            product.unit_price = self
                .converter
                .convert(product.unit_price, CANONICAL_CURRENCY, as_of)
                .await?;
        }

        order.values.total = self
            .converter
            .convert(order.values.total, CANONICAL_CURRENCY, as_of)
            .await?;
        order.values.seller = self
            .converter
            .convert(order.values.seller, CANONICAL_CURRENCY, as_of)
            .await?;
        order.values.platform = self
            .converter
            .convert(order.values.platform, CANONICAL_CURRENCY, as_of)
            .await?;
        order.values.shipping = match order.values.shipping {
            Some(shipping) => Some(
                self.converter
                    .convert(shipping, CANONICAL_CURRENCY, as_of)
                    .await?,
            ),
            None => None,
        };

        Ok(order)
    }
}

//! Order service: the in-process contract behind the HTTP surface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::core::processor::QueryProcessor;
use crate::core::query::{OrderQuery, OrderView, PagedResponse};
use crate::storage::OrderStore;

/// Failures the query path can produce.
///
/// Validation rejections are returned as report values by the validator and
/// never appear here.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The caller abandoned the request; the pipeline aborts without a
    /// partial response.
    #[error("query cancelled")]
    Cancelled,

    /// Any other fault. Reported opaquely to callers; logged in full
    /// server-side.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Read-side order query contract
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Filter, sort, paginate and annotate orders per `query`.
    ///
    /// `cancel` is observed before the store read, before the sort, and
    /// before returning.
    async fn get_orders(
        &self,
        query: &OrderQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedResponse<OrderView>, QueryError>;
}

/// Default [`OrderService`] over an injected read-only store.
pub struct OrderQueryService {
    store: Arc<dyn OrderStore>,
    processor: QueryProcessor,
}

impl OrderQueryService {
    pub fn new(store: Arc<dyn OrderStore>, threshold_cents: i64) -> Self {
        Self {
            store,
            processor: QueryProcessor::new(threshold_cents),
        }
    }
}

#[async_trait]
impl OrderService for OrderQueryService {
    async fn get_orders(
        &self,
        query: &OrderQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedResponse<OrderView>, QueryError> {
        tracing::info!(
            pharmacy_id = ?query.pharmacy_id,
            statuses = ?query.statuses,
            from = ?query.from,
            to = ?query.to,
            sort = %query.sort,
            direction = %query.direction,
            page = query.page,
            page_size = query.page_size,
            "executing order query"
        );

        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        let orders = self.store.all().await?;
        tracing::debug!(count = orders.len(), "read orders from store");

        let (items, total) = self.processor.process(&orders, query, cancel)?;
        tracing::debug!(
            total,
            returned = items.len(),
            page = query.page,
            "order query processed"
        );

        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        Ok(PagedResponse::new(items, query.page, query.page_size, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::{DeliveryType, Order, OrderStatus, PaymentMethod};
    use crate::storage::InMemoryOrderStore;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn store_with(count: u32) -> Arc<InMemoryOrderStore> {
        let orders = (1..=count)
            .map(|n| Order {
                id: Uuid::from_u128(n as u128),
                pharmacy_id: "ph001".to_string(),
                status: OrderStatus::Pending,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::hours(n as i64),
                total_cents: n as i64 * 1_000,
                item_count: 1,
                payment_method: PaymentMethod::Card,
                delivery_type: DeliveryType::Standard,
                notes: String::new(),
            })
            .collect();
        Arc::new(InMemoryOrderStore::new(orders))
    }

    #[tokio::test]
    async fn test_get_orders_assembles_envelope() {
        let service = OrderQueryService::new(store_with(25), 500);
        let mut query = OrderQuery::default();
        query.page = 2;
        query.page_size = 10;

        let page = service
            .get_orders(&query, &CancellationToken::new())
            .await
            .expect("should succeed");

        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 10);
    }

    #[tokio::test]
    async fn test_get_orders_cancelled_before_store_read() {
        let service = OrderQueryService::new(store_with(3), 500);
        let token = CancellationToken::new();
        token.cancel();

        let result = service.get_orders(&OrderQuery::default(), &token).await;
        assert!(matches!(result, Err(QueryError::Cancelled)));
    }

    #[tokio::test]
    async fn test_get_orders_empty_store_yields_empty_page() {
        let service = OrderQueryService::new(Arc::new(InMemoryOrderStore::new(Vec::new())), 500);
        let page = service
            .get_orders(&OrderQuery::default(), &CancellationToken::new())
            .await
            .expect("should succeed");
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}

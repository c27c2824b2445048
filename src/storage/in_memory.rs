//! In-memory implementation of OrderStore

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::OrderStore;
use crate::core::order::Order;

/// Orders held in memory for the process lifetime.
///
/// The collection is fixed at construction, so clones share one allocation
/// and reads need no locking.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(orders),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn all(&self) -> Result<Vec<Order>> {
        Ok(self.orders.as_ref().clone())
    }
}

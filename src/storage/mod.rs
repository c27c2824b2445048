//! Order storage: the read-only data provider behind the query pipeline

pub mod in_memory;
pub mod loader;

pub use in_memory::InMemoryOrderStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::order::Order;

/// Read-only order provider.
///
/// Populated once before the service accepts traffic and never mutated
/// afterwards; implementations may be shared across concurrent requests
/// without synchronization.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Every order currently held.
    async fn all(&self) -> Result<Vec<Order>>;
}

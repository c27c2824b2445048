//! # rx-orders
//!
//! HTTP API over an in-memory pharmacy order collection: filtered, sorted,
//! paginated listings with per-order review flagging.
//!
//! ## Pipeline
//!
//! Raw query parameters are validated first ([`core::validation`], all rules
//! run, all failures collected). Valid queries run through the processor
//! ([`core::processor`]): filter by pharmacy, status and date range, sort
//! with a stable id tie-break, paginate, and flag orders whose value crosses
//! the configured review threshold. The result is shaped into the paged
//! envelope ([`core::query::PagedResponse`]) by the service
//! ([`core::service`]).
//!
//! Orders load once at startup ([`storage::loader`]) into a read-only store
//! shared by all requests; a shutdown-parented cancellation token lets
//! in-flight queries abort all-or-nothing.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rx_orders::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryOrderStore::new(loader::seed_orders()));
//! let service = Arc::new(OrderQueryService::new(store.clone(), 500));
//!
//! let state = AppState {
//!     orders: service,
//!     store,
//!     shutdown: CancellationToken::new(),
//! };
//! serve(state, "127.0.0.1:3000").await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        order::{DeliveryType, Order, OrderStatus, PaymentMethod},
        processor::QueryProcessor,
        query::{OrderQuery, OrderView, PagedResponse},
        service::{OrderQueryService, OrderService, QueryError},
        validation::{ValidationReport, validate},
    };

    // === Storage ===
    pub use crate::storage::{InMemoryOrderStore, OrderStore, loader};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use tokio_util::sync::CancellationToken;
    pub use uuid::Uuid;
}

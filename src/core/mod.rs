//! Core query-processing pipeline: domain model, parameter validation, the
//! filter/sort/paginate/annotate processor, and the service contract tying
//! them together.

pub mod order;
pub mod processor;
pub mod query;
pub mod service;
pub mod validation;

pub use order::{DeliveryType, Order, OrderStatus, PaymentMethod};
pub use processor::QueryProcessor;
pub use query::{OrderQuery, OrderView, PagedResponse};
pub use service::{OrderQueryService, OrderService, QueryError};
pub use validation::{ValidationReport, validate};

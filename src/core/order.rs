//! Pharmacy order domain model
//!
//! Orders are loaded once at startup and never mutated afterwards; the query
//! path only ever reads them and projects new response values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a pharmacy order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in declaration order
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Canonical name as rendered on the wire
    pub fn name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive parse against the canonical names
    pub fn parse_ci(value: &str) -> Option<OrderStatus> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.name().eq_ignore_ascii_case(value))
    }
}

/// How an order was paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    #[serde(rename = "BPAY")]
    Bpay,
    #[serde(rename = "HICAPS")]
    Hicaps,
    Invoice,
}

impl PaymentMethod {
    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Bpay => "BPAY",
            PaymentMethod::Hicaps => "HICAPS",
            PaymentMethod::Invoice => "Invoice",
        }
    }
}

/// How an order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryType {
    Standard,
    Express,
    ClickAndCollect,
}

impl DeliveryType {
    pub fn name(&self) -> &'static str {
        match self {
            DeliveryType::Standard => "Standard",
            DeliveryType::Express => "Express",
            DeliveryType::ClickAndCollect => "ClickAndCollect",
        }
    }
}

/// A single pharmacy order
///
/// `pharmacy_id` follows the `phNNN` convention in the canonical seed data,
/// though the query validator accepts any alphanumeric/hyphen/underscore id
/// of 3 to 50 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub pharmacy_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Order value in minor currency units, never negative
    pub total_cents: i64,
    /// Number of line items, at least 1
    pub item_count: u32,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub notes: String,
}

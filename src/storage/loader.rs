//! Startup order loading
//!
//! Reads the order collection from a JSON file once at boot. A missing or
//! malformed file falls back to a small built-in seed set so the service
//! always starts with data to serve.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::core::order::{DeliveryType, Order, OrderStatus, PaymentMethod};

/// Load orders from `path`, falling back to [`seed_orders`] on any failure.
pub fn load_orders(path: &Path) -> Vec<Order> {
    match try_load(path) {
        Ok(orders) => {
            tracing::info!(count = orders.len(), path = %path.display(), "loaded orders");
            orders
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not load order file, using seed orders"
            );
            seed_orders()
        }
    }
}

fn try_load(path: &Path) -> Result<Vec<Order>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let orders: Vec<Order> =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(orders)
}

/// Three orders across the canonical ph-prefixed pharmacies.
pub fn seed_orders() -> Vec<Order> {
    vec![
        Order {
            id: Uuid::new_v4(),
            pharmacy_id: "ph001".to_string(),
            status: OrderStatus::Shipped,
            created_at: Utc::now() - Duration::days(1),
            total_cents: 12_000,
            item_count: 2,
            payment_method: PaymentMethod::Card,
            delivery_type: DeliveryType::Standard,
            notes: "First order".to_string(),
        },
        Order {
            id: Uuid::new_v4(),
            pharmacy_id: "ph002".to_string(),
            status: OrderStatus::Pending,
            created_at: Utc::now() - Duration::days(2),
            total_cents: 34_000,
            item_count: 5,
            payment_method: PaymentMethod::Hicaps,
            delivery_type: DeliveryType::ClickAndCollect,
            notes: "Second order".to_string(),
        },
        Order {
            id: Uuid::new_v4(),
            pharmacy_id: "ph003".to_string(),
            status: OrderStatus::Processing,
            created_at: Utc::now() - Duration::days(3),
            total_cents: 56_000,
            item_count: 3,
            payment_method: PaymentMethod::Bpay,
            delivery_type: DeliveryType::Express,
            notes: "Third order".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(
            file,
            r#"[{{
                "id": "a3bb189e-8bf9-3888-9912-ace4e6543002",
                "pharmacyId": "ph007",
                "status": "Delivered",
                "createdAt": "2024-05-01T10:30:00Z",
                "totalCents": 7500,
                "itemCount": 1,
                "paymentMethod": "Invoice",
                "deliveryType": "Standard",
                "notes": ""
            }}]"#
        )
        .expect("should write");

        let orders = load_orders(file.path());
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].pharmacy_id, "ph007");
        assert_eq!(orders[0].status, OrderStatus::Delivered);
    }

    #[test]
    fn test_missing_file_falls_back_to_seed() {
        let orders = load_orders(Path::new("/nonexistent/orders.json"));
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].pharmacy_id, "ph001");
        assert_eq!(orders[2].payment_method, PaymentMethod::Bpay);
    }

    #[test]
    fn test_malformed_file_falls_back_to_seed() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(file, "{{ not json ]").expect("should write");

        let orders = load_orders(file.path());
        assert_eq!(orders.len(), 3);
    }

    #[test]
    fn test_seed_orders_are_well_formed() {
        for order in seed_orders() {
            assert!(order.total_cents >= 0);
            assert!(order.item_count >= 1);
            assert!(order.pharmacy_id.starts_with("ph"));
        }
    }
}

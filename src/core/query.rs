//! Query parameters, wire projections and the paged response envelope

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::order::Order;

/// Query parameters for the order listing endpoint
///
/// All parameters are optional on the wire; sort, direction, page and
/// pageSize have the defaults the HTTP contract promises.
///
/// # Example
/// ```text
/// GET /api/orders?pharmacyId=ph001&status=Shipped&status=Packed&page=2&pageSize=10
/// GET /api/orders?from=2024-01-01&to=2024-06-30&sort=totalCents&direction=asc
/// ```
#[derive(Debug, Clone)]
pub struct OrderQuery {
    pub pharmacy_id: Option<String>,
    /// Raw status names as supplied; matched case-insensitively downstream
    pub statuses: Option<Vec<String>>,
    /// Inclusive lower bound on createdAt
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on createdAt
    pub to: Option<DateTime<Utc>>,
    pub sort: String,
    pub direction: String,
    pub page: i64,
    pub page_size: i64,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            pharmacy_id: None,
            statuses: None,
            from: None,
            to: None,
            sort: default_sort(),
            direction: default_direction(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_sort() -> String {
    "createdAt".to_string()
}

fn default_direction() -> String {
    "desc".to_string()
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl OrderQuery {
    /// Build a query from raw query-string pairs.
    ///
    /// Keys are matched case-insensitively and `status` may repeat. Every
    /// malformed value produces one readable message; all messages are
    /// collected so the caller can reject the request in a single round trip.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, Vec<String>> {
        let mut query = Self::default();
        let mut statuses: Vec<String> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for (key, value) in pairs {
            match key.to_ascii_lowercase().as_str() {
                "pharmacyid" => query.pharmacy_id = Some(value.clone()),
                "status" => statuses.push(value.clone()),
                "from" => match parse_timestamp(value) {
                    Some(ts) => query.from = Some(ts),
                    None => errors.push(format!("From date '{value}' is not a valid timestamp")),
                },
                "to" => match parse_timestamp(value) {
                    Some(ts) => query.to = Some(ts),
                    None => errors.push(format!("To date '{value}' is not a valid timestamp")),
                },
                "sort" => query.sort = value.clone(),
                "direction" => query.direction = value.clone(),
                "page" => match value.parse::<i64>() {
                    Ok(page) => query.page = page,
                    Err(_) => errors.push(format!("Page '{value}' is not a valid integer")),
                },
                "pagesize" => match value.parse::<i64>() {
                    Ok(page_size) => query.page_size = page_size,
                    Err(_) => errors.push(format!("Page size '{value}' is not a valid integer")),
                },
                // Unknown parameters are ignored
                _ => {}
            }
        }

        if !statuses.is_empty() {
            query.statuses = Some(statuses);
        }

        if errors.is_empty() { Ok(query) } else { Err(errors) }
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, and bare `YYYY-MM-DD`
/// (interpreted as midnight UTC).
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Wire projection of an order, enums rendered as their names
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: Uuid,
    pub pharmacy_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub total_cents: i64,
    pub item_count: u32,
    pub payment_method: String,
    pub delivery_type: String,
    pub notes: String,
    /// Present (and true) only when the order value crosses the review
    /// threshold; omitted otherwise, never an explicit false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_review: Option<bool>,
}

impl OrderView {
    pub fn from_order(order: &Order, needs_review: bool) -> Self {
        Self {
            id: order.id,
            pharmacy_id: order.pharmacy_id.clone(),
            status: order.status.name().to_string(),
            created_at: order.created_at,
            total_cents: order.total_cents,
            item_count: order.item_count,
            payment_method: order.payment_method.name().to_string(),
            delivery_type: order.delivery_type.name().to_string(),
            notes: order.notes.clone(),
            needs_review: needs_review.then_some(true),
        }
    }
}

/// Paged response envelope
///
/// `total` counts the filtered set before pagination, so
/// `items.len() == min(page_size, max(0, total - (page-1)*page_size))`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl<T> PagedResponse<T> {
    /// Assemble the envelope; pure shaping, no business logic
    pub fn new(items: Vec<T>, page: i64, page_size: i64, total: i64) -> Self {
        Self {
            items,
            page,
            page_size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::{DeliveryType, OrderStatus, PaymentMethod};
    use chrono::TimeZone;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = OrderQuery::default();
        assert_eq!(query.sort, "createdAt");
        assert_eq!(query.direction, "desc");
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
        assert!(query.pharmacy_id.is_none());
        assert!(query.statuses.is_none());
    }

    #[test]
    fn test_from_pairs_empty_yields_defaults() {
        let query = OrderQuery::from_pairs(&[]).expect("should parse");
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn test_from_pairs_repeated_status_collects_all() {
        let query = OrderQuery::from_pairs(&pairs(&[
            ("status", "Shipped"),
            ("status", "Packed"),
        ]))
        .expect("should parse");
        assert_eq!(
            query.statuses,
            Some(vec!["Shipped".to_string(), "Packed".to_string()])
        );
    }

    #[test]
    fn test_from_pairs_keys_are_case_insensitive() {
        let query = OrderQuery::from_pairs(&pairs(&[
            ("PharmacyId", "ph001"),
            ("PAGESIZE", "5"),
        ]))
        .expect("should parse");
        assert_eq!(query.pharmacy_id.as_deref(), Some("ph001"));
        assert_eq!(query.page_size, 5);
    }

    #[test]
    fn test_from_pairs_unknown_keys_ignored() {
        let query = OrderQuery::from_pairs(&pairs(&[("foo", "bar")])).expect("should parse");
        assert!(query.pharmacy_id.is_none());
    }

    #[test]
    fn test_from_pairs_bad_page_collected_as_error() {
        let errors = OrderQuery::from_pairs(&pairs(&[("page", "abc")]))
            .expect_err("should reject");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Page 'abc'"));
    }

    #[test]
    fn test_from_pairs_collects_every_malformed_value() {
        let errors = OrderQuery::from_pairs(&pairs(&[
            ("page", "abc"),
            ("pageSize", "xyz"),
            ("from", "not-a-date"),
        ]))
        .expect_err("should reject");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-05-01T10:30:00Z").expect("should parse");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_datetime() {
        let ts = parse_timestamp("2024-05-01T10:30:00").expect("should parse");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_bare_date_is_midnight_utc() {
        let ts = parse_timestamp("2024-05-01").expect("should parse");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_garbage_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_order_view_renders_enum_names_and_omits_needs_review() {
        let order = Order {
            id: Uuid::new_v4(),
            pharmacy_id: "ph001".to_string(),
            status: OrderStatus::Shipped,
            created_at: Utc::now(),
            total_cents: 12000,
            item_count: 2,
            payment_method: PaymentMethod::Bpay,
            delivery_type: DeliveryType::Express,
            notes: "note".to_string(),
        };

        let view = OrderView::from_order(&order, false);
        let json = serde_json::to_value(&view).expect("should serialize");

        assert_eq!(json["status"], "Shipped");
        assert_eq!(json["paymentMethod"], "BPAY");
        assert_eq!(json["deliveryType"], "Express");
        assert!(json.get("needsReview").is_none());

        let flagged = OrderView::from_order(&order, true);
        let json = serde_json::to_value(&flagged).expect("should serialize");
        assert_eq!(json["needsReview"], true);
    }

    #[test]
    fn test_paged_response_serializes_camel_case() {
        let response = PagedResponse::new(vec![1, 2, 3], 2, 10, 25);
        let json = serde_json::to_value(&response).expect("should serialize");
        assert_eq!(json["page"], 2);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["total"], 25);
        assert_eq!(json["items"].as_array().map(|a| a.len()), Some(3));
    }
}

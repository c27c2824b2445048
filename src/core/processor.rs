//! The filter → sort → paginate → annotate pipeline
//!
//! Runs over the read-only order collection with already-validated (or
//! deliberately permissive) parameters. Produces new response values only;
//! orders themselves are never touched.

use std::cmp::Ordering;

use tokio_util::sync::CancellationToken;

use crate::core::order::Order;
use crate::core::query::{OrderQuery, OrderView};
use crate::core::service::QueryError;

/// Applies the order-query pipeline over an in-memory collection.
pub struct QueryProcessor {
    threshold_cents: i64,
}

impl QueryProcessor {
    /// `threshold_cents` is the review cutoff fixed at startup.
    pub fn new(threshold_cents: i64) -> Self {
        Self { threshold_cents }
    }

    /// Run filter → sort → paginate → review annotation.
    ///
    /// Returns the page of wire views plus the filtered (pre-pagination)
    /// total. The token is checked before the sort; a cancelled token aborts
    /// with [`QueryError::Cancelled`] and no partial output. Pages beyond
    /// the available data yield an empty slice, not an error.
    pub fn process(
        &self,
        orders: &[Order],
        query: &OrderQuery,
        cancel: &CancellationToken,
    ) -> Result<(Vec<OrderView>, i64), QueryError> {
        let mut filtered: Vec<&Order> = orders
            .iter()
            .filter(|order| matches_pharmacy(order, query.pharmacy_id.as_deref()))
            .filter(|order| matches_statuses(order, query.statuses.as_deref()))
            .filter(|order| matches_date_range(order, query.from, query.to))
            .collect();

        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        sort_orders(&mut filtered, &query.sort, &query.direction);

        let total = filtered.len() as i64;

        let skip = ((query.page - 1).max(0) * query.page_size.max(0)) as usize;
        let take = query.page_size.max(0) as usize;

        let items = filtered
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|order| OrderView::from_order(order, order.total_cents > self.threshold_cents))
            .collect();

        Ok((items, total))
    }
}

fn matches_pharmacy(order: &Order, wanted: Option<&str>) -> bool {
    wanted.is_none_or(|id| order.pharmacy_id.eq_ignore_ascii_case(id))
}

fn matches_statuses(order: &Order, wanted: Option<&[String]>) -> bool {
    wanted.is_none_or(|statuses| {
        statuses
            .iter()
            .any(|status| order.status.name().eq_ignore_ascii_case(status))
    })
}

fn matches_date_range(
    order: &Order,
    from: Option<chrono::DateTime<chrono::Utc>>,
    to: Option<chrono::DateTime<chrono::Utc>>,
) -> bool {
    from.is_none_or(|from| order.created_at >= from)
        && to.is_none_or(|to| order.created_at <= to)
}

/// Sort by the requested key and direction, tie-breaking by id ascending so
/// the ordering is total and pagination is stable across identical calls.
/// An unrecognized sort key falls back to createdAt-descending; the
/// validator rejects such keys before they reach this point, so the fallback
/// only matters for callers that skip validation.
fn sort_orders(orders: &mut [&Order], sort: &str, direction: &str) {
    let descending = !direction.eq_ignore_ascii_case("asc");

    match sort.to_ascii_lowercase().as_str() {
        "createdat" => orders.sort_by(|a, b| {
            directed(a.created_at.cmp(&b.created_at), descending).then_with(|| a.id.cmp(&b.id))
        }),
        "totalcents" => orders.sort_by(|a, b| {
            directed(a.total_cents.cmp(&b.total_cents), descending).then_with(|| a.id.cmp(&b.id))
        }),
        _ => orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))),
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending { ordering.reverse() } else { ordering }
}

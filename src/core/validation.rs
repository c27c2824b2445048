//! Query parameter validation
//!
//! Every rule runs on every call and all failures are collected, so a caller
//! sees everything wrong with a request in one round trip. Validation never
//! fails with an error value of its own; the report is the result.

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::core::order::OrderStatus;
use crate::core::query::OrderQuery;

const VALID_SORTS: [&str; 2] = ["createdat", "totalcents"];
const VALID_DIRECTIONS: [&str; 2] = ["asc", "desc"];

static PHARMACY_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_-]+$").expect("pharmacy id pattern compiles"));

/// Outcome of validating an [`OrderQuery`]
///
/// Produced fresh per call; `errors` preserves rule declaration order.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validate query parameters, collecting every failure.
///
/// Deterministic and side-effect free.
pub fn validate(query: &OrderQuery) -> ValidationReport {
    let mut errors: Vec<String> = Vec::new();

    if let Some(pharmacy_id) = &query.pharmacy_id {
        check_pharmacy_id(pharmacy_id, &mut errors);
    }

    if let Some(statuses) = &query.statuses {
        if !statuses
            .iter()
            .all(|status| OrderStatus::parse_ci(status).is_some())
        {
            errors.push(format!("Status must be one of: {}", status_names()));
        }
    }

    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            errors.push("From date must be less than or equal to To date".to_string());
        }
    }

    if let Some(to) = query.to {
        if !is_reasonable_date(to) {
            errors.push("To date must be a reasonable date".to_string());
        }
    }

    if let Some(from) = query.from {
        if !is_reasonable_date(from) {
            errors.push("From date must be a reasonable date".to_string());
        }
    }

    if !VALID_SORTS.contains(&query.sort.to_ascii_lowercase().as_str()) {
        errors.push(format!("Sort must be one of: {}", VALID_SORTS.join(", ")));
    }

    if !VALID_DIRECTIONS.contains(&query.direction.to_ascii_lowercase().as_str()) {
        errors.push(format!(
            "Direction must be one of: {}",
            VALID_DIRECTIONS.join(", ")
        ));
    }

    if query.page < 1 {
        errors.push("Page must be greater than or equal to 1".to_string());
    }

    if !(1..=100).contains(&query.page_size) {
        errors.push("Page size must be between 1 and 100".to_string());
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_pharmacy_id(pharmacy_id: &str, errors: &mut Vec<String>) {
    if pharmacy_id.is_empty() {
        errors.push("Pharmacy ID cannot be empty".to_string());
    }
    if !(3..=50).contains(&pharmacy_id.chars().count()) {
        errors.push("Pharmacy ID must be between 3 and 50 characters".to_string());
    }
    if !PHARMACY_ID_PATTERN.is_match(pharmacy_id) {
        errors.push(
            "Pharmacy ID must contain only alphanumeric characters, hyphens, and underscores"
                .to_string(),
        );
    }
}

fn status_names() -> String {
    OrderStatus::ALL
        .iter()
        .map(|status| status.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Years in [1900, current year + 10] count as reasonable
fn is_reasonable_date(date: DateTime<Utc>) -> bool {
    let year = date.year();
    (1900..=Utc::now().year() + 10).contains(&year)
}

//! Configuration loading and management
//!
//! Settings come from an optional YAML file with environment variable
//! overrides on top. Every field has a default, so the service runs with no
//! configuration present at all.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Review cutoff applied when nothing else is configured, in minor units
pub const DEFAULT_REVIEW_THRESHOLD_CENTS: i64 = 500;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// JSON file the order store is seeded from
    pub orders_file: String,

    /// Order value above which needsReview is set
    pub review_threshold_cents: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            orders_file: "sample-orders.json".to_string(),
            review_threshold_cents: DEFAULT_REVIEW_THRESHOLD_CENTS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the file if readable, then apply environment overrides.
    ///
    /// A missing or unreadable file is not an error; the defaults apply.
    pub fn load(path: &str) -> Self {
        let mut config = match Self::from_yaml_file(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::info!(path, error = %err, "no config file, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("ORDERS_FILE").ok(),
            std::env::var("REVIEW_THRESHOLD_CENTS").ok(),
        );
        config
    }

    /// An unparsable threshold override is ignored, keeping the configured
    /// or default value.
    fn apply_overrides(
        &mut self,
        bind_addr: Option<String>,
        orders_file: Option<String>,
        review_threshold: Option<String>,
    ) {
        if let Some(addr) = bind_addr {
            self.bind_addr = addr;
        }
        if let Some(file) = orders_file {
            self.orders_file = file;
        }
        if let Some(raw) = review_threshold {
            match raw.parse::<i64>() {
                Ok(threshold) => self.review_threshold_cents = threshold,
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable REVIEW_THRESHOLD_CENTS")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.orders_file, "sample-orders.json");
        assert_eq!(config.review_threshold_cents, 500);
    }

    #[test]
    fn test_from_yaml_str_partial_file_keeps_defaults() {
        let config =
            AppConfig::from_yaml_str("review_threshold_cents: 50000\n").expect("should parse");
        assert_eq!(config.review_threshold_cents, 50_000);
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_from_yaml_str_full_file() {
        let yaml = "bind_addr: 0.0.0.0:8080\norders_file: orders.json\nreview_threshold_cents: 25000\n";
        let config = AppConfig::from_yaml_str(yaml).expect("should parse");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.orders_file, "orders.json");
        assert_eq!(config.review_threshold_cents, 25_000);
    }

    #[test]
    fn test_from_yaml_str_invalid_is_error() {
        assert!(AppConfig::from_yaml_str("review_threshold_cents: [nope").is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = AppConfig::default();
        config.apply_overrides(
            Some("0.0.0.0:9999".to_string()),
            Some("other.json".to_string()),
            Some("75000".to_string()),
        );
        assert_eq!(config.bind_addr, "0.0.0.0:9999");
        assert_eq!(config.orders_file, "other.json");
        assert_eq!(config.review_threshold_cents, 75_000);
    }

    #[test]
    fn test_unparsable_threshold_override_keeps_default() {
        let mut config = AppConfig::default();
        config.apply_overrides(None, None, Some("plenty".to_string()));
        assert_eq!(config.review_threshold_cents, DEFAULT_REVIEW_THRESHOLD_CENTS);
    }
}

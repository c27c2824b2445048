//! Service entry point: configuration, data load, serve.

use std::path::Path;
use std::sync::Arc;

use rx_orders::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rx_orders=info,tower_http=info".into()),
        )
        .init();

    let config_path = std::env::var("APP_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = AppConfig::load(&config_path);
    tracing::info!(
        bind_addr = %config.bind_addr,
        orders_file = %config.orders_file,
        review_threshold_cents = config.review_threshold_cents,
        "configuration loaded"
    );

    let orders = loader::load_orders(Path::new(&config.orders_file));
    let store = Arc::new(InMemoryOrderStore::new(orders));
    tracing::info!(count = store.len(), "order store ready");

    let service = Arc::new(OrderQueryService::new(
        store.clone(),
        config.review_threshold_cents,
    ));

    let state = AppState {
        orders: service,
        store,
        shutdown: CancellationToken::new(),
    };

    serve(state, &config.bind_addr).await
}

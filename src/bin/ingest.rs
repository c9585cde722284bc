//! Out-of-band ingestion job: fetches the full upstream ATM listing and
//! loads it into the store, reporting per-record failures instead of
//! aborting the batch.

use tracing::{error, info, warn};

use atm_locator::config::Settings;
use atm_locator::services::{run_ingestion, NessieClient, PostgresClient};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting ATM ingestion job...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize PostgreSQL client
    let store = PostgresClient::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
    )
    .await
    .unwrap_or_else(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        panic!("PostgreSQL connection error: {}", e);
    });

    let upstream = NessieClient::new(settings.upstream.base_url, settings.upstream.api_key);

    info!("Fetching ATMs from the upstream API...");

    let report = run_ingestion(&upstream, &store).await;

    if !report.upstream_complete {
        warn!("Pagination stopped early; this report covers a partial run");
    }

    for failure in &report.failed {
        warn!("Record {} failed: {}", failure.id, failure.reason);
    }

    info!(
        "Ingestion finished: {} inserted, {} failed",
        report.succeeded,
        report.failed.len()
    );
}

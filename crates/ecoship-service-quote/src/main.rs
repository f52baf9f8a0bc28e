//! Shipping quote HTTP microservice.
//!
//! # Configuration
//!
//! - `ECOSHIP_CATALOG_PATH` - JSON catalog file (optional, builtin tables otherwise)
//! - `ECOSHIP_LANES_PATH` - CSV lane table replacing the catalog lanes (optional)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint settings
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins, `*` for any
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use ecoship_lib::CatalogProvider;
use ecoship_service_quote::{SERVICE_NAME, router};
use ecoship_service_shared::{
    AppState, LoggingConfig, MetricsConfig, cors_layer, init_logging, init_metrics,
};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(SERVICE_NAME);
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let origins =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string());

    info!(port = port, "starting quote service");

    let state = AppState::from_env().map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(
        tiers = state.catalog().tiers().len(),
        lanes = state.catalog().lanes().len(),
        "application state loaded"
    );

    let app = router(state, &metrics_config.path).layer(cors_layer(&origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

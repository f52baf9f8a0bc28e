//! Shared infrastructure for ecoship HTTP microservices.
//!
//! This crate provides the HTTP glue around `ecoship-lib`:
//!
//! - [`AppState`]: The reference catalog, loaded once and shared by every handler
//! - [`health`]: Liveness and readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking, metrics, and CORS
//! - [`QuoteRequestBody`]: The quote request as posted by clients, with validation
//!
//! # Architecture
//!
//! Handlers stay thin. Pricing, carbon, scoring, and delivery dates all live in
//! `ecoship-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call ecoship_lib::generate_quotes                        │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a builtin-catalog state and request
//! helpers. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_fallback_lane, record_quote_co2, record_quote_cost,
    record_quote_failed, record_quotes_generated, MetricsConfig, MetricsError,
};
pub use middleware::{cors_layer, extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    failure_reason, from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_NO_QUOTES, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{QuoteRequestBody, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError, CATALOG_PATH_ENV, LANES_PATH_ENV};

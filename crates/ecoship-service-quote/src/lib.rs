//! Router and handlers for the shipping quote microservice.
//!
//! Kept in a library so the binary and the integration tests build the same
//! [`Router`].
//!
//! # Endpoints
//!
//! - `POST /api/v1/quotes` - Quote every tier for a parcel
//! - `GET /api/v1/lanes` - Lanes in the loaded catalog
//! - `GET /api/v1/tiers` - Tiers with their nominal eco point ranges
//! - `GET /api/v1/demo` - New York to Los Angeles, 5 kg, shipping today
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use ecoship_lib::{
    CatalogProvider, Lane, QuoteRequest, QuoteSet, Tier, generate_quotes, nominal_point_range,
};
use ecoship_service_shared::{
    AppState, MetricsLayer, ProblemDetails, QuoteRequestBody, ServiceResponse, Validate,
    extract_or_generate_request_id, failure_reason, from_lib_error, health_live, health_ready,
    metrics_handler, record_fallback_lane, record_quote_co2, record_quote_cost,
    record_quote_failed, record_quotes_generated,
};

/// Service label attached to business metrics.
pub const SERVICE_NAME: &str = "quote";

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Body of `GET /api/v1/lanes`.
#[derive(Debug, Serialize)]
pub struct LanesResponse {
    pub total: usize,
    pub lanes: Vec<Lane>,
}

/// One entry of `GET /api/v1/tiers`.
#[derive(Debug, Serialize)]
pub struct TierEntry {
    pub slug: &'static str,
    #[serde(flatten)]
    pub tier: Tier,
    pub eco_points_min: u8,
    pub eco_points_max: u8,
}

/// Body of `GET /api/v1/tiers`.
#[derive(Debug, Serialize)]
pub struct TiersResponse {
    pub total: usize,
    pub tiers: Vec<TierEntry>,
}

/// Build the router with the metrics endpoint at `/metrics`.
pub fn app(state: AppState) -> Router {
    router(state, "/metrics")
}

/// Build the router with a custom metrics path.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/api/v1/quotes", post(quotes_handler))
        .route("/api/v1/lanes", get(lanes_handler))
        .route("/api/v1/tiers", get(tiers_handler))
        .route("/api/v1/demo", get(demo_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle POST /api/v1/quotes requests.
async fn quotes_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<QuoteRequestBody>, JsonRejection>,
) -> ApiResponse<QuoteSet> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_quote_failed("validation_error", SERVICE_NAME);
            return ApiResponse::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id,
            ));
        }
    };

    info!(
        request_id = %request_id,
        origin = %request.origin_city,
        destination = %request.destination_city,
        weight_kg = request.weight_kg,
        "handling quote request"
    );

    if let Err(problem) = request.validate(&request_id) {
        record_quote_failed("validation_error", SERVICE_NAME);
        return ApiResponse::Error(*problem);
    }

    quote(&state, &request.to_lib_request(), &request_id)
}

/// Handle GET /api/v1/demo requests.
async fn demo_handler(State(state): State<AppState>, headers: HeaderMap) -> ApiResponse<QuoteSet> {
    let request_id = extract_or_generate_request_id(&headers).to_string();
    let request = QuoteRequest::new("New York", "Los Angeles", 5.0);
    quote(&state, &request, &request_id)
}

/// Run the pipeline and record business metrics.
fn quote(state: &AppState, request: &QuoteRequest, request_id: &str) -> ApiResponse<QuoteSet> {
    let set = match generate_quotes(state.catalog(), request) {
        Ok(set) => set,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "quote generation failed");
            record_quote_failed(failure_reason(&e), SERVICE_NAME);
            return ApiResponse::Error(from_lib_error(&e, request_id));
        }
    };

    let route = &set.route_info;
    record_quotes_generated(set.quotes.len(), route.matched.as_str(), SERVICE_NAME);
    if route.is_fallback {
        record_fallback_lane(SERVICE_NAME);
    }
    for quote in &set.quotes {
        record_quote_cost(quote.tier.key(), quote.cost_usd);
        record_quote_co2(quote.tier.key(), quote.total_co2_kg());
    }

    info!(
        request_id = %request_id,
        lane = %route.lane_key,
        fallback = route.is_fallback,
        quotes = set.quotes.len(),
        "quotes computed successfully"
    );

    ApiResponse::Success(ServiceResponse::new(set))
}

/// Handle GET /api/v1/lanes requests.
async fn lanes_handler(State(state): State<AppState>) -> ApiResponse<LanesResponse> {
    let lanes = state.catalog().lanes().to_vec();
    ApiResponse::Success(ServiceResponse::new(LanesResponse {
        total: lanes.len(),
        lanes,
    }))
}

/// Handle GET /api/v1/tiers requests.
async fn tiers_handler(State(state): State<AppState>) -> ApiResponse<TiersResponse> {
    let tiers: Vec<TierEntry> = state
        .catalog()
        .tiers()
        .iter()
        .map(|tier| {
            let (min, max) = nominal_point_range(tier.id);
            TierEntry {
                slug: tier.id.slug(),
                tier: tier.clone(),
                eco_points_min: min,
                eco_points_max: max,
            }
        })
        .collect();

    ApiResponse::Success(ServiceResponse::new(TiersResponse {
        total: tiers.len(),
        tiers,
    }))
}

//! Test utilities for microservice handler testing.
//!
//! Provides a shared builtin-catalog state, the lane fixture path, and
//! ready-made request bodies.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::request::QuoteRequestBody;
use crate::state::AppState;

/// Path to the CSV lane fixture.
pub const TEST_LANES_FIXTURE_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures/lanes.csv");

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Get a shared test AppState backed by the builtin catalog.
pub fn test_state() -> AppState {
    TEST_STATE.get_or_init(AppState::builtin).clone()
}

/// State whose lane table is the three-lane CSV fixture.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded. This indicates a test
/// configuration issue.
pub fn fixture_lanes_state() -> AppState {
    let path = fixture_lanes_path();
    AppState::load(None, Some(&path))
        .unwrap_or_else(|e| panic!("failed to load lane fixture from {:?}: {}", path, e))
}

/// Get the absolute path to the lane fixture.
pub fn fixture_lanes_path() -> PathBuf {
    PathBuf::from(TEST_LANES_FIXTURE_PATH)
}

/// City names used across service tests.
pub mod fixture_cities {
    pub const NEW_YORK: &str = "New York";
    pub const LOS_ANGELES: &str = "Los Angeles";
    /// Not in any builtin lane, so quotes use a fallback lane.
    pub const PORTLAND: &str = "Portland";
    pub const NASHVILLE: &str = "Nashville";
}

/// A quote body with a fixed Monday ship date.
pub fn quote_body(origin: &str, destination: &str, weight_kg: f64) -> QuoteRequestBody {
    QuoteRequestBody {
        origin_city: origin.to_string(),
        destination_city: destination.to_string(),
        weight_kg,
        ship_date: Some("2024-03-04".to_string()),
    }
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

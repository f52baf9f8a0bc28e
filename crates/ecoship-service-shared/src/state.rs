//! Application state for HTTP microservices.
//!
//! Handlers reach the reference catalog through [`AppState`]. The catalog is
//! immutable after startup, so sharing needs no locking.

use std::path::Path;
use std::sync::Arc;

use ecoship_lib::{load_lanes_from_path, CatalogProvider, Error as LibError, ReferenceCatalog};

/// Environment variable naming an optional JSON catalog file.
pub const CATALOG_PATH_ENV: &str = "ECOSHIP_CATALOG_PATH";

/// Environment variable naming an optional CSV lane table.
pub const LANES_PATH_ENV: &str = "ECOSHIP_LANES_PATH";

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load or validate the JSON catalog.
    CatalogLoad(LibError),

    /// Failed to load or validate the lane table.
    LanesLoad(LibError),

    /// Catalog file not found.
    CatalogNotFound(String),

    /// Lane table file not found.
    LanesNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CatalogLoad(e) => write!(f, "failed to load catalog: {}", e),
            Self::LanesLoad(e) => write!(f, "failed to load lane table: {}", e),
            Self::CatalogNotFound(path) => write!(f, "catalog not found: {}", path),
            Self::LanesNotFound(path) => write!(f, "lane table not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogLoad(e) | Self::LanesLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::CatalogLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; the catalog sits behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use ecoship_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let tiers = state.catalog().tiers();
///     // ... use tiers
/// }
///
/// let state = AppState::builtin();
/// let app = Router::new()
///     .route("/api/v1/tiers", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<ReferenceCatalog>,
}

impl AppState {
    /// State backed by the builtin tiers, lanes, and weight bands.
    pub fn builtin() -> Self {
        Self::from_catalog(ReferenceCatalog::builtin())
    }

    /// Wrap an already-built catalog.
    pub fn from_catalog(catalog: ReferenceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Load the catalog from optional files.
    ///
    /// Without a catalog path the builtin tables are used. A lane table, when
    /// given, replaces the catalog's lanes and keeps its tiers.
    pub fn load(
        catalog_path: Option<&Path>,
        lanes_path: Option<&Path>,
    ) -> Result<Self, AppStateError> {
        let catalog = match catalog_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppStateError::CatalogNotFound(path.display().to_string()));
                }
                tracing::info!(path = %path.display(), "loading catalog");
                ReferenceCatalog::from_json_path(path).map_err(AppStateError::CatalogLoad)?
            }
            None => {
                tracing::info!("using builtin catalog");
                ReferenceCatalog::builtin()
            }
        };

        let catalog = match lanes_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppStateError::LanesNotFound(path.display().to_string()));
                }
                tracing::info!(path = %path.display(), "loading lane table");
                let lanes = load_lanes_from_path(path).map_err(AppStateError::LanesLoad)?;
                catalog.with_lanes(lanes).map_err(AppStateError::LanesLoad)?
            }
            None => catalog,
        };

        tracing::info!(
            tiers = catalog.tiers().len(),
            lanes = catalog.lanes().len(),
            "catalog loaded successfully"
        );

        Ok(Self::from_catalog(catalog))
    }

    /// Load using [`CATALOG_PATH_ENV`] and [`LANES_PATH_ENV`].
    pub fn from_env() -> Result<Self, AppStateError> {
        let catalog = std::env::var_os(CATALOG_PATH_ENV).filter(|v| !v.is_empty());
        let lanes = std::env::var_os(LANES_PATH_ENV).filter(|v| !v.is_empty());
        Self::load(
            catalog.as_deref().map(Path::new),
            lanes.as_deref().map(Path::new),
        )
    }

    /// Access the loaded catalog.
    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Get an Arc-wrapped reference to the catalog.
    pub fn catalog_arc(&self) -> Arc<ReferenceCatalog> {
        Arc::clone(&self.catalog)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tier_count", &self.catalog.tiers().len())
            .field("lane_count", &self.catalog.lanes().len())
            .field("source", &self.catalog.source_path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_app_state_builtin() {
        let state = AppState::builtin();
        assert_eq!(state.catalog().tiers().len(), 6);
        assert_eq!(state.catalog().lanes().len(), 15);
    }

    #[test]
    fn test_app_state_clone_shares_catalog() {
        let state1 = AppState::builtin();
        let state2 = state1.clone();
        assert!(Arc::ptr_eq(&state1.catalog_arc(), &state2.catalog_arc()));
    }

    #[test]
    fn test_app_state_debug() {
        let debug = format!("{:?}", AppState::builtin());
        assert!(debug.contains("AppState"));
        assert!(debug.contains("tier_count"));
        assert!(debug.contains("lane_count"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::CatalogNotFound("/path/to/catalog.json".to_string());
        assert!(err.to_string().contains("/path/to/catalog.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_app_state_load_defaults_to_builtin() {
        let state = AppState::load(None, None).unwrap();
        assert_eq!(state.catalog(), &ReferenceCatalog::builtin());
    }

    #[test]
    fn test_app_state_load_nonexistent_catalog() {
        let result = AppState::load(Some(Path::new("/nonexistent/catalog.json")), None);
        match result.unwrap_err() {
            AppStateError::CatalogNotFound(path) => assert!(path.contains("nonexistent")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_app_state_load_nonexistent_lanes() {
        let result = AppState::load(None, Some(Path::new("/nonexistent/lanes.csv")));
        assert!(matches!(result, Err(AppStateError::LanesNotFound(_))));
    }

    #[test]
    fn test_app_state_load_lane_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "origin_city,origin_state,destination_city,destination_state,air_distance_km,ground_distance_km,base_cost_per_kg,complexity"
        )
        .unwrap();
        writeln!(file, "Austin,TX,Oklahoma City,OK,575,620,4.10,simple").unwrap();
        file.flush().unwrap();

        let state = AppState::load(None, Some(file.path())).unwrap();
        assert_eq!(state.catalog().lanes().len(), 1);
        assert_eq!(state.catalog().tiers().len(), 6);
    }

    #[test]
    fn test_app_state_load_malformed_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        file.flush().unwrap();

        let result = AppState::load(Some(file.path()), None);
        assert!(matches!(result, Err(AppStateError::CatalogLoad(_))));
    }
}

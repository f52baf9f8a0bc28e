// Subcommand handlers.
//
// main.rs parses arguments and dispatches here; each module owns one
// subcommand. Catalog loading is shared because every command reads the
// same reference data.

pub mod delivery;
pub mod lanes;
pub mod quote;
pub mod tiers;

use std::path::Path;

use anyhow::{Context, Result};

use ecoship_lib::{load_lanes_from_path, ReferenceCatalog};

/// Build the reference catalog from the builtin tables or the given files.
///
/// A lanes CSV replaces the catalog's lane table and keeps its tiers.
pub fn load_catalog(catalog: Option<&Path>, lanes: Option<&Path>) -> Result<ReferenceCatalog> {
    let base = match catalog {
        Some(path) => ReferenceCatalog::from_json_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => ReferenceCatalog::builtin(),
    };

    let Some(path) = lanes else {
        return Ok(base);
    };

    let lane_table = load_lanes_from_path(path)
        .with_context(|| format!("failed to load lanes from {}", path.display()))?;
    tracing::debug!(lanes = lane_table.len(), path = %path.display(), "loaded lane table");
    base.with_lanes(lane_table)
        .with_context(|| format!("lane table {} is not valid", path.display()))
}

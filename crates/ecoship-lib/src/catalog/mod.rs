//! Reference catalogs: tiers, lanes, and weight bands.
//!
//! The catalog is built once at start-up (from the builtin tables or from a
//! JSON file) and then shared read-only by every request.

mod builtin;
pub mod lane;
pub mod tier;
pub mod weight;

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use lane::{lane_key, load_lanes_from_path, load_lanes_from_reader, Complexity, Lane, Location};
pub use tier::{ServiceClass, Tier, TierBadge, TierId, TransportMix};
pub use weight::{select_band, validate_weight, WeightBand};

/// Read-only access to reference data.
///
/// The quote pipeline depends on this trait rather than on a concrete
/// catalog so alternative sources can be plugged in.
pub trait CatalogProvider {
    fn tiers(&self) -> &[Tier];
    fn lanes(&self) -> &[Lane];
    fn weight_bands(&self) -> &[WeightBand];

    /// Look up a tier by identity.
    fn tier(&self, id: TierId) -> Option<&Tier> {
        self.tiers().iter().find(|t| t.id == id)
    }
}

/// Immutable bundle of tiers, lanes, and weight bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    tiers: Vec<Tier>,
    lanes: Vec<Lane>,
    weight_bands: Vec<WeightBand>,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl ReferenceCatalog {
    /// Build and validate a catalog from its parts.
    ///
    /// Tiers must cover each [`TierId`] exactly once. An empty lane list is
    /// accepted here; quoting against it fails with [`Error::EmptyLaneCatalog`].
    pub fn new(tiers: Vec<Tier>, lanes: Vec<Lane>, weight_bands: Vec<WeightBand>) -> Result<Self> {
        let catalog = Self {
            tiers,
            lanes,
            weight_bands,
            source: None,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The six standard tiers, fifteen lanes, and four weight bands.
    pub fn builtin() -> Self {
        Self {
            tiers: builtin::tiers(),
            lanes: builtin::lanes(),
            weight_bands: builtin::weight_bands(),
            source: None,
        }
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_json_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from a JSON reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Replace the lane table, keeping tiers and weight bands.
    pub fn with_lanes(mut self, lanes: Vec<Lane>) -> Result<Self> {
        self.lanes = lanes;
        self.validate()?;
        Ok(self)
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Validate every tier, lane, and weight band plus cross-table rules.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(Error::EmptyTierCatalog);
        }

        let mut seen = HashSet::new();
        for tier in &self.tiers {
            tier.validate()?;
            if !seen.insert(tier.id) {
                return Err(Error::CatalogValidation {
                    message: format!("duplicate tier {}", tier.id),
                });
            }
        }
        let missing: Vec<&str> = TierId::ALL
            .iter()
            .filter(|id| !seen.contains(*id))
            .map(|id| id.key())
            .collect();
        if !missing.is_empty() {
            return Err(Error::CatalogValidation {
                message: format!("missing tiers: {}", missing.join(", ")),
            });
        }

        for lane in &self.lanes {
            lane.validate()?;
        }

        weight::validate_bands(&self.weight_bands)
    }
}

impl CatalogProvider for ReferenceCatalog {
    fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    fn weight_bands(&self) -> &[WeightBand] {
        &self.weight_bands
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = ReferenceCatalog::builtin();
        catalog.validate().expect("builtin catalog validates");
        assert_eq!(catalog.tiers().len(), 6);
        assert_eq!(catalog.lanes().len(), 15);
        assert_eq!(catalog.weight_bands().len(), 4);
    }

    #[test]
    fn builtin_lane_keys_are_unique() {
        let catalog = ReferenceCatalog::builtin();
        let keys: HashSet<&str> = catalog.lanes().iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys.len(), catalog.lanes().len());
        assert!(keys.contains("NYC_LA"));
        assert!(keys.contains("SALT_LAKE_CITY_PHILADELPHIA"));
    }

    #[test]
    fn missing_tier_is_rejected() {
        let mut tiers = builtin::tiers();
        tiers.retain(|t| t.id != TierId::Ground);
        let err = ReferenceCatalog::new(tiers, builtin::lanes(), builtin::weight_bands())
            .expect_err("five tiers is not a complete catalog");
        assert!(err.to_string().contains("UPS_GROUND"));
    }

    #[test]
    fn empty_lanes_are_accepted_at_construction() {
        let catalog = ReferenceCatalog::new(builtin::tiers(), vec![], builtin::weight_bands())
            .expect("lanes may be empty");
        assert!(catalog.lanes().is_empty());
    }

    #[test]
    fn tier_lookup_by_id() {
        let catalog = ReferenceCatalog::builtin();
        let ground = catalog.tier(TierId::Ground).expect("ground tier");
        assert_eq!(ground.code, "03");
        assert_eq!(ground.minimum_charge_usd, 15.0);
    }
}

//! Lane resolution.
//!
//! Finds the catalog lane for a city pair in either direction, or synthesizes
//! a fallback lane from catalog-wide averages when no lane matches.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::lane::normalize_city;
use crate::catalog::{Complexity, Lane, Location};
use crate::constants::round_to;
use crate::error::{Error, Result};

/// Ground transit days assumed for synthesized lanes.
pub const FALLBACK_GROUND_DAYS: u32 = 4;

/// How a lane was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneMatch {
    /// Catalog lane in its stored direction.
    Direct,
    /// Catalog lane travelled in reverse.
    Reversed,
    /// Synthesized from catalog averages.
    Fallback,
}

impl LaneMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            LaneMatch::Direct => "direct",
            LaneMatch::Reversed => "reversed",
            LaneMatch::Fallback => "fallback",
        }
    }
}

/// A lane ready for pricing, plus how it was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLane {
    pub key: String,
    pub lane: Lane,
    pub matched: LaneMatch,
    /// Known cities resembling any unrecognised endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ResolvedLane {
    pub fn is_fallback(&self) -> bool {
        self.matched == LaneMatch::Fallback
    }
}

/// Bidirectional lane lookup over a lane table.
#[derive(Debug, Clone, Copy)]
pub struct LaneResolver<'a> {
    lanes: &'a [Lane],
}

impl<'a> LaneResolver<'a> {
    pub fn new(lanes: &'a [Lane]) -> Self {
        Self { lanes }
    }

    /// Resolve a city pair to a lane. Never fails for unknown cities; fails
    /// only when the lane table is empty.
    pub fn resolve(&self, origin: &str, destination: &str) -> Result<ResolvedLane> {
        if self.lanes.is_empty() {
            return Err(Error::EmptyLaneCatalog);
        }

        if let Some(found) = self.lookup(origin, destination) {
            debug!(
                lane = %found.key,
                matched = ?found.matched,
                "resolved catalog lane"
            );
            return Ok(found);
        }

        let lane = self.fallback(origin, destination)?;
        let mut suggestions = self.city_suggestions(origin, 3);
        for city in self.city_suggestions(destination, 3) {
            if !suggestions.contains(&city) {
                suggestions.push(city);
            }
        }

        warn!(
            lane = %lane.key,
            origin = %origin,
            destination = %destination,
            suggestions = ?suggestions,
            "no catalog lane for city pair, using fallback estimate"
        );

        Ok(ResolvedLane {
            key: lane.key.clone(),
            lane,
            matched: LaneMatch::Fallback,
            suggestions,
        })
    }

    /// Exact-direction lookup, then reversed-direction lookup.
    pub fn lookup(&self, origin: &str, destination: &str) -> Option<ResolvedLane> {
        if let Some(lane) = self.lanes.iter().find(|l| l.connects(origin, destination)) {
            return Some(ResolvedLane {
                key: lane.key.clone(),
                lane: lane.clone(),
                matched: LaneMatch::Direct,
                suggestions: Vec::new(),
            });
        }

        self.lanes
            .iter()
            .find(|l| l.connects(destination, origin))
            .map(|lane| ResolvedLane {
                key: lane.key.clone(),
                lane: lane.reversed(),
                matched: LaneMatch::Reversed,
                suggestions: Vec::new(),
            })
    }

    /// Synthesize a lane from the arithmetic means of all catalog lanes.
    ///
    /// Distances are rounded to whole kilometres and cost to cents, matching
    /// the precision of catalog data.
    pub fn fallback(&self, origin: &str, destination: &str) -> Result<Lane> {
        if self.lanes.is_empty() {
            return Err(Error::EmptyLaneCatalog);
        }

        let count = self.lanes.len() as f64;
        let mean = |f: fn(&Lane) -> f64| self.lanes.iter().map(f).sum::<f64>() / count;

        let origin = origin.trim();
        let destination = destination.trim();

        Ok(Lane {
            key: format!(
                "FALLBACK_{}_{}",
                origin.to_uppercase(),
                destination.to_uppercase()
            ),
            origin: Location::unknown(origin),
            destination: Location::unknown(destination),
            air_distance_km: mean(|l| l.air_distance_km).round(),
            ground_distance_km: mean(|l| l.ground_distance_km).round(),
            base_cost_per_kg: round_to(mean(|l| l.base_cost_per_kg), 2),
            complexity: Complexity::Moderate,
            estimated_ground_days: FALLBACK_GROUND_DAYS,
            hubs: vec!["Hub City".to_string()],
            description: format!("Estimated route from {origin} to {destination}"),
            is_fallback: true,
        })
    }

    /// Every catalog lane in table order.
    pub fn supported_lanes(&self) -> &'a [Lane] {
        self.lanes
    }

    /// Sorted, de-duplicated city names appearing in the lane table.
    pub fn known_cities(&self) -> Vec<String> {
        self.lanes
            .iter()
            .flat_map(|l| [l.origin.city.clone(), l.destination.city.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Known cities resembling `city`, best match first. Empty when `city` is itself known.
    pub fn city_suggestions(&self, city: &str, limit: usize) -> Vec<String> {
        let needle = normalize_city(city);
        let cities = self.known_cities();
        if cities.iter().any(|c| normalize_city(c) == needle) {
            return Vec::new();
        }

        let mut scored: Vec<(f64, String)> = cities
            .into_iter()
            .map(|c| (strsim::jaro_winkler(&needle, &normalize_city(&c)), c))
            .filter(|(score, _)| *score >= 0.85)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, c)| c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, ReferenceCatalog};

    #[test]
    fn direct_lookup_is_case_insensitive() {
        let catalog = ReferenceCatalog::builtin();
        let resolver = LaneResolver::new(catalog.lanes());
        let found = resolver.resolve("  new york ", "LOS ANGELES").unwrap();
        assert_eq!(found.key, "NYC_LA");
        assert_eq!(found.matched, LaneMatch::Direct);
        assert_eq!(found.lane.origin.city, "New York");
    }

    #[test]
    fn reversed_lookup_swaps_endpoints_only() {
        let catalog = ReferenceCatalog::builtin();
        let resolver = LaneResolver::new(catalog.lanes());
        let forward = resolver.resolve("Boston", "Dallas").unwrap();
        let backward = resolver.resolve("Dallas", "Boston").unwrap();

        assert_eq!(backward.matched, LaneMatch::Reversed);
        assert_eq!(backward.key, forward.key);
        assert_eq!(backward.lane.origin, forward.lane.destination);
        assert_eq!(backward.lane.destination, forward.lane.origin);
        assert_eq!(backward.lane.air_distance_km, forward.lane.air_distance_km);
        assert_eq!(
            backward.lane.ground_distance_km,
            forward.lane.ground_distance_km
        );
        assert_eq!(backward.lane.base_cost_per_kg, forward.lane.base_cost_per_kg);
    }

    #[test]
    fn fallback_uses_catalog_averages() {
        let catalog = ReferenceCatalog::builtin();
        let resolver = LaneResolver::new(catalog.lanes());
        let found = resolver.resolve("Portland", "Nashville").unwrap();

        assert!(found.is_fallback());
        assert!(found.lane.is_fallback);
        assert_eq!(found.key, "FALLBACK_PORTLAND_NASHVILLE");
        assert_eq!(found.lane.air_distance_km, 2552.0);
        assert_eq!(found.lane.ground_distance_km, 3001.0);
        assert_eq!(found.lane.base_cost_per_kg, 7.0);
        assert_eq!(found.lane.complexity, Complexity::Moderate);
        assert_eq!(found.lane.hubs, vec!["Hub City"]);
        assert_eq!(found.lane.origin.state, "XX");
        // Both cities are known, so nothing to suggest.
        assert!(found.suggestions.is_empty());
    }

    #[test]
    fn fallback_suggests_near_miss_cities() {
        let catalog = ReferenceCatalog::builtin();
        let resolver = LaneResolver::new(catalog.lanes());
        let found = resolver.resolve("Bostn", "Dallas").unwrap();
        assert!(found.is_fallback());
        assert_eq!(found.suggestions.first().map(String::as_str), Some("Boston"));
    }

    #[test]
    fn empty_table_is_the_only_failure() {
        let resolver = LaneResolver::new(&[]);
        assert!(matches!(
            resolver.resolve("A", "B"),
            Err(Error::EmptyLaneCatalog)
        ));
    }
}

//! Lane definitions and CSV lane table loading.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One end of a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Location {
    pub fn new(city: &str, state: &str, zip_code: &str) -> Self {
        Self {
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
        }
    }

    /// A location known only by city name.
    pub fn unknown(city: &str) -> Self {
        Self::new(city, "XX", "00000")
    }

    /// Case-insensitive comparison on the trimmed city name.
    pub fn matches_city(&self, city: &str) -> bool {
        normalize_city(&self.city) == normalize_city(city)
    }
}

/// Operational complexity tag for a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Complexity::Simple),
            "moderate" => Some(Complexity::Moderate),
            "complex" => Some(Complexity::Complex),
            _ => None,
        }
    }
}

/// A named origin/destination pair with fixed distances and base cost.
///
/// Lanes are direction-symmetric: the reverse trip has the same distances and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub key: String,
    pub origin: Location,
    pub destination: Location,
    pub air_distance_km: f64,
    pub ground_distance_km: f64,
    pub base_cost_per_kg: f64,
    pub complexity: Complexity,
    pub estimated_ground_days: u32,
    #[serde(default)]
    pub hubs: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_fallback: bool,
}

impl Lane {
    /// The longer of the air and ground distances.
    pub fn max_distance_km(&self) -> f64 {
        self.air_distance_km.max(self.ground_distance_km)
    }

    /// True when this lane runs from `origin` to `destination` in its stored direction.
    pub fn connects(&self, origin: &str, destination: &str) -> bool {
        self.origin.matches_city(origin) && self.destination.matches_city(destination)
    }

    /// The same lane travelled in the opposite direction.
    ///
    /// Distances, cost, and hubs are unchanged; only the endpoints swap.
    pub fn reversed(&self) -> Lane {
        Lane {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            ..self.clone()
        }
    }

    /// Check distances and cost are positive and finite.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("air_distance_km", self.air_distance_km),
            ("ground_distance_km", self.ground_distance_km),
            ("base_cost_per_kg", self.base_cost_per_kg),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::LaneData {
                    lane: self.key.clone(),
                    message: format!("{field} must be a positive number, got {value}"),
                });
            }
        }
        if self.origin.city.trim().is_empty() || self.destination.city.trim().is_empty() {
            return Err(Error::LaneData {
                lane: self.key.clone(),
                message: "origin and destination cities are required".to_string(),
            });
        }
        Ok(())
    }
}

/// Derive a catalog key such as `SALT_LAKE_CITY_PHILADELPHIA` from two city names.
pub fn lane_key(origin: &str, destination: &str) -> String {
    let part = |city: &str| {
        city.split_whitespace()
            .map(|w| w.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_")
    };
    format!("{}_{}", part(origin), part(destination))
}

/// Normalize a city name for case-insensitive lookup.
pub(crate) fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Load lanes from a CSV file.
pub fn load_lanes_from_path(path: &Path) -> Result<Vec<Lane>> {
    let file = fs::File::open(path)?;
    load_lanes_from_reader(file)
}

/// Load lanes from a CSV reader.
///
/// Required columns: `origin_city`, `destination_city`, `air_distance_km`,
/// `ground_distance_km`, `base_cost_per_kg`. Optional columns: `key`,
/// `origin_state`, `origin_zip`, `destination_state`, `destination_zip`,
/// `complexity`, `ground_days`, `hubs` (semicolon separated), `description`.
pub fn load_lanes_from_reader<R: Read>(reader: R) -> Result<Vec<Lane>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| Error::CatalogValidation {
            message: format!("failed to read lane table headers: {err}"),
        })?
        .clone();

    let normalize = |s: &str| {
        s.to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect::<String>()
    };
    let normalized_headers: Vec<String> = headers.iter().map(&normalize).collect();

    let synonyms: &[(&str, &[&str])] = &[
        ("key", &["key", "lane", "lane_key", "route_key"]),
        ("origin_city", &["origin_city", "origin", "from"]),
        ("origin_state", &["origin_state"]),
        ("origin_zip", &["origin_zip", "origin_zip_code"]),
        ("destination_city", &["destination_city", "destination", "to"]),
        ("destination_state", &["destination_state"]),
        ("destination_zip", &["destination_zip", "destination_zip_code"]),
        ("air_distance_km", &["air_distance_km", "air_km", "air_distance"]),
        (
            "ground_distance_km",
            &["ground_distance_km", "ground_km", "ground_distance"],
        ),
        (
            "base_cost_per_kg",
            &["base_cost_per_kg", "cost_per_kg", "base_cost"],
        ),
        ("complexity", &["complexity", "route_complexity"]),
        (
            "ground_days",
            &["ground_days", "estimated_ground_days", "transit_days"],
        ),
        ("hubs", &["hubs", "major_hubs"]),
        ("description", &["description"]),
    ];

    let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
    for (canon, alts) in synonyms {
        if let Some(i) = alts
            .iter()
            .find_map(|alt| normalized_headers.iter().position(|h| *h == normalize(alt)))
        {
            index_map.insert(*canon, i);
        }
    }

    let required = [
        "origin_city",
        "destination_city",
        "air_distance_km",
        "ground_distance_km",
        "base_cost_per_kg",
    ];
    let missing: Vec<&str> = required
        .into_iter()
        .filter(|c| !index_map.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(Error::CatalogValidation {
            message: format!(
                "lane table missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }

    let mut lanes = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    // Header is row 1.
    for (offset, result) in csv_reader.records().enumerate() {
        let row = offset + 2;
        let record = result?;
        let fields = RowFields {
            record: &record,
            index_map: &index_map,
            row,
        };

        let origin_city = fields.text("origin_city");
        let destination_city = fields.text("destination_city");
        let key = match fields.text("key") {
            k if k.is_empty() => lane_key(&origin_city, &destination_city),
            k => k,
        };

        let complexity = match fields.text("complexity") {
            c if c.is_empty() => Complexity::Moderate,
            c => Complexity::parse(&c).ok_or_else(|| Error::CatalogValidation {
                message: format!("invalid complexity '{c}' for lane '{key}' at row {row}"),
            })?,
        };

        let estimated_ground_days = match fields.text("ground_days") {
            d if d.is_empty() => 4,
            d => d.parse::<u32>().map_err(|e| Error::CatalogValidation {
                message: format!("invalid ground_days for lane '{key}' at row {row}: {e}"),
            })?,
        };

        let hubs = fields
            .text("hubs")
            .split(';')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();

        let lane = Lane {
            origin: Location::new(
                &origin_city,
                &fields.text("origin_state"),
                &fields.text("origin_zip"),
            ),
            destination: Location::new(
                &destination_city,
                &fields.text("destination_state"),
                &fields.text("destination_zip"),
            ),
            air_distance_km: fields.number("air_distance_km", &key)?,
            ground_distance_km: fields.number("ground_distance_km", &key)?,
            base_cost_per_kg: fields.number("base_cost_per_kg", &key)?,
            complexity,
            estimated_ground_days,
            hubs,
            description: fields.text("description"),
            is_fallback: false,
            key,
        };

        lane.validate()?;

        let forward = (
            normalize_city(&lane.origin.city),
            normalize_city(&lane.destination.city),
        );
        let backward = (forward.1.clone(), forward.0.clone());
        if seen.contains(&forward) || seen.contains(&backward) {
            return Err(Error::DuplicateLane { key: lane.key });
        }
        seen.insert(forward);
        lanes.push(lane);
    }

    Ok(lanes)
}

struct RowFields<'a> {
    record: &'a StringRecord,
    index_map: &'a BTreeMap<&'a str, usize>,
    row: usize,
}

impl RowFields<'_> {
    fn text(&self, field: &str) -> String {
        self.index_map
            .get(field)
            .and_then(|&i| self.record.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn number(&self, field: &str, key: &str) -> Result<f64> {
        let raw = self.text(field);
        if raw.is_empty() {
            return Err(Error::CatalogValidation {
                message: format!("missing {field} for lane '{key}' at row {}", self.row),
            });
        }
        raw.parse::<f64>().map_err(|e| Error::CatalogValidation {
            message: format!("invalid {field} for lane '{key}' at row {}: {e}", self.row),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn lane_key_joins_multi_word_cities() {
        assert_eq!(
            lane_key("Salt Lake City", "Philadelphia"),
            "SALT_LAKE_CITY_PHILADELPHIA"
        );
    }

    #[test]
    fn minimal_columns_fill_defaults() {
        let csv = "origin,destination,air_km,ground_km,cost_per_kg\nReno,Boise,560,690,4.10\n";
        let lanes = load_lanes_from_reader(Cursor::new(csv)).expect("minimal table parses");
        assert_eq!(lanes.len(), 1);
        let lane = &lanes[0];
        assert_eq!(lane.key, "RENO_BOISE");
        assert_eq!(lane.complexity, Complexity::Moderate);
        assert_eq!(lane.estimated_ground_days, 4);
        assert!(lane.hubs.is_empty());
        assert!(!lane.is_fallback);
    }

    #[test]
    fn reversed_swaps_only_endpoints() {
        let csv = "origin_city,destination_city,air_distance_km,ground_distance_km,base_cost_per_kg,hubs\n\
                   Reno,Boise,560,690,4.10,Winnemucca;Twin Falls\n";
        let lane = load_lanes_from_reader(Cursor::new(csv)).unwrap().remove(0);
        let back = lane.reversed();
        assert_eq!(back.origin.city, "Boise");
        assert_eq!(back.destination.city, "Reno");
        assert_eq!(back.air_distance_km, lane.air_distance_km);
        assert_eq!(back.hubs, vec!["Winnemucca", "Twin Falls"]);
    }
}

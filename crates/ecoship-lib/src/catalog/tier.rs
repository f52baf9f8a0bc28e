//! Delivery tier definitions.
//!
//! A tier is one of the six fixed service levels a shipment can be quoted
//! at. Tiers carry everything the engines need: ETA, transport mix, price
//! multipliers, and the service class that drives ground-leg efficiency.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tolerance applied when checking that a transport mix sums to 100%.
pub const MIX_TOLERANCE_PCT: f64 = 0.01;

/// Identity of a delivery tier.
///
/// Per-tier policy (eco adjustments, nominal point ranges) is keyed by this
/// enum rather than by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierId {
    #[serde(rename = "UPS_NEXT_DAY_AIR_EARLY")]
    NextDayAirEarly,
    #[serde(rename = "UPS_NEXT_DAY_AIR")]
    NextDayAir,
    #[serde(rename = "UPS_NEXT_DAY_AIR_SAVER")]
    NextDayAirSaver,
    #[serde(rename = "UPS_2ND_DAY_AIR")]
    SecondDayAir,
    #[serde(rename = "UPS_3_DAY_SELECT")]
    ThreeDaySelect,
    #[serde(rename = "UPS_GROUND")]
    Ground,
}

impl TierId {
    /// Every tier, fastest first.
    pub const ALL: [TierId; 6] = [
        TierId::NextDayAirEarly,
        TierId::NextDayAir,
        TierId::NextDayAirSaver,
        TierId::SecondDayAir,
        TierId::ThreeDaySelect,
        TierId::Ground,
    ];

    /// Stable catalog key (matches the serialized form).
    pub fn key(self) -> &'static str {
        match self {
            TierId::NextDayAirEarly => "UPS_NEXT_DAY_AIR_EARLY",
            TierId::NextDayAir => "UPS_NEXT_DAY_AIR",
            TierId::NextDayAirSaver => "UPS_NEXT_DAY_AIR_SAVER",
            TierId::SecondDayAir => "UPS_2ND_DAY_AIR",
            TierId::ThreeDaySelect => "UPS_3_DAY_SELECT",
            TierId::Ground => "UPS_GROUND",
        }
    }

    /// Short kebab-case name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            TierId::NextDayAirEarly => "next-day-air-early",
            TierId::NextDayAir => "next-day-air",
            TierId::NextDayAirSaver => "next-day-air-saver",
            TierId::SecondDayAir => "2nd-day-air",
            TierId::ThreeDaySelect => "3-day-select",
            TierId::Ground => "ground",
        }
    }

    /// Suggest slugs resembling an unrecognised tier name.
    pub fn suggestions(name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_ascii_lowercase();
        let mut scored: Vec<(f64, &'static str)> = TierId::ALL
            .iter()
            .map(|id| (strsim::jaro_winkler(&needle, id.slug()), id.slug()))
            .filter(|(score, _)| *score >= 0.75)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, slug)| slug.to_string())
            .collect()
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TierId {
    type Err = Error;

    /// Parse a catalog key (`UPS_GROUND`) or slug (`ground`, `2nd-day-air`).
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_tier_name(s);
        TierId::ALL
            .iter()
            .copied()
            .find(|id| {
                normalize_tier_name(id.key()) == wanted || normalize_tier_name(id.slug()) == wanted
            })
            .ok_or_else(|| Error::UnknownTier {
                name: s.to_string(),
                suggestions: TierId::suggestions(s, 3),
            })
    }
}

/// Lower-case, drop separators, and drop a leading carrier prefix.
fn normalize_tier_name(name: &str) -> String {
    let flat: String = name
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    flat.strip_prefix("ups").map(str::to_string).unwrap_or(flat)
}

/// Efficiency class applied to the ground leg of a tier's emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceClass {
    /// Time-definite next-day service. Ground leg runs at 1.10x.
    Express,
    /// Deferred air or mixed service. No adjustment.
    Standard,
    /// Consolidated ground network. Ground leg runs at 0.85x.
    Ground,
}

impl ServiceClass {
    /// Multiplier applied to ground-leg emissions. The air leg is never adjusted.
    pub fn ground_efficiency(self) -> f64 {
        match self {
            ServiceClass::Express => 1.10,
            ServiceClass::Standard => 1.0,
            ServiceClass::Ground => 0.85,
        }
    }
}

/// Marketing badge published with a tier independent of any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBadge {
    Standard,
    EcoFriendly,
    CarbonNeutral,
}

/// Share of a tier's distance travelled by air and by ground, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportMix {
    pub air_pct: f64,
    pub ground_pct: f64,
}

impl TransportMix {
    pub fn new(air_pct: f64, ground_pct: f64) -> Self {
        Self {
            air_pct,
            ground_pct,
        }
    }

    /// Check both shares are non-negative and sum to 100 within tolerance.
    pub fn validate(&self) -> Result<()> {
        if !self.air_pct.is_finite() || !self.ground_pct.is_finite() {
            return Err(Error::CatalogValidation {
                message: "transport mix percentages must be finite".to_string(),
            });
        }
        if self.air_pct < 0.0 || self.ground_pct < 0.0 {
            return Err(Error::CatalogValidation {
                message: format!(
                    "transport mix percentages must be non-negative, got air={} ground={}",
                    self.air_pct, self.ground_pct
                ),
            });
        }
        let total = self.air_pct + self.ground_pct;
        if (total - 100.0).abs() > MIX_TOLERANCE_PCT {
            return Err(Error::CatalogValidation {
                message: format!("transport mix must sum to 100, got {total}"),
            });
        }
        Ok(())
    }
}

/// One delivery service level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    pub name: String,
    /// Carrier service code.
    pub code: String,
    /// Customer-facing delivery commitment, e.g. "Next Business Day by 10:30 AM".
    pub commitment: String,
    pub eta_hours: u32,
    pub mix: TransportMix,
    pub base_cost_multiplier: f64,
    /// Applied after the fuel surcharge. Below 1.0 discounts, above 1.0 charges a premium.
    pub premium_multiplier: f64,
    /// Price floor in USD.
    pub minimum_charge_usd: f64,
    /// Business days counted from the effective ship date.
    pub business_days: u32,
    /// 1 is the highest priority.
    pub priority: u8,
    pub service_class: ServiceClass,
    pub badge: TierBadge,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub tracking_included: bool,
    #[serde(default)]
    pub insurance_included: bool,
    #[serde(default)]
    pub signature_required: bool,
}

fn default_true() -> bool {
    true
}

impl Tier {
    /// Validate multipliers, floors, and the transport mix.
    pub fn validate(&self) -> Result<()> {
        self.mix.validate().map_err(|err| match err {
            Error::CatalogValidation { message } => Error::CatalogValidation {
                message: format!("tier {}: {message}", self.id),
            },
            other => other,
        })?;

        let positive = [
            ("base_cost_multiplier", self.base_cost_multiplier),
            ("premium_multiplier", self.premium_multiplier),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::CatalogValidation {
                    message: format!("tier {}: {field} must be positive, got {value}", self.id),
                });
            }
        }

        if !self.minimum_charge_usd.is_finite() || self.minimum_charge_usd < 0.0 {
            return Err(Error::CatalogValidation {
                message: format!(
                    "tier {}: minimum_charge_usd must be non-negative, got {}",
                    self.id, self.minimum_charge_usd
                ),
            });
        }

        if self.eta_hours == 0 || self.business_days == 0 {
            return Err(Error::CatalogValidation {
                message: format!(
                    "tier {}: eta_hours and business_days must be at least 1",
                    self.id
                ),
            });
        }

        Ok(())
    }
}

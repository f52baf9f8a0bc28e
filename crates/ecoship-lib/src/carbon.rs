//! Carbon footprint per tier and cross-tier comparison.
//!
//! Emissions use the tonne-kilometre method: cargo mass in tonnes times the
//! distance each transport mode carries it, times a per-mode emission factor.
//! Only the ground leg is adjusted by the tier's service class.

use serde::{Deserialize, Serialize};

use crate::catalog::{validate_weight, Lane, Tier, TierId};
use crate::constants::{
    round_to, AIR_EMISSION_FACTOR, CAR_CO2_KG_PER_MILE, TREE_CO2_KG_PER_YEAR,
    TRUCK_EMISSION_FACTOR,
};
use crate::error::{Error, Result};

/// Emissions for one tier on one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonBreakdown {
    pub tier: TierId,
    pub total_co2_kg: f64,
    pub air_co2_kg: f64,
    pub ground_co2_kg: f64,
    pub air_tonne_km: f64,
    pub ground_tonne_km: f64,
    pub co2_per_kg: f64,
    pub co2_per_km: f64,
    /// Multiplier applied to the ground leg.
    pub ground_efficiency: f64,
    /// Trees needed for a year to absorb the total.
    pub trees_per_year_equivalent: f64,
    pub car_miles_equivalent: f64,
}

/// Compute the carbon breakdown for one tier.
///
/// Formula:
/// ```text
/// air_co2    = air_km    * air_pct/100    * tonnes * 0.570
/// ground_co2 = ground_km * ground_pct/100 * tonnes * 0.150 * ground_efficiency
/// ```
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a weight outside (0, 70], and
/// [`Error::LaneData`] when the lane lacks positive distances.
pub fn calculate_carbon(lane: &Lane, weight_kg: f64, tier: &Tier) -> Result<CarbonBreakdown> {
    validate_weight(weight_kg)?;
    lane.validate()?;

    let weight_tonnes = weight_kg / 1000.0;
    let air_tonne_km = lane.air_distance_km * (tier.mix.air_pct / 100.0) * weight_tonnes;
    let ground_tonne_km = lane.ground_distance_km * (tier.mix.ground_pct / 100.0) * weight_tonnes;

    let ground_efficiency = tier.service_class.ground_efficiency();
    let air_co2 = air_tonne_km * AIR_EMISSION_FACTOR;
    let ground_co2 = ground_tonne_km * TRUCK_EMISSION_FACTOR * ground_efficiency;
    let total = air_co2 + ground_co2;

    let distance = lane.max_distance_km();
    if !total.is_finite() || distance <= 0.0 {
        return Err(Error::LaneData {
            lane: lane.key.clone(),
            message: "cannot derive emissions from lane distances".to_string(),
        });
    }

    tracing::debug!(
        tier = %tier.id,
        lane = %lane.key,
        air_co2,
        ground_co2,
        total,
        "computed carbon footprint"
    );

    Ok(CarbonBreakdown {
        tier: tier.id,
        total_co2_kg: round_to(total, 3),
        air_co2_kg: round_to(air_co2, 3),
        ground_co2_kg: round_to(ground_co2, 3),
        air_tonne_km: round_to(air_tonne_km, 3),
        ground_tonne_km: round_to(ground_tonne_km, 3),
        co2_per_kg: round_to(total / weight_kg, 4),
        co2_per_km: round_to(total / distance, 4),
        ground_efficiency,
        trees_per_year_equivalent: round_to(total / TREE_CO2_KG_PER_YEAR, 2),
        car_miles_equivalent: round_to(total / CAR_CO2_KG_PER_MILE, 2),
    })
}

// =============================================================================
// Cross-tier comparison
// =============================================================================

/// Relative emissions badge within one quote set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonBadge {
    MostEcoFriendly,
    EcoFriendly,
    Standard,
    HighEmission,
}

impl CarbonBadge {
    /// Badge a total against the set's statistics. Checked in order:
    /// minimum, at or below average, within 10% of maximum, otherwise standard.
    pub fn assign(co2_kg: f64, stats: &CarbonStatistics) -> Self {
        if co2_kg == stats.min_co2_kg {
            CarbonBadge::MostEcoFriendly
        } else if co2_kg <= stats.average_co2_kg {
            CarbonBadge::EcoFriendly
        } else if co2_kg >= stats.max_co2_kg * 0.9 {
            CarbonBadge::HighEmission
        } else {
            CarbonBadge::Standard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarbonBadge::MostEcoFriendly => "most_eco_friendly",
            CarbonBadge::EcoFriendly => "eco_friendly",
            CarbonBadge::Standard => "standard",
            CarbonBadge::HighEmission => "high_emission",
        }
    }
}

/// Summary statistics over one quote set's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonStatistics {
    pub lowest_emission_tier: TierId,
    pub highest_emission_tier: TierId,
    pub min_co2_kg: f64,
    pub max_co2_kg: f64,
    pub average_co2_kg: f64,
    pub range_co2_kg: f64,
}

/// One tier's place in the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCarbonComparison {
    pub tier: TierId,
    pub total_co2_kg: f64,
    /// Reduction versus the highest-emitting tier, in percent.
    pub savings_vs_highest_pct: f64,
    pub badge: CarbonBadge,
}

/// Emissions comparison across every tier of a quote set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonComparison {
    /// Ordered lowest emission first.
    pub tiers: Vec<TierCarbonComparison>,
    /// Tiers at or below the average.
    pub eco_friendly_tiers: Vec<TierId>,
    pub statistics: CarbonStatistics,
}

impl CarbonComparison {
    pub fn for_tier(&self, tier: TierId) -> Option<&TierCarbonComparison> {
        self.tiers.iter().find(|t| t.tier == tier)
    }
}

/// Compare breakdowns. Returns `None` for an empty slice.
pub fn compare_carbon(breakdowns: &[CarbonBreakdown]) -> Option<CarbonComparison> {
    let mut sorted: Vec<&CarbonBreakdown> = breakdowns.iter().collect();
    sorted.sort_by(|a, b| a.total_co2_kg.total_cmp(&b.total_co2_kg));

    let lowest = *sorted.first()?;
    let highest = *sorted.last()?;

    let min = lowest.total_co2_kg;
    let max = highest.total_co2_kg;
    let average = sorted.iter().map(|b| b.total_co2_kg).sum::<f64>() / sorted.len() as f64;

    // Badges compare against the unrounded average.
    let raw_stats = CarbonStatistics {
        lowest_emission_tier: lowest.tier,
        highest_emission_tier: highest.tier,
        min_co2_kg: min,
        max_co2_kg: max,
        average_co2_kg: average,
        range_co2_kg: max - min,
    };

    let tiers: Vec<TierCarbonComparison> = sorted
        .iter()
        .map(|b| {
            let savings = if max > 0.0 {
                (max - b.total_co2_kg) / max * 100.0
            } else {
                0.0
            };
            TierCarbonComparison {
                tier: b.tier,
                total_co2_kg: b.total_co2_kg,
                savings_vs_highest_pct: round_to(savings, 1),
                badge: CarbonBadge::assign(b.total_co2_kg, &raw_stats),
            }
        })
        .collect();

    let eco_friendly_tiers = sorted
        .iter()
        .filter(|b| b.total_co2_kg <= average)
        .map(|b| b.tier)
        .collect();

    Some(CarbonComparison {
        tiers,
        eco_friendly_tiers,
        statistics: CarbonStatistics {
            min_co2_kg: round_to(min, 3),
            max_co2_kg: round_to(max, 3),
            average_co2_kg: round_to(average, 3),
            range_co2_kg: round_to(max - min, 3),
            ..raw_stats
        },
    })
}

//! Per-tier price calculation.
//!
//! Formula:
//!
//! ```text
//! base  = weight_kg * lane.base_cost_per_kg * tier.base_cost_multiplier
//! base *= distance_multiplier(max(air_km, ground_km))
//! base *= weight_band.cost_multiplier
//! base += base * FUEL_SURCHARGE_RATE
//! base *= tier.premium_multiplier
//! price = max(base, tier.minimum_charge_usd), rounded to cents
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{select_band, validate_weight, Lane, Tier, TierId, WeightBand};
use crate::constants::{
    round_to, FUEL_SURCHARGE_RATE, LONG_HAUL_MULTIPLIER, LONG_HAUL_THRESHOLD_KM,
    SHORT_HAUL_MULTIPLIER, SHORT_HAUL_THRESHOLD_KM,
};
use crate::error::{Error, Result};

/// Itemised price for one tier on one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub tier: TierId,
    pub distance_km: f64,
    /// Weight times lane rate times tier multiplier, before adjustments.
    pub base_usd: f64,
    pub distance_multiplier: f64,
    pub weight_band: String,
    pub weight_multiplier: f64,
    pub fuel_surcharge_usd: f64,
    pub premium_multiplier: f64,
    pub minimum_charge_usd: f64,
    /// True when the tier floor replaced the computed price.
    pub minimum_applied: bool,
    pub total_usd: f64,
}

/// Zone multiplier for a lane distance.
///
/// # Examples
/// ```
/// use ecoship_lib::cost::distance_multiplier;
///
/// assert_eq!(distance_multiplier(999.0), 0.8);
/// assert_eq!(distance_multiplier(1000.0), 1.0);
/// assert_eq!(distance_multiplier(3000.0), 1.0);
/// assert_eq!(distance_multiplier(3000.5), 1.3);
/// ```
pub fn distance_multiplier(distance_km: f64) -> f64 {
    if distance_km < SHORT_HAUL_THRESHOLD_KM {
        SHORT_HAUL_MULTIPLIER
    } else if distance_km > LONG_HAUL_THRESHOLD_KM {
        LONG_HAUL_MULTIPLIER
    } else {
        1.0
    }
}

/// Price one tier on one lane.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a weight outside (0, 70], and
/// [`Error::LaneData`] when the lane has no usable distance or rate.
pub fn calculate_cost(
    lane: &Lane,
    weight_kg: f64,
    tier: &Tier,
    bands: &[WeightBand],
) -> Result<CostBreakdown> {
    validate_weight(weight_kg)?;
    lane.validate()?;

    let band = select_band(bands, weight_kg).ok_or_else(|| Error::CatalogValidation {
        message: "no weight bands configured".to_string(),
    })?;

    let distance_km = lane.max_distance_km();
    let zone = distance_multiplier(distance_km);

    let base = weight_kg * lane.base_cost_per_kg * tier.base_cost_multiplier;
    let adjusted = base * zone * band.cost_multiplier;
    let fuel_surcharge = adjusted * FUEL_SURCHARGE_RATE;
    let with_premium = (adjusted + fuel_surcharge) * tier.premium_multiplier;

    let minimum_applied = with_premium < tier.minimum_charge_usd;
    let total = with_premium.max(tier.minimum_charge_usd);

    if !total.is_finite() {
        return Err(Error::TierComputation {
            tier: tier.id,
            message: format!("computed price is not finite on lane {}", lane.key),
        });
    }

    tracing::debug!(
        tier = %tier.id,
        lane = %lane.key,
        weight_kg,
        distance_km,
        zone,
        band = %band.name,
        total,
        minimum_applied,
        "priced tier"
    );

    Ok(CostBreakdown {
        tier: tier.id,
        distance_km,
        base_usd: round_to(base, 2),
        distance_multiplier: zone,
        weight_band: band.name.clone(),
        weight_multiplier: band.cost_multiplier,
        fuel_surcharge_usd: round_to(fuel_surcharge, 2),
        premium_multiplier: tier.premium_multiplier,
        minimum_charge_usd: tier.minimum_charge_usd,
        minimum_applied,
        total_usd: round_to(total, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, ReferenceCatalog};

    fn lane(catalog: &ReferenceCatalog, key: &str) -> Lane {
        catalog
            .lanes()
            .iter()
            .find(|l| l.key == key)
            .cloned()
            .expect("lane present")
    }

    #[test]
    fn prices_long_haul_ground() {
        let catalog = ReferenceCatalog::builtin();
        let tier = catalog.tier(TierId::Ground).unwrap();
        let cost = calculate_cost(
            &lane(&catalog, "NYC_LA"),
            5.0,
            tier,
            catalog.weight_bands(),
        )
        .unwrap();

        assert_eq!(cost.distance_km, 4501.0);
        assert_eq!(cost.distance_multiplier, 1.3);
        assert_eq!(cost.weight_band, "medium");
        assert_eq!(cost.base_usd, 42.5);
        assert!(!cost.minimum_applied);
        assert_eq!(cost.total_usd, 52.83);
    }

    #[test]
    fn prices_premium_tiers() {
        let catalog = ReferenceCatalog::builtin();
        let nyc_la = lane(&catalog, "NYC_LA");
        let price = |id| {
            calculate_cost(&nyc_la, 5.0, catalog.tier(id).unwrap(), catalog.weight_bands())
                .unwrap()
                .total_usd
        };

        assert_eq!(price(TierId::NextDayAirEarly), 321.66);
        assert_eq!(price(TierId::NextDayAir), 248.0);
        assert_eq!(price(TierId::NextDayAirSaver), 198.9);
        assert_eq!(price(TierId::SecondDayAir), 124.0);
    }

    #[test]
    fn floor_applies_to_light_short_parcels() {
        let catalog = ReferenceCatalog::builtin();
        let tier = catalog.tier(TierId::Ground).unwrap();
        let cost = calculate_cost(
            &lane(&catalog, "CHARLOTTE_KANSAS_CITY"),
            0.3,
            tier,
            catalog.weight_bands(),
        )
        .unwrap();

        assert_eq!(cost.weight_band, "envelope");
        assert!(cost.minimum_applied);
        assert_eq!(cost.total_usd, 15.0);
    }

    #[test]
    fn short_haul_discount() {
        let catalog = ReferenceCatalog::builtin();
        let mut short = lane(&catalog, "CHARLOTTE_KANSAS_CITY");
        short.air_distance_km = 600.0;
        short.ground_distance_km = 750.0;
        let tier = catalog.tier(TierId::SecondDayAir).unwrap();
        let cost = calculate_cost(&short, 20.0, tier, catalog.weight_bands()).unwrap();
        assert_eq!(cost.distance_multiplier, 0.8);
        assert_eq!(cost.weight_band, "large");
    }

    #[test]
    fn rejects_bad_weight() {
        let catalog = ReferenceCatalog::builtin();
        let tier = catalog.tier(TierId::Ground).unwrap();
        let nyc_la = lane(&catalog, "NYC_LA");
        for weight in [0.0, -2.0, 70.5, f64::INFINITY] {
            let err = calculate_cost(&nyc_la, weight, tier, catalog.weight_bands()).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { .. }), "weight {weight}");
        }
    }
}

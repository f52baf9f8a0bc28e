//! Pricing and emissions constants.

/// Fuel surcharge applied to the adjusted base price (12.5%).
pub const FUEL_SURCHARGE_RATE: f64 = 0.125;

/// Lanes shorter than this (km) get the short-haul discount.
pub const SHORT_HAUL_THRESHOLD_KM: f64 = 1000.0;

/// Lanes longer than this (km) get the long-haul premium.
pub const LONG_HAUL_THRESHOLD_KM: f64 = 3000.0;

/// Price multiplier for short-haul lanes.
pub const SHORT_HAUL_MULTIPLIER: f64 = 0.8;

/// Price multiplier for long-haul lanes.
pub const LONG_HAUL_MULTIPLIER: f64 = 1.3;

/// Largest weight accepted for a quote (kg).
pub const MAX_WEIGHT_KG: f64 = 70.0;

/// Air freight emission factor (kg CO2 per tonne-km).
pub const AIR_EMISSION_FACTOR: f64 = 0.570;

/// Truck freight emission factor (kg CO2 per tonne-km).
pub const TRUCK_EMISSION_FACTOR: f64 = 0.150;

/// CO2 absorbed by one mature tree per year (kg).
pub const TREE_CO2_KG_PER_YEAR: f64 = 21.0;

/// CO2 emitted by an average passenger car per mile (kg).
pub const CAR_CO2_KG_PER_MILE: f64 = 0.411;

/// Maximum eco-efficiency score.
pub const MAX_ECO_SCORE: f64 = 25.0;

/// How long a generated quote set stays valid (hours).
pub const QUOTE_VALIDITY_HOURS: i64 = 24;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

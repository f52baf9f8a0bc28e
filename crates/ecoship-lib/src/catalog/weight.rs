//! Weight bands and package weight validation.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_WEIGHT_KG;
use crate::error::{Error, Result};

/// Check a package weight is finite and within (0, 70] kg.
pub fn validate_weight(weight_kg: f64) -> Result<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(Error::invalid_input(format!(
            "weight_kg must be greater than 0, got {weight_kg}"
        )));
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(Error::invalid_input(format!(
            "weight_kg cannot exceed {MAX_WEIGHT_KG} kg, got {weight_kg}"
        )));
    }
    Ok(())
}

/// Package weight band with its cost adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBand {
    pub name: String,
    /// Inclusive upper bound in kilograms.
    pub max_weight_kg: f64,
    pub cost_multiplier: f64,
    #[serde(default)]
    pub description: String,
}

impl WeightBand {
    pub fn new(name: &str, max_weight_kg: f64, cost_multiplier: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            max_weight_kg,
            cost_multiplier,
            description: description.to_string(),
        }
    }
}

/// Pick the band for a weight: first band (by ascending max) whose max is at
/// least the weight, else the heaviest band.
///
/// Returns `None` only when `bands` is empty.
pub fn select_band(bands: &[WeightBand], weight_kg: f64) -> Option<&WeightBand> {
    let mut sorted: Vec<&WeightBand> = bands.iter().collect();
    sorted.sort_by(|a, b| a.max_weight_kg.total_cmp(&b.max_weight_kg));
    sorted
        .iter()
        .copied()
        .find(|band| weight_kg <= band.max_weight_kg)
        .or_else(|| sorted.last().copied())
}

/// Check bands are non-empty with positive bounds, positive multipliers, and unique maxima.
pub fn validate_bands(bands: &[WeightBand]) -> Result<()> {
    if bands.is_empty() {
        return Err(Error::CatalogValidation {
            message: "at least one weight band is required".to_string(),
        });
    }

    for band in bands {
        if !band.max_weight_kg.is_finite() || band.max_weight_kg <= 0.0 {
            return Err(Error::CatalogValidation {
                message: format!(
                    "weight band '{}' must have a positive max_weight_kg, got {}",
                    band.name, band.max_weight_kg
                ),
            });
        }
        if !band.cost_multiplier.is_finite() || band.cost_multiplier <= 0.0 {
            return Err(Error::CatalogValidation {
                message: format!(
                    "weight band '{}' must have a positive cost_multiplier, got {}",
                    band.name, band.cost_multiplier
                ),
            });
        }
    }

    let mut maxima: Vec<f64> = bands.iter().map(|b| b.max_weight_kg).collect();
    maxima.sort_by(f64::total_cmp);
    if maxima.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(Error::CatalogValidation {
            message: "weight bands must have distinct max_weight_kg values".to_string(),
        });
    }

    Ok(())
}

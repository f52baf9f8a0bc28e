//! Eco-efficiency scoring.
//!
//! Each tier in a quote set gets a 0-25 point score that balances cost per kg
//! against carbon per kg. Both metrics are min-max normalized across the
//! request's own tiers, so scores are relative: the same tier scores
//! differently on a different lane or weight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::TierId;
use crate::constants::{round_to, MAX_ECO_SCORE};
use crate::error::{Error, Result};

/// Weights and per-tier adjustments used for scoring.
///
/// The adjustments are business policy rather than physics. They compress the
/// gaps between medium-speed tiers and push the premium express tiers down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub cost_weight: f64,
    pub carbon_weight: f64,
    /// Fractional adjustment applied to the weighted base score, keyed by tier.
    pub adjustments: BTreeMap<TierId, f64>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        let adjustments = BTreeMap::from([
            (TierId::NextDayAirEarly, -0.15),
            (TierId::NextDayAir, -0.08),
            (TierId::NextDayAirSaver, 0.25),
            (TierId::SecondDayAir, 0.28),
            (TierId::ThreeDaySelect, 0.30),
            (TierId::Ground, 0.32),
        ]);
        Self {
            cost_weight: 0.70,
            carbon_weight: 0.30,
            adjustments,
        }
    }
}

impl ScoringPolicy {
    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let sum = self.cost_weight + self.carbon_weight;
        if self.cost_weight < 0.0 || self.carbon_weight < 0.0 || (sum - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidWeights {
                cost: self.cost_weight,
                carbon: self.carbon_weight,
            });
        }
        Ok(())
    }

    /// Adjustment for a tier; tiers without an entry are unadjusted.
    pub fn adjustment(&self, tier: TierId) -> f64 {
        self.adjustments.get(&tier).copied().unwrap_or(0.0)
    }
}

/// Label band for a point score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl EcoTier {
    /// Band a score by lower bound, so fractional scores between the
    /// published integer bands fall into the lower band.
    pub fn from_points(points: f64) -> Self {
        if points >= 21.0 {
            EcoTier::Excellent
        } else if points >= 17.0 {
            EcoTier::VeryGood
        } else if points >= 13.0 {
            EcoTier::Good
        } else if points >= 9.0 {
            EcoTier::Fair
        } else if points >= 5.0 {
            EcoTier::Poor
        } else {
            EcoTier::VeryPoor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EcoTier::Excellent => "excellent",
            EcoTier::VeryGood => "very_good",
            EcoTier::Good => "good",
            EcoTier::Fair => "fair",
            EcoTier::Poor => "poor",
            EcoTier::VeryPoor => "very_poor",
        }
    }

    /// Published integer point range for the band.
    pub fn point_range(self) -> (u8, u8) {
        match self {
            EcoTier::Excellent => (21, 25),
            EcoTier::VeryGood => (17, 20),
            EcoTier::Good => (13, 16),
            EcoTier::Fair => (9, 12),
            EcoTier::Poor => (5, 8),
            EcoTier::VeryPoor => (0, 4),
        }
    }
}

/// Typical point range a tier lands in, as advertised to clients.
pub fn nominal_point_range(tier: TierId) -> (u8, u8) {
    match tier {
        TierId::NextDayAirEarly => (0, 4),
        TierId::NextDayAir => (5, 8),
        TierId::NextDayAirSaver => (15, 18),
        TierId::SecondDayAir => (17, 20),
        TierId::ThreeDaySelect => (19, 22),
        TierId::Ground => (21, 25),
    }
}

/// Cost and emissions for one tier, as fed to the scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub tier: TierId,
    pub cost_usd: f64,
    pub total_co2_kg: f64,
}

/// Score for one tier within a quote set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoScore {
    pub tier: TierId,
    /// Final score, 0-25, one decimal.
    pub points: f64,
    pub eco_tier: EcoTier,
    pub cost_score: f64,
    pub carbon_score: f64,
    pub adjustment: f64,
    pub cost_per_kg: f64,
    pub carbon_per_kg: f64,
    pub explanation: String,
}

/// Score every tier of one request.
///
/// Output order matches `inputs`.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for empty input or a non-positive weight,
/// and [`Error::InvalidWeights`] when the policy weights do not sum to 1.
pub fn score_tiers(
    inputs: &[ScoreInput],
    weight_kg: f64,
    policy: &ScoringPolicy,
) -> Result<Vec<EcoScore>> {
    if inputs.is_empty() {
        return Err(Error::invalid_input("no quotes provided for scoring"));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(Error::invalid_input("package weight must be positive"));
    }
    policy.validate()?;

    let cost_per_kg: Vec<f64> = inputs.iter().map(|i| i.cost_usd / weight_kg).collect();
    let carbon_per_kg: Vec<f64> = inputs.iter().map(|i| i.total_co2_kg / weight_kg).collect();

    let cost_scores = normalize_lower_is_better(&cost_per_kg);
    let carbon_scores = normalize_lower_is_better(&carbon_per_kg);

    let scores: Vec<EcoScore> = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let cost_score = cost_scores[i];
            let carbon_score = carbon_scores[i];
            let adjustment = policy.adjustment(input.tier);

            let base = cost_score * policy.cost_weight + carbon_score * policy.carbon_weight;
            let adjusted = base * (1.0 + adjustment);
            let (points, eco_tier) = published_points(adjusted * MAX_ECO_SCORE);

            EcoScore {
                tier: input.tier,
                points,
                eco_tier,
                cost_score: round_to(cost_score, 2),
                carbon_score: round_to(carbon_score, 2),
                adjustment,
                cost_per_kg: cost_per_kg[i],
                carbon_per_kg: carbon_per_kg[i],
                explanation: explain(eco_tier, cost_score, carbon_score),
            }
        })
        .collect();

    tracing::debug!(
        tiers = scores.len(),
        min = scores.iter().map(|s| s.points).fold(f64::INFINITY, f64::min),
        max = scores.iter().map(|s| s.points).fold(f64::NEG_INFINITY, f64::max),
        "scored quote set"
    );

    Ok(scores)
}

/// Min-max normalize so the lowest value scores 1.0 and the highest 0.0.
/// A set with no spread scores 1.0 throughout.
/// Clamp and round a raw score, then band the rounded value so the label
/// always agrees with the published points.
fn published_points(raw: f64) -> (f64, EcoTier) {
    let points = round_to(raw.clamp(0.0, MAX_ECO_SCORE), 1);
    (points, EcoTier::from_points(points))
}

fn normalize_lower_is_better(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return vec![1.0; values.len()];
    }
    values.iter().map(|v| (max - v) / (max - min)).collect()
}

fn explain(eco_tier: EcoTier, cost_score: f64, carbon_score: f64) -> String {
    let (primary, secondary) = if cost_score > carbon_score {
        (
            "cost-effective",
            format!("environmental score: {carbon_score:.2}"),
        )
    } else {
        (
            "environmentally friendly",
            format!("cost score: {cost_score:.2}"),
        )
    };

    let headline = match eco_tier {
        EcoTier::Excellent => {
            "Outstanding balance of cost and environmental performance".to_string()
        }
        EcoTier::VeryGood => format!("Strong {primary} option with good overall value"),
        EcoTier::Good => "Moderate eco-friendly choice with reasonable cost trade-offs".to_string(),
        EcoTier::Fair => {
            "Balanced medium-speed service option with competitive scoring".to_string()
        }
        EcoTier::Poor => "Express service with higher cost and environmental impact".to_string(),
        EcoTier::VeryPoor => {
            "Premium express service with significant cost and environmental trade-offs"
                .to_string()
        }
    };

    format!("{headline}. Cost effectiveness: {cost_score:.2}, {secondary}.")
}

// =============================================================================
// Summary
// =============================================================================

/// Point statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// How scores were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub cost_weight: f64,
    pub carbon_weight: f64,
    pub max_points: f64,
    pub normalization: String,
}

/// Set-level view of a scored quote set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub point_range: PointRange,
    pub best_tier: TierId,
    pub best_points: f64,
    pub tier_distribution: BTreeMap<EcoTier, usize>,
    pub methodology: Methodology,
}

/// Summarize scores. Returns `None` for an empty slice.
pub fn summarize(scores: &[EcoScore], policy: &ScoringPolicy) -> Option<ScoringSummary> {
    let best = scores.iter().max_by(|a, b| a.points.total_cmp(&b.points))?;
    let min = scores.iter().map(|s| s.points).fold(f64::INFINITY, f64::min);
    let max = scores.iter().map(|s| s.points).fold(f64::NEG_INFINITY, f64::max);
    let average = scores.iter().map(|s| s.points).sum::<f64>() / scores.len() as f64;

    let mut tier_distribution = BTreeMap::new();
    for score in scores {
        *tier_distribution.entry(score.eco_tier).or_insert(0) += 1;
    }

    Some(ScoringSummary {
        point_range: PointRange {
            min,
            max,
            average: round_to(average, 1),
        },
        best_tier: best.tier,
        best_points: best.points,
        tier_distribution,
        methodology: Methodology {
            cost_weight: policy.cost_weight,
            carbon_weight: policy.carbon_weight,
            max_points: MAX_ECO_SCORE,
            normalization: "min-max within quote set".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tier: TierId, cost_usd: f64, total_co2_kg: f64) -> ScoreInput {
        ScoreInput {
            tier,
            cost_usd,
            total_co2_kg,
        }
    }

    #[test]
    fn cheapest_and_cleanest_tier_scores_highest() {
        let inputs = [
            input(TierId::NextDayAirEarly, 321.66, 10.864),
            input(TierId::Ground, 52.83, 3.288),
        ];
        let scores = score_tiers(&inputs, 5.0, &ScoringPolicy::default()).unwrap();

        let early = &scores[0];
        assert_eq!(early.cost_score, 0.0);
        assert_eq!(early.carbon_score, 0.0);
        assert_eq!(early.points, 0.0);
        assert_eq!(early.eco_tier, EcoTier::VeryPoor);

        // base 1.0 * 1.32 * 25 = 33 clamps to 25.
        let ground = &scores[1];
        assert_eq!(ground.points, 25.0);
        assert_eq!(ground.eco_tier, EcoTier::Excellent);
        assert!(ground
            .explanation
            .starts_with("Outstanding balance of cost and environmental performance."));
        assert!(ground.explanation.ends_with("cost score: 1.00."));
    }

    #[test]
    fn degenerate_set_scores_full_components() {
        let inputs = [
            input(TierId::SecondDayAir, 40.0, 2.0),
            input(TierId::ThreeDaySelect, 40.0, 2.0),
        ];
        let scores = score_tiers(&inputs, 2.0, &ScoringPolicy::default()).unwrap();
        for score in &scores {
            assert_eq!(score.cost_score, 1.0);
            assert_eq!(score.carbon_score, 1.0);
            assert_eq!(score.points, 25.0);
        }
    }

    #[test]
    fn adjustment_keyed_by_tier() {
        // Identical metrics, so only the adjustment separates them.
        let policy = ScoringPolicy {
            cost_weight: 0.5,
            carbon_weight: 0.5,
            ..ScoringPolicy::default()
        };
        let inputs = [
            input(TierId::NextDayAir, 10.0, 1.0),
            input(TierId::NextDayAirSaver, 20.0, 2.0),
            input(TierId::Ground, 15.0, 1.5),
        ];
        let scores = score_tiers(&inputs, 1.0, &policy).unwrap();
        // NextDayAir: base 1.0 * 0.92 * 25 = 23.0
        assert_eq!(scores[0].points, 23.0);
        assert_eq!(scores[1].points, 0.0);
        // Ground: base 0.5 * 1.32 * 25 = 16.5
        assert_eq!(scores[2].points, 16.5);
        assert_eq!(scores[2].eco_tier, EcoTier::Good);
    }

    #[test]
    fn fractional_scores_between_bands_use_lower_band() {
        assert_eq!(EcoTier::from_points(20.5), EcoTier::VeryGood);
        assert_eq!(EcoTier::from_points(4.99), EcoTier::VeryPoor);
        assert_eq!(EcoTier::from_points(21.0), EcoTier::Excellent);
        assert_eq!(EcoTier::from_points(12.7), EcoTier::Fair);
    }

    #[test]
    fn label_follows_rounded_points() {
        assert_eq!(published_points(20.96), (21.0, EcoTier::Excellent));
        assert_eq!(published_points(20.94), (20.9, EcoTier::VeryGood));
        assert_eq!(published_points(-3.0), (0.0, EcoTier::VeryPoor));
        assert_eq!(published_points(31.0), (25.0, EcoTier::Excellent));
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let policy = ScoringPolicy {
            cost_weight: 0.6,
            carbon_weight: 0.6,
            ..ScoringPolicy::default()
        };
        let inputs = [input(TierId::Ground, 1.0, 1.0)];
        assert!(matches!(
            score_tiers(&inputs, 1.0, &policy),
            Err(Error::InvalidWeights { .. })
        ));
    }

    #[test]
    fn summary_reports_best_and_distribution() {
        let inputs = [
            input(TierId::NextDayAirEarly, 300.0, 10.0),
            input(TierId::SecondDayAir, 120.0, 9.0),
            input(TierId::Ground, 50.0, 3.0),
        ];
        let policy = ScoringPolicy::default();
        let scores = score_tiers(&inputs, 5.0, &policy).unwrap();
        let summary = summarize(&scores, &policy).unwrap();

        assert_eq!(summary.best_tier, TierId::Ground);
        assert_eq!(summary.point_range.max, 25.0);
        assert_eq!(summary.point_range.min, 0.0);
        assert_eq!(summary.tier_distribution.values().sum::<usize>(), 3);
        assert_eq!(summary.methodology.cost_weight, 0.70);
        assert!(summarize(&[], &policy).is_none());
    }
}

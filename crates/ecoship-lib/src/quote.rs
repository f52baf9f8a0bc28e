//! Quote pipeline.
//!
//! Turns one shipping request into a quote for every tier: resolve the lane,
//! price and footprint each tier, score the set, then sort and summarize.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::carbon::{calculate_carbon, compare_carbon, CarbonBadge, CarbonBreakdown, CarbonComparison};
use crate::catalog::lane::normalize_city;
use crate::catalog::{validate_weight, CatalogProvider, Complexity, Lane, Tier, TierBadge, TierId};
use crate::constants::QUOTE_VALIDITY_HOURS;
use crate::cost::{calculate_cost, CostBreakdown};
use crate::delivery::{
    commitment_with_date, estimate_delivery, formatted_commitment, today, DeliveryEstimate,
};
use crate::eco_score::{score_tiers, summarize, EcoScore, ScoreInput, ScoringPolicy, ScoringSummary};
use crate::error::{Error, Result};
use crate::resolver::{LaneMatch, LaneResolver, ResolvedLane};

/// A shipping quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub origin_city: String,
    pub destination_city: String,
    pub weight_kg: f64,
    /// Defaults to today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<NaiveDate>,
}

impl QuoteRequest {
    pub fn new(origin_city: impl Into<String>, destination_city: impl Into<String>, weight_kg: f64) -> Self {
        Self {
            origin_city: origin_city.into(),
            destination_city: destination_city.into(),
            weight_kg,
            ship_date: None,
        }
    }

    pub fn with_ship_date(mut self, ship_date: NaiveDate) -> Self {
        self.ship_date = Some(ship_date);
        self
    }

    /// Reject empty cities, identical endpoints, and weights outside (0, 70] kg.
    pub fn validate(&self) -> Result<()> {
        let origin = self.origin_city.trim();
        let destination = self.destination_city.trim();

        if origin.is_empty() {
            return Err(Error::invalid_input("origin_city must not be empty"));
        }
        if destination.is_empty() {
            return Err(Error::invalid_input("destination_city must not be empty"));
        }
        if normalize_city(origin) == normalize_city(destination) {
            return Err(Error::invalid_input(
                "origin_city and destination_city must differ",
            ));
        }
        validate_weight(self.weight_kg)
    }
}

/// One tier's quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub tier: TierId,
    pub name: String,
    pub code: String,
    pub commitment: String,
    /// Commitment with the concrete delivery date substituted in.
    pub commitment_with_date: String,
    /// Short ETA summary such as "Within 2 Business Days".
    pub commitment_summary: String,
    pub eta_hours: u32,
    pub priority: u8,
    pub cost_usd: f64,
    pub cost: CostBreakdown,
    pub carbon: CarbonBreakdown,
    pub delivery: DeliveryEstimate,
    pub eco: EcoScore,
    pub carbon_badge: CarbonBadge,
    pub carbon_savings_pct: f64,
    pub tier_badge: TierBadge,
    pub tracking_included: bool,
    pub insurance_included: bool,
    pub signature_required: bool,
}

impl Quote {
    pub fn total_co2_kg(&self) -> f64 {
        self.carbon.total_co2_kg
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            ValueRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |range, v| ValueRange {
                min: range.min.min(v),
                max: range.max.max(v),
            },
        )
    }
}

/// Headline figures for a quote set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub total_quotes: usize,
    pub price_range_usd: ValueRange,
    pub carbon_range_kg: ValueRange,
    pub fastest_tier: TierId,
    pub cheapest_tier: TierId,
    pub most_eco_friendly_tier: TierId,
}

/// The lane a quote set was priced on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub lane_key: String,
    pub origin_city: String,
    pub destination_city: String,
    pub total_distance_km: f64,
    pub air_distance_km: f64,
    pub ground_distance_km: f64,
    pub complexity: Complexity,
    pub matched: LaneMatch,
    pub is_fallback: bool,
    /// Known cities resembling an unrecognised endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl RouteInfo {
    fn from_resolved(resolved: &ResolvedLane) -> Self {
        let lane: &Lane = &resolved.lane;
        Self {
            lane_key: resolved.key.clone(),
            origin_city: lane.origin.city.clone(),
            destination_city: lane.destination.city.clone(),
            total_distance_km: lane.max_distance_km(),
            air_distance_km: lane.air_distance_km,
            ground_distance_km: lane.ground_distance_km,
            complexity: lane.complexity,
            matched: resolved.matched,
            is_fallback: resolved.is_fallback(),
            suggestions: resolved.suggestions.clone(),
        }
    }
}

/// Request echo plus validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteMetadata {
    pub origin_city: String,
    pub destination_city: String,
    pub weight_kg: f64,
    pub ship_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

/// Every tier's quote for one request, sorted fastest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSet {
    pub quotes: Vec<Quote>,
    pub summary: QuoteSummary,
    pub route_info: RouteInfo,
    pub carbon_comparison: CarbonComparison,
    pub scoring_summary: ScoringSummary,
    pub metadata: QuoteMetadata,
}

impl QuoteSet {
    pub fn quote(&self, tier: TierId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.tier == tier)
    }
}

/// Provisional per-tier result before scoring.
struct TierResult<'a> {
    tier: &'a Tier,
    cost: CostBreakdown,
    carbon: CarbonBreakdown,
    delivery: DeliveryEstimate,
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Generate quotes with the default scoring policy.
pub fn generate_quotes<P>(catalog: &P, request: &QuoteRequest) -> Result<QuoteSet>
where
    P: CatalogProvider + ?Sized,
{
    generate_quotes_with_policy(catalog, request, &ScoringPolicy::default())
}

/// Generate a quote for every tier in the catalog.
///
/// A tier that fails is logged and left out. The request fails only on bad
/// input, an empty catalog, or when no tier could be quoted.
pub fn generate_quotes_with_policy<P>(
    catalog: &P,
    request: &QuoteRequest,
    policy: &ScoringPolicy,
) -> Result<QuoteSet>
where
    P: CatalogProvider + ?Sized,
{
    // Step 1: Validate the request and policy
    request.validate()?;
    policy.validate()?;
    if catalog.tiers().is_empty() {
        return Err(Error::EmptyTierCatalog);
    }

    let origin = request.origin_city.trim();
    let destination = request.destination_city.trim();
    let weight_kg = request.weight_kg;
    let ship_date = request.ship_date.unwrap_or_else(today);

    // Step 2: Resolve the lane
    let resolved = LaneResolver::new(catalog.lanes()).resolve(origin, destination)?;

    // Step 3: Price, footprint, and date every tier
    let results: Vec<TierResult<'_>> = catalog
        .tiers()
        .iter()
        .filter_map(|tier| {
            match quote_tier(&resolved.lane, weight_kg, tier, catalog, ship_date) {
                Ok(result) => Some(result),
                Err(err) => {
                    warn!(tier = %tier.id, lane = %resolved.key, error = %err, "skipping tier");
                    None
                }
            }
        })
        .collect();

    if results.is_empty() {
        return Err(Error::NoQuotesProduced {
            origin: origin.to_string(),
            destination: destination.to_string(),
        });
    }

    // Step 4: Score the set and compare emissions
    let inputs: Vec<ScoreInput> = results
        .iter()
        .map(|r| ScoreInput {
            tier: r.tier.id,
            cost_usd: r.cost.total_usd,
            total_co2_kg: r.carbon.total_co2_kg,
        })
        .collect();
    let scores = score_tiers(&inputs, weight_kg, policy)?;

    let breakdowns: Vec<CarbonBreakdown> = results.iter().map(|r| r.carbon.clone()).collect();
    let no_quotes = || Error::NoQuotesProduced {
        origin: origin.to_string(),
        destination: destination.to_string(),
    };
    let carbon_comparison = compare_carbon(&breakdowns).ok_or_else(no_quotes)?;
    let scoring_summary = summarize(&scores, policy).ok_or_else(no_quotes)?;

    let mut quotes: Vec<Quote> = results
        .into_iter()
        .zip(scores)
        .map(|(result, eco)| {
            let (carbon_badge, carbon_savings_pct) = carbon_comparison
                .for_tier(result.tier.id)
                .map(|c| (c.badge, c.savings_vs_highest_pct))
                .unwrap_or((CarbonBadge::Standard, 0.0));
            build_quote(result, eco, carbon_badge, carbon_savings_pct, ship_date)
        })
        .collect();

    // Step 5: Sort by ETA, then emissions, then price
    quotes.sort_by(|a, b| {
        a.eta_hours
            .cmp(&b.eta_hours)
            .then(a.total_co2_kg().total_cmp(&b.total_co2_kg()))
            .then(a.cost_usd.total_cmp(&b.cost_usd))
    });

    // Step 6: Summarize
    let summary = summarize_quotes(&quotes).ok_or_else(no_quotes)?;
    let generated_at = Utc::now();
    let metadata = QuoteMetadata {
        origin_city: origin.to_string(),
        destination_city: destination.to_string(),
        weight_kg,
        ship_date,
        generated_at,
        valid_until: generated_at + Duration::hours(QUOTE_VALIDITY_HOURS),
    };

    info!(
        lane = %resolved.key,
        fallback = resolved.is_fallback(),
        quotes = quotes.len(),
        weight_kg,
        "generated quotes"
    );

    Ok(QuoteSet {
        quotes,
        summary,
        route_info: RouteInfo::from_resolved(&resolved),
        carbon_comparison,
        scoring_summary,
        metadata,
    })
}

fn quote_tier<'a, P>(
    lane: &Lane,
    weight_kg: f64,
    tier: &'a Tier,
    catalog: &P,
    ship_date: NaiveDate,
) -> Result<TierResult<'a>>
where
    P: CatalogProvider + ?Sized,
{
    let cost = calculate_cost(lane, weight_kg, tier, catalog.weight_bands()).map_err(|err| {
        Error::TierComputation {
            tier: tier.id,
            message: err.to_string(),
        }
    })?;
    let carbon = calculate_carbon(lane, weight_kg, tier).map_err(|err| Error::TierComputation {
        tier: tier.id,
        message: err.to_string(),
    })?;
    let delivery = estimate_delivery(tier, ship_date);

    Ok(TierResult {
        tier,
        cost,
        carbon,
        delivery,
    })
}

fn build_quote(
    result: TierResult<'_>,
    eco: EcoScore,
    carbon_badge: CarbonBadge,
    carbon_savings_pct: f64,
    ship_date: NaiveDate,
) -> Quote {
    let tier = result.tier;
    Quote {
        tier: tier.id,
        name: tier.name.clone(),
        code: tier.code.clone(),
        commitment: tier.commitment.clone(),
        commitment_with_date: commitment_with_date(tier, ship_date),
        commitment_summary: formatted_commitment(tier.eta_hours, &tier.commitment),
        eta_hours: tier.eta_hours,
        priority: tier.priority,
        cost_usd: result.cost.total_usd,
        cost: result.cost,
        carbon: result.carbon,
        delivery: result.delivery,
        eco,
        carbon_badge,
        carbon_savings_pct,
        tier_badge: tier.badge,
        tracking_included: tier.tracking_included,
        insurance_included: tier.insurance_included,
        signature_required: tier.signature_required,
    }
}

/// Summarize sorted quotes. The fastest tier is the first quote.
fn summarize_quotes(quotes: &[Quote]) -> Option<QuoteSummary> {
    let fastest = quotes.first()?;
    let cheapest = quotes
        .iter()
        .min_by(|a, b| a.cost_usd.total_cmp(&b.cost_usd))?;
    let greenest = quotes
        .iter()
        .min_by(|a, b| a.total_co2_kg().total_cmp(&b.total_co2_kg()))?;

    Some(QuoteSummary {
        total_quotes: quotes.len(),
        price_range_usd: ValueRange::over(quotes.iter().map(|q| q.cost_usd)),
        carbon_range_kg: ValueRange::over(quotes.iter().map(Quote::total_co2_kg)),
        fastest_tier: fastest.tier,
        cheapest_tier: cheapest.tier,
        most_eco_friendly_tier: greenest.tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReferenceCatalog;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn request_validation() {
        let ok = QuoteRequest::new("New York", "Los Angeles", 5.0);
        assert!(ok.validate().is_ok());

        for bad in [
            QuoteRequest::new("  ", "Los Angeles", 5.0),
            QuoteRequest::new("New York", "", 5.0),
            QuoteRequest::new("New York", " new york ", 5.0),
            QuoteRequest::new("Zürich", "ZÜRICH", 5.0),
            QuoteRequest::new("New York", "Los Angeles", 0.0),
            QuoteRequest::new("New York", "Los Angeles", 71.0),
            QuoteRequest::new("New York", "Los Angeles", f64::NAN),
        ] {
            assert!(
                matches!(bad.validate(), Err(Error::InvalidInput { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn quotes_every_tier_sorted_by_eta() {
        let catalog = ReferenceCatalog::builtin();
        let request = QuoteRequest::new("New York", "Los Angeles", 5.0).with_ship_date(monday());
        let set = generate_quotes(&catalog, &request).unwrap();

        assert_eq!(set.quotes.len(), 6);
        let etas: Vec<u32> = set.quotes.iter().map(|q| q.eta_hours).collect();
        assert_eq!(etas, vec![14, 16, 20, 40, 72, 120]);
        assert_eq!(set.summary.fastest_tier, TierId::NextDayAirEarly);
        assert_eq!(set.summary.cheapest_tier, TierId::Ground);
        assert_eq!(set.summary.most_eco_friendly_tier, TierId::Ground);
        assert_eq!(set.route_info.lane_key, "NYC_LA");
        assert!(!set.route_info.is_fallback);
    }

    #[test]
    fn metadata_validity_window() {
        let catalog = ReferenceCatalog::builtin();
        let request = QuoteRequest::new("Seattle", "Miami", 3.0).with_ship_date(monday());
        let set = generate_quotes(&catalog, &request).unwrap();
        assert_eq!(
            set.metadata.valid_until - set.metadata.generated_at,
            Duration::hours(24)
        );
        assert_eq!(set.metadata.ship_date, monday());
    }

    #[test]
    fn empty_lane_catalog_aborts() {
        let catalog = ReferenceCatalog::builtin().with_lanes(Vec::new()).unwrap();
        let request = QuoteRequest::new("New York", "Los Angeles", 5.0);
        assert!(matches!(
            generate_quotes(&catalog, &request),
            Err(Error::EmptyLaneCatalog)
        ));
    }

    #[test]
    fn broken_lane_yields_no_quotes() {
        let catalog = ReferenceCatalog::builtin();
        let mut lanes = catalog.lanes().to_vec();
        for lane in &mut lanes {
            lane.air_distance_km = 0.0;
            lane.ground_distance_km = 0.0;
        }
        // Construction validates lanes, so build a provider that skips it.
        struct Unchecked {
            inner: ReferenceCatalog,
            lanes: Vec<Lane>,
        }
        impl CatalogProvider for Unchecked {
            fn tiers(&self) -> &[Tier] {
                self.inner.tiers()
            }
            fn lanes(&self) -> &[Lane] {
                &self.lanes
            }
            fn weight_bands(&self) -> &[crate::catalog::WeightBand] {
                self.inner.weight_bands()
            }
        }
        let provider = Unchecked {
            inner: catalog,
            lanes,
        };
        let request = QuoteRequest::new("New York", "Los Angeles", 5.0);
        assert!(matches!(
            generate_quotes(&provider, &request),
            Err(Error::NoQuotesProduced { .. })
        ));
    }
}

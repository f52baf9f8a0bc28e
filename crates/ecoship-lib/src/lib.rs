//! Ecoship library entry points.
//!
//! This crate prices a parcel across every delivery tier on a lane and pairs
//! each price with a carbon footprint, a delivery date, and an
//! eco-efficiency score. Reference data (tiers, lanes, weight bands) lives in
//! an immutable [`ReferenceCatalog`]. Higher-level consumers (CLI, HTTP
//! service) should call [`generate_quotes`] instead of reimplementing the
//! pipeline.
//!

#![deny(warnings)]

pub mod carbon;
pub mod catalog;
pub mod constants;
pub mod cost;
pub mod delivery;
pub mod eco_score;
pub mod error;
pub mod quote;
pub mod resolver;

pub use carbon::{calculate_carbon, compare_carbon, CarbonBadge, CarbonBreakdown, CarbonComparison};
pub use catalog::{
    load_lanes_from_path, load_lanes_from_reader, CatalogProvider, Complexity, Lane, Location,
    ReferenceCatalog, ServiceClass, Tier, TierBadge, TierId, TransportMix, WeightBand,
};
pub use cost::{calculate_cost, distance_multiplier, CostBreakdown};
pub use delivery::{
    alternative_dates, estimate_delivery, format_delivery_date, DateRejection, DeliveryEstimate,
    DeliveryOption,
};
pub use eco_score::{
    nominal_point_range, score_tiers, EcoScore, EcoTier, ScoreInput, ScoringPolicy,
    ScoringSummary,
};
pub use error::{Error, Result};
pub use quote::{
    generate_quotes, generate_quotes_with_policy, Quote, QuoteRequest, QuoteSet, QuoteSummary,
    RouteInfo,
};
pub use resolver::{LaneMatch, LaneResolver, ResolvedLane};

//! Output formatting for quotes, lanes, tiers, and delivery estimates.
//!
//! Text renderers write aligned tables; JSON rendering serializes the
//! library types directly so scripts see the same shape as the HTTP API.

use std::io::{self, Write};

use chrono::NaiveDate;
use serde::Serialize;

use ecoship_lib::delivery::DeliveryOption;
use ecoship_lib::{
    nominal_point_range, DeliveryEstimate, Lane, QuoteSet, ServiceClass, Tier, TierId,
};

use crate::terminal::{format_usd, ColorPalette};

/// Serialize any value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Render every quote in a set as a table followed by the summary lines.
pub fn render_quote_set<W: Write>(
    out: &mut W,
    set: &QuoteSet,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    let route = &set.route_info;

    writeln!(
        out,
        "{}Quotes for {} -> {}{} ({} kg, lane {}, {:.0} km)",
        p.white_bold,
        route.origin_city,
        route.destination_city,
        p.reset,
        set.metadata.weight_kg,
        route.lane_key,
        route.total_distance_km
    )?;

    if route.is_fallback {
        writeln!(
            out,
            "{}Note: no catalog lane for this city pair; prices use an estimated lane.{}",
            p.yellow, p.reset
        )?;
        if !route.suggestions.is_empty() {
            writeln!(
                out,
                "{}Did you mean: {}?{}",
                p.yellow,
                route.suggestions.join(", "),
                p.reset
            )?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{:<24} {:>5} {:>12} {:>10} {:>6}  {:<10} {:<18} Delivery",
        "Tier", "ETA", "Cost", "CO2 (kg)", "Eco", "Rating", "Carbon"
    )?;
    for quote in &set.quotes {
        let eco_color = p.eco(quote.eco.eco_tier);
        writeln!(
            out,
            "{:<24} {:>4}h {:>12} {:>10.3} {}{:>6.1}  {:<10}{} {:<18} {}{}{}",
            quote.name,
            quote.eta_hours,
            format_usd(quote.cost_usd),
            quote.carbon.total_co2_kg,
            eco_color,
            quote.eco.points,
            quote.eco.eco_tier.as_str(),
            p.reset,
            quote.carbon_badge.as_str(),
            p.cyan,
            quote.delivery.formatted,
            p.reset
        )?;
    }

    let summary = &set.summary;
    writeln!(out)?;
    writeln!(
        out,
        "Price range: {} - {}",
        format_usd(summary.price_range_usd.min),
        format_usd(summary.price_range_usd.max)
    )?;
    writeln!(
        out,
        "Carbon range: {:.3} - {:.3} kg CO2",
        summary.carbon_range_kg.min, summary.carbon_range_kg.max
    )?;
    writeln!(out, "Fastest: {}", tier_name(set, summary.fastest_tier))?;
    writeln!(out, "Cheapest: {}", tier_name(set, summary.cheapest_tier))?;
    writeln!(
        out,
        "Most eco-friendly: {}",
        tier_name(set, summary.most_eco_friendly_tier)
    )?;
    writeln!(
        out,
        "{}Valid until {}{}",
        p.gray,
        set.metadata.valid_until.format("%Y-%m-%d %H:%M UTC"),
        p.reset
    )
}

fn tier_name(set: &QuoteSet, tier: TierId) -> String {
    set.quote(tier)
        .map(|q| q.name.clone())
        .unwrap_or_else(|| tier.to_string())
}

/// Render the lane table.
pub fn render_lanes<W: Write>(out: &mut W, lanes: &[Lane]) -> io::Result<()> {
    if lanes.is_empty() {
        return writeln!(out, "No lanes available in catalog.");
    }

    writeln!(out, "Supported lanes ({}):", lanes.len())?;
    writeln!(
        out,
        "{:<30} {:<16} {:<16} {:>8} {:>9} {:>7}  Complexity",
        "Key", "Origin", "Destination", "Air km", "Ground km", "$/kg"
    )?;
    for lane in lanes {
        writeln!(
            out,
            "{:<30} {:<16} {:<16} {:>8.0} {:>9.0} {:>7.2}  {}",
            lane.key,
            lane.origin.city,
            lane.destination.city,
            lane.air_distance_km,
            lane.ground_distance_km,
            lane.base_cost_per_kg,
            lane.complexity.as_str()
        )?;
    }
    Ok(())
}

/// A tier with its advertised eco point range.
#[derive(Debug, Clone, Serialize)]
pub struct TierListing<'a> {
    pub slug: &'static str,
    #[serde(flatten)]
    pub tier: &'a Tier,
    pub eco_points_min: u8,
    pub eco_points_max: u8,
}

impl<'a> TierListing<'a> {
    pub fn new(tier: &'a Tier) -> Self {
        let (min, max) = nominal_point_range(tier.id);
        Self {
            slug: tier.id.slug(),
            tier,
            eco_points_min: min,
            eco_points_max: max,
        }
    }
}

fn class_label(class: ServiceClass) -> &'static str {
    match class {
        ServiceClass::Express => "express",
        ServiceClass::Standard => "standard",
        ServiceClass::Ground => "ground",
    }
}

/// Render the tier table.
pub fn render_tiers<W: Write>(out: &mut W, tiers: &[Tier]) -> io::Result<()> {
    writeln!(out, "Delivery tiers ({}):", tiers.len())?;
    writeln!(
        out,
        "{:<20} {:<24} {:>5} {:>9} {:>8}  {:<9} {:>6}  Commitment",
        "Slug", "Name", "ETA", "Air/Grnd", "Floor", "Class", "Eco"
    )?;
    for tier in tiers {
        let listing = TierListing::new(tier);
        writeln!(
            out,
            "{:<20} {:<24} {:>4}h {:>4.0}/{:<4.0} {:>8}  {:<9} {:>6}  {}",
            listing.slug,
            tier.name,
            tier.eta_hours,
            tier.mix.air_pct,
            tier.mix.ground_pct,
            format_usd(tier.minimum_charge_usd),
            class_label(tier.service_class),
            format!("{}-{}", listing.eco_points_min, listing.eco_points_max),
            tier.commitment
        )?;
    }
    Ok(())
}

/// Delivery estimate for one tier plus alternative dates.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub tier: TierId,
    pub name: String,
    pub commitment: String,
    pub commitment_with_date: String,
    pub estimate: DeliveryEstimate,
    pub alternatives: Vec<DeliveryOption>,
}

/// Render a delivery report.
pub fn render_delivery<W: Write>(
    out: &mut W,
    report: &DeliveryReport,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    let estimate = &report.estimate;

    writeln!(out, "{}{}{}", p.white_bold, report.name, p.reset)?;
    writeln!(out, "Ship date:      {}", iso(estimate.ship_date))?;
    if estimate.effective_ship_date != estimate.ship_date {
        writeln!(
            out,
            "{}Ships on:       {} (moved off weekend){}",
            p.gray,
            iso(estimate.effective_ship_date),
            p.reset
        )?;
    }
    writeln!(out, "Business days:  {}", estimate.business_days)?;
    writeln!(
        out,
        "Delivers:       {}{}{}",
        p.cyan, report.commitment_with_date, p.reset
    )?;

    if report.alternatives.len() > 1 {
        writeln!(out, "Alternatives:")?;
        for option in report.alternatives.iter().skip(1) {
            writeln!(out, " - {}", option.formatted)?;
        }
    }
    Ok(())
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoship_lib::{generate_quotes, CatalogProvider, QuoteRequest, ReferenceCatalog};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("render succeeds");
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn quote_table_lists_every_tier() {
        let catalog = ReferenceCatalog::builtin();
        let request = QuoteRequest::new("New York", "Los Angeles", 5.0)
            .with_ship_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let set = generate_quotes(&catalog, &request).unwrap();

        let text = render(|out| render_quote_set(out, &set, &ColorPalette::plain()));
        assert!(text.contains("Quotes for New York -> Los Angeles"));
        assert!(text.contains("lane NYC_LA"));
        for tier in catalog.tiers() {
            assert!(text.contains(&tier.name), "{}", tier.name);
        }
        assert!(text.contains("$52.83"));
        assert!(text.contains("Cheapest: UPS Ground"));
        assert!(!text.contains("Note: no catalog lane"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn fallback_notice_is_shown() {
        let catalog = ReferenceCatalog::builtin();
        let request = QuoteRequest::new("Portlnd", "Nashville", 1.0);
        let set = generate_quotes(&catalog, &request).unwrap();

        let text = render(|out| render_quote_set(out, &set, &ColorPalette::plain()));
        assert!(text.contains("Note: no catalog lane"));
        assert!(text.contains("Did you mean:"));
        assert!(text.contains("Portland"));
    }

    #[test]
    fn tier_listing_flattens_tier_fields() {
        let catalog = ReferenceCatalog::builtin();
        let ground = catalog.tier(TierId::Ground).unwrap();
        let value = serde_json::to_value(TierListing::new(ground)).unwrap();
        assert_eq!(value["slug"], "ground");
        assert_eq!(value["id"], "UPS_GROUND");
        assert_eq!(value["eco_points_min"], 21);
        assert_eq!(value["eco_points_max"], 25);
    }

    #[test]
    fn lanes_table_has_header_and_rows() {
        let catalog = ReferenceCatalog::builtin();
        let text = render(|out| render_lanes(out, catalog.lanes()));
        assert!(text.starts_with("Supported lanes (15):"));
        assert!(text.contains("NYC_LA"));
        assert_eq!(render(|out| render_lanes(out, &[])).trim(), "No lanes available in catalog.");
    }
}

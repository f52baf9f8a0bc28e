//! Delivery command handler.

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ecoship_lib::delivery::{alternative_dates, commitment_with_date, estimate_delivery, today};
use ecoship_lib::{CatalogProvider, ReferenceCatalog, TierId};

use crate::OutputFormat;
use ecoship_cli::output::{render_delivery, render_json, DeliveryReport};
use ecoship_cli::terminal::ColorPalette;

/// Handle the delivery subcommand.
///
/// `tier` accepts a catalog key (`UPS_GROUND`) or slug (`ground`).
pub fn handle_delivery(
    catalog: &ReferenceCatalog,
    tier: &str,
    ship_date: Option<NaiveDate>,
    alternatives: usize,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let id: TierId = tier.parse()?;
    let tier = catalog
        .tier(id)
        .with_context(|| format!("tier {id} is not in the loaded catalog"))?;
    let ship_date = ship_date.unwrap_or_else(today);

    let report = DeliveryReport {
        tier: tier.id,
        name: tier.name.clone(),
        commitment: tier.commitment.clone(),
        commitment_with_date: commitment_with_date(tier, ship_date),
        estimate: estimate_delivery(tier, ship_date),
        alternatives: alternative_dates(tier, ship_date, alternatives.max(1)),
    };

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => render_delivery(&mut stdout, &report, palette)?,
        OutputFormat::Json => render_json(&mut stdout, &report)?,
    }
    Ok(())
}

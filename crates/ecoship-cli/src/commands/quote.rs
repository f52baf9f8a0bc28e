//! Quote command handler.

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ecoship_lib::{generate_quotes, QuoteRequest, ReferenceCatalog};

use crate::OutputFormat;
use ecoship_cli::output::{render_json, render_quote_set};
use ecoship_cli::terminal::ColorPalette;

/// Handle the quote subcommand.
pub fn handle_quote(
    catalog: &ReferenceCatalog,
    from: &str,
    to: &str,
    weight_kg: f64,
    ship_date: Option<NaiveDate>,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let mut request = QuoteRequest::new(from, to, weight_kg);
    request.ship_date = ship_date;

    let set = generate_quotes(catalog, &request)
        .with_context(|| format!("failed to quote {from} -> {to}"))?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => render_quote_set(&mut stdout, &set, palette)?,
        OutputFormat::Json => render_json(&mut stdout, &set)?,
    }
    Ok(())
}

//! Tiers command handler.

use std::io;

use anyhow::Result;

use ecoship_lib::{CatalogProvider, ReferenceCatalog};

use crate::OutputFormat;
use ecoship_cli::output::{render_json, render_tiers, TierListing};

/// Handle the tiers subcommand.
pub fn handle_tiers(catalog: &ReferenceCatalog, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => render_tiers(&mut stdout, catalog.tiers())?,
        OutputFormat::Json => {
            let listings: Vec<TierListing<'_>> =
                catalog.tiers().iter().map(TierListing::new).collect();
            render_json(&mut stdout, &listings)?;
        }
    }
    Ok(())
}

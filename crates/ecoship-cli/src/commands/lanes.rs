//! Lanes command handler.

use std::io;

use anyhow::Result;

use ecoship_lib::{CatalogProvider, LaneResolver, ReferenceCatalog};

use crate::OutputFormat;
use ecoship_cli::output::{render_json, render_lanes};

/// Handle the lanes subcommand.
pub fn handle_lanes(catalog: &ReferenceCatalog, format: OutputFormat) -> Result<()> {
    let lanes = LaneResolver::new(catalog.lanes()).supported_lanes();

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => render_lanes(&mut stdout, lanes)?,
        OutputFormat::Json => render_json(&mut stdout, lanes)?,
    }
    Ok(())
}

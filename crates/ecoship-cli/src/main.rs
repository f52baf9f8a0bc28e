mod commands;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ecoship_cli::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-tier shipping quotes with carbon and eco scoring")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Load tiers, lanes, and weight bands from a JSON catalog instead of the builtin tables.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Replace the lane table with a CSV file.
    #[arg(long, global = true)]
    lanes: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote every delivery tier for a parcel between two cities.
    Quote {
        /// Origin city.
        #[arg(long = "from")]
        from: String,
        /// Destination city.
        #[arg(long = "to")]
        to: String,
        /// Parcel weight in kilograms.
        #[arg(long)]
        weight: f64,
        /// Ship date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date)]
        ship_date: Option<NaiveDate>,
    },
    /// List the lanes in the catalog.
    Lanes,
    /// List delivery tiers with their nominal eco point ranges.
    Tiers,
    /// Estimate the delivery date for one tier.
    Delivery {
        /// Tier key or slug, e.g. `ground` or `UPS_2ND_DAY_AIR`.
        #[arg(long)]
        tier: String,
        /// Ship date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date)]
        ship_date: Option<NaiveDate>,
        /// Number of delivery date options to list, including the earliest.
        #[arg(long, default_value_t = 3)]
        alternatives: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let palette = ColorPalette::detect(cli.no_color);
    let catalog = commands::load_catalog(cli.catalog.as_deref(), cli.lanes.as_deref())?;

    match cli.command {
        Command::Quote {
            from,
            to,
            weight,
            ship_date,
        } => commands::quote::handle_quote(
            &catalog, &from, &to, weight, ship_date, cli.format, &palette,
        ),
        Command::Lanes => commands::lanes::handle_lanes(&catalog, cli.format),
        Command::Tiers => commands::tiers::handle_tiers(&catalog, cli.format),
        Command::Delivery {
            tier,
            ship_date,
            alternatives,
        } => commands::delivery::handle_delivery(
            &catalog,
            &tier,
            ship_date,
            alternatives,
            cli.format,
            &palette,
        ),
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got '{value}': {err}"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

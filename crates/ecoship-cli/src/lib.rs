//! Ecoship CLI library.
//!
//! Terminal styling and output formatting shared by the `ecoship` binary's
//! subcommands.

pub mod output;
pub mod terminal;

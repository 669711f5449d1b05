use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invoicely")]
#[command(about = "Record, check and inspect invoices")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print one JSON summary row per invoice, in listing order
    List,
    /// Print a single invoice as JSON
    Show {
        /// Invoice id
        id: String,
    },
    /// Validate an invoice draft (JSON file) without storing it
    Check {
        /// Path to the draft JSON
        path: PathBuf,
    },
    /// Validate an invoice draft and add it to the store
    Submit {
        /// Path to the draft JSON
        path: PathBuf,
    },
}

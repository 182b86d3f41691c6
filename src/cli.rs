use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::EntryKind;

/// Menu Engineer — recipe costing, menu quadrants and fiscal health for a restaurant.
#[derive(Parser, Debug)]
#[command(name = "menu_engineer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the recipe cards JSON file.
    #[arg(short, long, global = true, default_value = "recipes.json")]
    pub recipes: PathBuf,

    /// Path to the ledger JSON file.
    #[arg(short, long, global = true, default_value = "ledger.json")]
    pub ledger: PathBuf,

    /// Optional TOML file overriding engine thresholds.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every menu item into STAR/PLOWHORSE/PUZZLE/DOG.
    Menu,

    /// Show the cost breakdown and pricing for one recipe.
    Costing {
        /// SKU or name (fuzzy matched).
        sku: String,
    },

    /// Try hypothetical ingredient rates and waste for one recipe.
    WhatIf {
        /// SKU or name (fuzzy matched).
        sku: String,
    },

    /// Aggregate the ledger into a fiscal-health view.
    Fiscal {
        /// Vision cash-movement JSON from the CCTV analytics run.
        #[arg(long)]
        vision: Option<PathBuf>,

        /// Also show per-month totals.
        #[arg(long)]
        monthly: bool,
    },

    /// Mark a recipe as essential (kept regardless of quadrant).
    Essential {
        /// SKU or name (fuzzy matched).
        sku: String,

        /// Clear the flag instead of setting it.
        #[arg(long)]
        off: bool,
    },

    /// Append ledger rows from a CSV file.
    Import {
        /// Entry kind: sales, purchase, expense or manpower.
        kind: EntryKind,

        /// CSV file with a header row.
        csv: PathBuf,
    },

    /// Delete one ledger entry.
    DeleteEntry {
        /// Entry kind: sales, purchase, expense or manpower.
        kind: EntryKind,

        /// Zero-based position among the readable entries of that kind.
        index: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Menu
    }
}

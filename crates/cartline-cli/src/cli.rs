use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cartline",
    about = "Cartline — cart bookkeeping and pricing",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog file: a JSON array of products
    #[arg(long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Cart snapshot file
    #[arg(long, global = true, default_value = "cart.json")]
    pub cart: PathBuf,

    /// Pricing configuration (TOML); built-in rates apply when omitted
    #[arg(long, global = true)]
    pub pricing: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a catalog product to the cart
    Add(AddArgs),
    /// Set the quantity of a cart line (0 removes it)
    Set(SetArgs),
    /// Remove a cart line
    Remove(RemoveArgs),
    /// Empty the cart
    Clear,
    /// Show the cart lines
    Show,
    /// Show the order summary
    Totals,
    /// Rebuild the cart from an operation log
    Replay(ReplayArgs),
    /// Check the cart file against the ledger invariants
    Validate,
}

#[derive(Args)]
pub struct AddArgs {
    /// Product id from the catalog
    pub id: String,
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

#[derive(Args)]
pub struct SetArgs {
    pub id: String,
    pub quantity: u32,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Operation log: a JSON array of cart operations
    pub ops: PathBuf,
}

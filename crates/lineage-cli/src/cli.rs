use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lineage_types::AssetRef;

#[derive(Parser)]
#[command(
    name = "lineage",
    about = "Inspect asset derivation lineage in a ledger snapshot",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger snapshot (JSON) to query
    #[arg(short, long, global = true, default_value = "ledger.json")]
    pub ledger: PathBuf,

    /// Traversal settings (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a single asset's lineage node
    Tree(AssetArgs),
    /// Show an asset and its same-collection ancestors
    Ancestry(AssetArgs),
    /// Show every asset derived from an asset
    Descendants(AssetArgs),
    /// Show the provenance report for an asset
    Provenance(AssetArgs),
    /// Check whether an asset directly derives from another
    IsDerivative(IsDerivativeArgs),
}

#[derive(Args)]
pub struct AssetArgs {
    /// Asset as `<collection>-<asset id>`
    pub asset: AssetRef,
}

#[derive(Args)]
pub struct IsDerivativeArgs {
    pub asset: AssetRef,
    pub parent: AssetRef,
}

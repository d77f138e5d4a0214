use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use lineage_core::{
    format_generation, relationship_label, LineageConfig, LineageService, Traced,
};
use lineage_ledger::{InMemoryLedger, LedgerSnapshot};
use lineage_types::{LineageNode, ProvenanceMetadata};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => LineageConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LineageConfig::default(),
    };
    let ledger = LedgerSnapshot::from_path(&cli.ledger)
        .and_then(LedgerSnapshot::into_ledger)
        .with_context(|| format!("loading ledger snapshot {}", cli.ledger.display()))?;
    tracing::debug!(records = ledger.len(), "ledger snapshot ready");
    let service = LineageService::with_config(ledger, config)?;
    let format = cli.format;

    match cli.command {
        Command::Tree(args) => {
            let node = service.build_lineage_tree(&args.asset).await?;
            emit(format, &node, print_node)
        }
        Command::Ancestry(args) => {
            let nodes = service.get_ancestry(&args.asset).await?;
            emit(format, &nodes, |nodes| print_nodes("Ancestry", nodes))
        }
        Command::Descendants(args) => {
            let nodes = service.get_descendants(&args.asset).await?;
            emit(format, &nodes, |nodes| print_nodes("Descendants", nodes))
        }
        Command::Provenance(args) => {
            let report = service.get_provenance_metadata(&args.asset).await?;
            emit(format, &report, print_provenance)
        }
        Command::IsDerivative(args) => cmd_is_derivative(&service, args, format).await,
    }
}

async fn cmd_is_derivative(
    service: &LineageService<InMemoryLedger>,
    args: IsDerivativeArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let derived = service.is_derivative_of(&args.asset, &args.parent).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&derived)?),
        OutputFormat::Text if derived => println!(
            "{} {} derives from {}",
            "✓".green().bold(),
            args.asset.to_string().yellow(),
            args.parent.to_string().yellow()
        ),
        OutputFormat::Text => println!(
            "{} {} does not derive from {}",
            "✗".red().bold(),
            args.asset.to_string().yellow(),
            args.parent.to_string().yellow()
        ),
    }
    Ok(())
}

fn emit<T: Serialize>(
    format: OutputFormat,
    traced: &Traced<T>,
    print: impl FnOnce(&T),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(traced)?),
        OutputFormat::Text => {
            print(&traced.value);
            for warning in &traced.warnings {
                println!("{} {}", "warning:".yellow().bold(), warning);
            }
        }
    }
    Ok(())
}

fn print_node(node: &LineageNode) {
    println!(
        "{}  {}",
        node.asset.to_string().yellow().bold(),
        format_generation(node.generation).cyan()
    );
    println!("  Creator: {}", node.creator);
    println!("  Created: {}", node.created_at);
    for link in &node.parents {
        println!(
            "  Parent:  {} ({})",
            link.parent.to_string().yellow(),
            relationship_label(link.relationship)
        );
    }
    for child in &node.children {
        println!("  Child:   {}", child.to_string().yellow());
    }
}

fn print_nodes(title: &str, nodes: &[LineageNode]) {
    println!("{} ({} assets)", title.bold(), nodes.len());
    for node in nodes {
        println!(
            "  {:<24} {:<16} {}",
            node.asset.to_string().yellow(),
            format_generation(node.generation),
            node.creator.short().dimmed()
        );
    }
}

fn print_provenance(meta: &ProvenanceMetadata) {
    let origin = if meta.is_original {
        "Original".green().bold()
    } else {
        format_generation(meta.generation).cyan().bold()
    };
    println!("{}  {}", meta.asset.to_string().yellow().bold(), origin);
    println!("  Creator:     {}", meta.creator);
    println!("  Created:     {}", meta.created_at);
    println!("  Descendants: {}", meta.descendant_count.to_string().bold());
    for parent in &meta.parent_summaries {
        let scope = if parent.cross_collection {
            " [other collection]".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  Parent:      {} ({}){}",
            parent.parent.to_string().yellow(),
            parent.label,
            scope
        );
    }
    for child in &meta.children {
        println!("  Child:       {}", child.to_string().yellow());
    }
}

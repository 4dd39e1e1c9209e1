//! Normalization of every stored constellation and TikZ output

use crate::cli::{Cli, TikzArgs};
use crate::sources::{load_catalog, load_registry};
use anyhow::Context;
use celestial_figures::config::FiguresConfig;
use celestial_figures::emit::emit_document;
use celestial_figures::normalize::{normalize_all, MissingStarPolicy};
use std::fs;
use std::time::Instant;
use tracing::info;

pub fn run(args: &TikzArgs, cli: &Cli, config: &FiguresConfig) -> anyhow::Result<()> {
    let mut options = config.normalize;
    if let Some(span) = args.span {
        anyhow::ensure!(span.is_finite() && span > 0.0, "--span must be positive");
        options.span = span;
    }
    if let Some(decimals) = args.decimals {
        anyhow::ensure!(decimals <= 15, "--decimals must be at most 15");
        options.decimals = decimals;
    }
    let policy = if args.lenient {
        MissingStarPolicy::Skip
    } else {
        config.missing_star
    };

    let registry = load_registry(&cli.figures_path(&args.figures))?;
    let catalog = load_catalog(&args.catalog, cli, config)?;

    let start = Instant::now();
    let normalized = normalize_all(&registry, &catalog, &options, policy)?;
    info!(
        "Normalized {} constellations in {:.2} ms",
        normalized.layouts.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let document = emit_document(&normalized, &config.tikz)?;
    fs::write(&args.output, document)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    let degenerate = normalized
        .layouts
        .iter()
        .filter(|(_, layout)| layout.is_degenerate())
        .count();
    println!("\n=== Summary ===");
    println!("Written: {} constellations to {:?}", normalized.layouts.len(), args.output);
    println!("Degenerate: {}", degenerate);
    println!("Skipped: {}", normalized.skipped.len());
    for (name, star) in &normalized.skipped {
        println!("  {} (HIP {} missing)", name, star);
    }
    Ok(())
}

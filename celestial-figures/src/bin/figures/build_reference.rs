//! Reference table extraction from the Hipparcos main catalog

use crate::cli::{BuildReferenceArgs, Cli};
use crate::sources::{ensure_hip_main, load_hip_main, load_registry, REFERENCE_FILENAME};
use anyhow::Context;
use celestial_figures::config::FiguresConfig;
use tracing::warn;

pub fn run(args: &BuildReferenceArgs, cli: &Cli, config: &FiguresConfig) -> anyhow::Result<()> {
    let registry = load_registry(&cli.figures_path(&args.figures))?;
    let catalog_path = match &args.catalog {
        Some(path) => path.clone(),
        None => ensure_hip_main(cli, config)?,
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| cli.workdir.join(REFERENCE_FILENAME));

    println!("\n=== Reference Table ===");
    println!("Catalog: {:?}", catalog_path);
    println!("Output: {:?}", output);
    println!();

    let catalog = load_hip_main(&catalog_path)?;
    let wanted = registry.referenced_stars();
    let (reference, missing) = catalog.restrict_to(&wanted);
    for id in &missing {
        warn!("HIP {} is referenced by a constellation but has no position", id);
    }
    reference
        .save_csv(&output)
        .with_context(|| format!("Failed to write {:?}", output))?;

    println!("\n=== Summary ===");
    println!("Referenced stars: {}", wanted.len());
    println!("Written: {}", reference.len());
    println!("Missing: {}", missing.len());
    Ok(())
}

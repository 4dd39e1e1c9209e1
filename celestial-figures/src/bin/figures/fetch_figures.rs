//! Constellation line download and conversion to the JSON state

use crate::cli::{Cli, FetchFiguresArgs};
use anyhow::Context;
use celestial_figures::config::FiguresConfig;
use celestial_figures::fetch::ensure_file;
use celestial_figures::registry::fab::{parse_fab, FAB_FILENAME};
use celestial_figures::registry::store;
use std::fs;

pub fn run(args: &FetchFiguresArgs, cli: &Cli, config: &FiguresConfig) -> anyhow::Result<()> {
    fs::create_dir_all(&cli.workdir)?;
    let source = match &args.source {
        Some(path) => path.clone(),
        None => ensure_file(
            &cli.workdir.join(FAB_FILENAME),
            &config.sources.fab_url,
            "constellationship.fab (Stellarium modern sky culture)",
            config.sources.timeout(),
        )?,
    };
    let output = cli.figures_path(&args.output);

    println!("\n=== Constellation Lines ===");
    println!("Source: {:?}", source);
    println!("Output: {:?}", output);
    println!();

    let text =
        fs::read_to_string(&source).with_context(|| format!("Failed to read {:?}", source))?;
    let registry = parse_fab(&text, &source.display().to_string())?;
    store::save(&registry, &output).with_context(|| format!("Failed to write {:?}", output))?;

    let connections: usize = registry.iter().map(|c| c.connections().len()).sum();
    println!("Constellations: {}", registry.len());
    println!("Connections: {}", connections);
    println!("Distinct stars: {}", registry.referenced_stars().len());
    Ok(())
}

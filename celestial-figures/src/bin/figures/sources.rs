//! Loading of the stored registry and the star catalog for subcommands

use crate::cli::{CatalogArgs, Cli};
use anyhow::Context;
use celestial_figures::catalog::hipparcos::{parse_hip_main, HIP_MAIN_FILENAME};
use celestial_figures::catalog::CatalogStore;
use celestial_figures::config::FiguresConfig;
use celestial_figures::fetch::{ensure_file, maybe_gunzip};
use celestial_figures::registry::{store, Registry};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REFERENCE_FILENAME: &str = "star_data.csv";

pub fn load_registry(path: &Path) -> anyhow::Result<Registry> {
    let registry = store::load(path).with_context(|| {
        format!(
            "Failed to load constellations from {:?} (run fetch-figures first)",
            path
        )
    })?;
    info!("Loaded {} constellations from {:?}", registry.len(), path);
    Ok(registry)
}

/// Picks the catalog source: `--reference`, then `--catalog`, then the
/// workdir reference table, then the full Hipparcos catalog (downloaded if
/// needed).
pub fn load_catalog(
    args: &CatalogArgs,
    cli: &Cli,
    config: &FiguresConfig,
) -> anyhow::Result<CatalogStore> {
    if let Some(path) = &args.reference {
        return load_reference(path);
    }
    if let Some(path) = &args.catalog {
        return load_hip_main(path);
    }
    let default_reference = cli.workdir.join(REFERENCE_FILENAME);
    if default_reference.exists() {
        return load_reference(&default_reference);
    }
    let path = ensure_hip_main(cli, config)?;
    load_hip_main(&path)
}

pub fn ensure_hip_main(cli: &Cli, config: &FiguresConfig) -> anyhow::Result<PathBuf> {
    let path = ensure_file(
        &cli.workdir.join(HIP_MAIN_FILENAME),
        &config.sources.catalog_url,
        "hip_main.dat (Hipparcos main catalog)",
        config.sources.timeout(),
    )?;
    Ok(path)
}

pub fn load_reference(path: &Path) -> anyhow::Result<CatalogStore> {
    let catalog = CatalogStore::load_csv(path)
        .with_context(|| format!("Failed to read reference table {:?}", path))?;
    info!("Loaded {} reference stars from {:?}", catalog.len(), path);
    Ok(catalog)
}

pub fn load_hip_main(path: &Path) -> anyhow::Result<CatalogStore> {
    let raw = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let data = maybe_gunzip(&raw).with_context(|| format!("Failed to decompress {:?}", path))?;
    let (catalog, stats) = parse_hip_main(Cursor::new(data))?;
    info!(
        "Parsed {} stars from {:?} ({} without position, {} malformed)",
        stats.kept, path, stats.without_position, stats.malformed
    );
    Ok(catalog)
}

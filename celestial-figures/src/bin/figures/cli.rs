//! CLI argument definitions for figures

use celestial_figures::registry::store::FIGURES_FILENAME;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "figures")]
#[command(about = "Constellation stick figures to TikZ pipeline")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Working directory for downloaded and intermediate files
    #[arg(long, global = true, default_value = "data")]
    pub workdir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Path of the persisted registry, `--figures` or the workdir default.
    pub fn figures_path(&self, figures: &Option<PathBuf>) -> PathBuf {
        figures
            .clone()
            .unwrap_or_else(|| self.workdir.join(FIGURES_FILENAME))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download constellation lines and store them as JSON
    FetchFigures(FetchFiguresArgs),

    /// Extract the referenced stars from the Hipparcos catalog into a CSV table
    BuildReference(BuildReferenceArgs),

    /// Print the number of stored constellations
    Count(CountArgs),

    /// Normalize every constellation and write TikZ commands
    Tikz(TikzArgs),

    /// Render one constellation's normalized figure as SVG
    Plot(PlotArgs),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Reference table written by build-reference
    #[arg(long, conflicts_with = "catalog")]
    pub reference: Option<PathBuf>,

    /// Local copy of the Hipparcos main catalog (hip_main.dat, optionally gzipped)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct FetchFiguresArgs {
    /// Read constellation lines from this fab file instead of downloading
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Output JSON file (default: <workdir>/constellations.json)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildReferenceArgs {
    /// Stored constellations (default: <workdir>/constellations.json)
    #[arg(long)]
    pub figures: Option<PathBuf>,

    /// Local copy of the Hipparcos main catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Output CSV file (default: <workdir>/star_data.csv)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CountArgs {
    /// Stored constellations (default: <workdir>/constellations.json)
    #[arg(long)]
    pub figures: Option<PathBuf>,
}

#[derive(Args)]
pub struct TikzArgs {
    /// Stored constellations (default: <workdir>/constellations.json)
    #[arg(long)]
    pub figures: Option<PathBuf>,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output TeX file
    #[arg(long, default_value = "const_commands.tex")]
    pub output: PathBuf,

    /// Skip constellations with stars missing from the catalog instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Extent of the larger axis in drawing units
    #[arg(long)]
    pub span: Option<f64>,

    /// Decimal places kept in coordinates
    #[arg(long)]
    pub decimals: Option<u32>,
}

#[derive(Args)]
pub struct PlotArgs {
    /// Constellation abbreviation, e.g. Gem
    pub name: String,

    /// Stored constellations (default: <workdir>/constellations.json)
    #[arg(long)]
    pub figures: Option<PathBuf>,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output SVG file (default: <name>.svg)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

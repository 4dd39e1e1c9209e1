//! Figures: constellation stick figures to TikZ pipeline CLI
//!
//! Fetches the Stellarium constellation lines and the Hipparcos catalog,
//! keeps the intermediate state in a working directory, and writes TikZ
//! commands or SVG previews.

mod build_reference;
mod cli;
mod count;
mod fetch_figures;
mod plot;
mod sources;
mod tikz;

use anyhow::Context;
use celestial_figures::config::FiguresConfig;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => FiguresConfig::from_file(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => FiguresConfig::default(),
    };

    match &cli.command {
        Commands::FetchFigures(args) => fetch_figures::run(args, &cli, &config),
        Commands::BuildReference(args) => build_reference::run(args, &cli, &config),
        Commands::Count(args) => count::run(args, &cli),
        Commands::Tikz(args) => tikz::run(args, &cli, &config),
        Commands::Plot(args) => plot::run(args, &cli, &config),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

use crate::cli::{Cli, PlotArgs};
use crate::sources::{load_catalog, load_registry};
use celestial_figures::config::FiguresConfig;
use celestial_figures::normalize::normalize;
use celestial_figures::plot::figure_svg;
use std::path::PathBuf;

pub fn run(args: &PlotArgs, cli: &Cli, config: &FiguresConfig) -> anyhow::Result<()> {
    let registry = load_registry(&cli.figures_path(&args.figures))?;
    let Some(constellation) = registry.get(&args.name) else {
        anyhow::bail!("Unknown constellation {:?}", args.name);
    };
    let catalog = load_catalog(&args.catalog, cli, config)?;
    let layout = normalize(constellation, &catalog, &config.normalize)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.svg", args.name)));
    figure_svg(constellation, &layout, &output)?;
    println!(
        "{}: {} stars, {} connections -> {:?}",
        constellation.name(),
        layout.len(),
        constellation.connections().len(),
        output
    );
    Ok(())
}

use crate::cli::{Cli, CountArgs};
use anyhow::Context;
use celestial_figures::registry::store;

pub fn run(args: &CountArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.figures_path(&args.figures);
    let n = store::count(&path).with_context(|| format!("Failed to read {:?}", path))?;
    println!("{}", n);
    Ok(())
}

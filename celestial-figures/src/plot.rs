//! SVG preview of a normalized constellation figure.

use crate::catalog::StarId;
use crate::error::{Error, Result};
use crate::normalize::{Layout, NormalizedPoint};
use crate::registry::Constellation;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

type PlotResult = std::result::Result<(), Box<dyn std::error::Error>>;
type FigureChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders `constellation` with its normalized `layout` to an SVG file.
///
/// Both axes share one range so the figure keeps its aspect ratio.
pub fn figure_svg(constellation: &Constellation, layout: &Layout, path: &Path) -> Result<()> {
    let segments = segments(constellation, layout)?;
    let points: Vec<(f64, f64)> = layout.points().iter().map(|(_, p)| (p.x, p.y)).collect();
    let title = format!("{} constellation", constellation.name());
    render(&points, &segments, &title, path).map_err(|e| Error::Plot(e.to_string()))
}

fn segments(constellation: &Constellation, layout: &Layout) -> Result<Vec<[(f64, f64); 2]>> {
    let lookup = |id: StarId| {
        layout
            .point(id)
            .map(|p: NormalizedPoint| (p.x, p.y))
            .ok_or_else(|| Error::missing_star(constellation.name(), id))
    };
    constellation
        .connections()
        .iter()
        .map(|c| -> Result<[(f64, f64); 2]> { Ok([lookup(c.0)?, lookup(c.1)?]) })
        .collect()
}

fn render(
    points: &[(f64, f64)],
    segments: &[[(f64, f64); 2]],
    title: &str,
    path: &Path,
) -> PlotResult {
    let range = square_range(points);
    let root = SVGBackend::new(path, (700, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(range.0..range.1, range.0..range.1)?;
    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;
    draw_segments(&mut chart, segments)?;
    draw_points(&mut chart, points)?;
    root.present()?;
    Ok(())
}

fn square_range(points: &[(f64, f64)]) -> (f64, f64) {
    let max = points
        .iter()
        .flat_map(|&(x, y)| [x, y])
        .fold(0.0, f64::max);
    let pad = max * 0.1 + 0.5;
    (-pad, max + pad)
}

fn draw_segments<DB: DrawingBackend>(
    chart: &mut FigureChart<'_, DB>,
    segments: &[[(f64, f64); 2]],
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    chart.draw_series(
        segments
            .iter()
            .map(|s| PathElement::new(s.to_vec(), BLUE.stroke_width(1))),
    )?;
    Ok(())
}

fn draw_points<DB: DrawingBackend>(
    chart: &mut FigureChart<'_, DB>,
    points: &[(f64, f64)],
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, BLACK.filled())),
    )?;
    Ok(())
}

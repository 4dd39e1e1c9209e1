//! Per-constellation projection into a small drawing frame.
//!
//! For one constellation the sky positions of its stars go through:
//!
//! 1. RA negation, so east is drawn to the left as on a sky chart
//! 2. degree to radian conversion of both axes
//! 3. translation so the lowest x and the lowest y are both zero
//! 4. uniform scaling so the larger of the two extents equals `span`
//! 5. rounding to `decimals` places, half to even
//!
//! Rounding multiplies by `10^decimals`, rounds ties to even and divides
//! back, so `0.125` becomes `0.12` and `0.375` becomes `0.38`. A constellation whose
//! points all coincide (or that has no stars) has no defined scale and comes
//! out as a degenerate layout with every point at the origin.

use crate::catalog::{CatalogStore, StarId};
use crate::error::{Error, Result};
use crate::registry::{Constellation, Registry};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Extent of the larger axis after scaling.
    pub span: f64,
    /// Decimal places kept in the output.
    pub decimals: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            span: 5.0,
            decimals: 2,
        }
    }
}

/// What to do when a constellation references a star absent from the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStarPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Drop the constellation and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// Normalized positions for one constellation, in its star order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    points: Vec<(StarId, NormalizedPoint)>,
    degenerate: bool,
}

impl Layout {
    pub fn points(&self) -> &[(StarId, NormalizedPoint)] {
        &self.points
    }

    /// Lookup by id. Points are in ascending id order, so this is a binary
    /// search.
    pub fn point(&self, id: StarId) -> Option<NormalizedPoint> {
        self.points
            .binary_search_by_key(&id, |(star, _)| *star)
            .ok()
            .map(|i| self.points[i].1)
    }

    /// True when no scale could be derived and every point sits at the origin.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn normalize(
    constellation: &Constellation,
    catalog: &CatalogStore,
    options: &NormalizeOptions,
) -> Result<Layout> {
    let name = constellation.name();
    let stars = constellation.stars();

    let mut xs = Vec::with_capacity(stars.len());
    let mut ys = Vec::with_capacity(stars.len());
    for &id in stars {
        let pos = catalog.position(name, id)?;
        xs.push(-pos.ra_degrees * PI / 180.0);
        ys.push(pos.dec_degrees * PI / 180.0);
    }

    shift_to_origin(&mut xs);
    shift_to_origin(&mut ys);

    let extent = max_of(&xs).max(max_of(&ys));
    let degenerate = extent <= 0.0;
    if degenerate {
        warn!(
            "{}: stars collapse to a single point, emitting unscaled layout",
            name
        );
    }

    let factor = 10f64.powi(options.decimals as i32);
    let scale = options.span / extent;
    let points = stars
        .iter()
        .zip(xs.iter().zip(ys.iter()))
        .map(|(&id, (&x, &y))| {
            let point = if degenerate {
                NormalizedPoint { x: 0.0, y: 0.0 }
            } else {
                NormalizedPoint {
                    x: round_half_even(x * scale, factor),
                    y: round_half_even(y * scale, factor),
                }
            };
            (id, point)
        })
        .collect();

    Ok(Layout { points, degenerate })
}

fn shift_to_origin(values: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    for v in values.iter_mut() {
        *v -= min;
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

fn round_half_even(value: f64, factor: f64) -> f64 {
    let rounded = (value * factor).round_ties_even() / factor;
    // keep "-0.0" out of the output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Result of normalizing a whole registry.
#[derive(Debug, Clone, Default)]
pub struct Normalized<'a> {
    /// Layouts in registry order.
    pub layouts: Vec<(&'a Constellation, Layout)>,
    /// Constellations dropped under [`MissingStarPolicy::Skip`].
    pub skipped: Vec<(String, StarId)>,
}

/// Normalizes every constellation of `registry`.
///
/// Work is spread across the rayon pool; results come back in registry
/// order. Under [`MissingStarPolicy::Abort`] the first failure in registry
/// order is returned.
pub fn normalize_all<'a>(
    registry: &'a Registry,
    catalog: &CatalogStore,
    options: &NormalizeOptions,
    policy: MissingStarPolicy,
) -> Result<Normalized<'a>> {
    let results: Vec<(&Constellation, Result<Layout>)> = registry
        .as_slice()
        .par_iter()
        .map(|c| (c, normalize(c, catalog, options)))
        .collect();

    let mut out = Normalized::default();
    for (constellation, result) in results {
        match result {
            Ok(layout) => out.layouts.push((constellation, layout)),
            Err(Error::MissingStar {
                constellation: name,
                star,
            }) if policy == MissingStarPolicy::Skip => {
                warn!("Skipping {}: HIP {} not in catalog", name, star);
                out.skipped.push((name, star));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StarPosition;
    use crate::registry::Connection;
    use approx::assert_abs_diff_eq;

    fn catalog(entries: &[(u32, f64, f64)]) -> CatalogStore {
        entries
            .iter()
            .map(|&(id, ra, dec)| (StarId(id), StarPosition::new(ra, dec)))
            .collect()
    }

    fn pt(layout: &Layout, id: u32) -> (f64, f64) {
        let p = layout.point(StarId(id)).unwrap();
        (p.x, p.y)
    }

    #[test]
    fn test_two_stars_same_ra() {
        let cat = catalog(&[(1, 10.0, 20.0), (2, 10.0, 25.0)]);
        let c = Constellation::new("T", vec![Connection::new(1, 2)]);
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        assert_eq!(pt(&layout, 1), (0.0, 0.0));
        assert_eq!(pt(&layout, 2), (0.0, 5.0));
        assert!(!layout.is_degenerate());
    }

    #[test]
    fn test_ra_is_mirrored() {
        // The star with the larger RA lands on the left.
        let cat = catalog(&[(1, 100.0, 0.0), (2, 110.0, 0.0)]);
        let c = Constellation::new("T", vec![Connection::new(1, 2)]);
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        assert_eq!(pt(&layout, 1), (5.0, 0.0));
        assert_eq!(pt(&layout, 2), (0.0, 0.0));
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let cat = catalog(&[(1, 10.0, 0.0), (2, 8.0, 0.0), (3, 10.0, 4.0)]);
        let c = Constellation::new(
            "T",
            vec![Connection::new(1, 2), Connection::new(1, 3)],
        );
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        assert_eq!(pt(&layout, 1), (0.0, 0.0));
        assert_eq!(pt(&layout, 2), (2.5, 0.0));
        assert_eq!(pt(&layout, 3), (0.0, 5.0));
    }

    #[test]
    fn test_min_zero_max_span() {
        let cat = catalog(&[
            (36850, 113.649428, 31.888276),
            (37826, 116.328958, 28.026199),
            (34088, 106.027215, 20.570298),
            (32246, 100.983026, 25.131126),
            (30343, 95.740112, 22.513583),
        ]);
        let c = Constellation::new(
            "Gem",
            vec![
                Connection::new(36850, 34088),
                Connection::new(34088, 32246),
                Connection::new(32246, 30343),
                Connection::new(37826, 36850),
            ],
        );
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        let xs: Vec<f64> = layout.points().iter().map(|(_, p)| p.x).collect();
        let ys: Vec<f64> = layout.points().iter().map(|(_, p)| p.y).collect();
        let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().chain(ys.iter()).copied().fold(0.0, f64::max);
        assert_eq!(min_x, 0.0);
        assert_eq!(min_y, 0.0);
        assert_abs_diff_eq!(max, 5.0, epsilon = 0.01);
        for v in xs.iter().chain(ys.iter()) {
            assert_abs_diff_eq!(v * 100.0, (v * 100.0).round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_points_follow_star_order() {
        let cat = catalog(&[(3, 1.0, 1.0), (1, 2.0, 2.0), (2, 3.0, 3.0)]);
        let c = Constellation::new(
            "T",
            vec![Connection::new(3, 2), Connection::new(2, 1)],
        );
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        let ids: Vec<StarId> = layout.points().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![StarId(1), StarId(2), StarId(3)]);
    }

    #[test]
    fn test_missing_star_fails() {
        let cat = catalog(&[(1, 10.0, 20.0)]);
        let c = Constellation::new("T", vec![Connection::new(1, 999)]);
        let err = normalize(&c, &cat, &NormalizeOptions::default()).unwrap_err();
        assert!(
            matches!(err, Error::MissingStar { star: StarId(999), .. }),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_identical_coordinates_are_degenerate() {
        let cat = catalog(&[(1, 10.0, 20.0), (2, 10.0, 20.0)]);
        let c = Constellation::new("T", vec![Connection::new(1, 2)]);
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        assert!(layout.is_degenerate());
        assert_eq!(pt(&layout, 1), (0.0, 0.0));
        assert_eq!(pt(&layout, 2), (0.0, 0.0));
    }

    #[test]
    fn test_self_connection_is_degenerate() {
        let cat = catalog(&[(7, 45.0, -10.0)]);
        let c = Constellation::new("T", vec![Connection::new(7, 7)]);
        let layout = normalize(&c, &cat, &NormalizeOptions::default()).unwrap();
        assert!(layout.is_degenerate());
        assert_eq!(layout.len(), 1);
        assert_eq!(pt(&layout, 7), (0.0, 0.0));
    }

    #[test]
    fn test_empty_constellation_is_degenerate() {
        let c = Constellation::new("T", Vec::new());
        let layout = normalize(&c, &CatalogStore::new(), &NormalizeOptions::default()).unwrap();
        assert!(layout.is_degenerate());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_custom_span_and_decimals() {
        let cat = catalog(&[(1, 0.0, 0.0), (2, 0.0, 3.0), (3, -1.0, 0.0)]);
        let c = Constellation::new(
            "T",
            vec![Connection::new(1, 2), Connection::new(1, 3)],
        );
        let options = NormalizeOptions {
            span: 10.0,
            decimals: 1,
        };
        let layout = normalize(&c, &cat, &options).unwrap();
        assert_eq!(pt(&layout, 2), (0.0, 10.0));
        // 1/3 of the span, one decimal
        assert_eq!(pt(&layout, 3), (3.3, 0.0));
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.125, 100.0), 0.12);
        assert_eq!(round_half_even(0.375, 100.0), 0.38);
        assert_eq!(round_half_even(2.5, 1.0), 2.0);
        assert_eq!(round_half_even(-0.001, 100.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_idempotent() {
        let cat = catalog(&[(1, 83.0, -5.0), (2, 88.8, 7.4), (3, 78.6, -8.2)]);
        let c = Constellation::new(
            "Ori",
            vec![Connection::new(1, 2), Connection::new(1, 3)],
        );
        let options = NormalizeOptions::default();
        let a = normalize(&c, &cat, &options).unwrap();
        let b = normalize(&c, &cat, &options).unwrap();
        for ((ia, pa), (ib, pb)) in a.points().iter().zip(b.points()) {
            assert_eq!(ia, ib);
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        }
    }

    fn registry_with_gap() -> (Registry, CatalogStore) {
        let registry = Registry::from_entries([
            ("A", vec![Connection::new(1, 2)]),
            ("B", vec![Connection::new(2, 999)]),
            ("C", vec![Connection::new(3, 1)]),
        ]);
        let cat = catalog(&[(1, 10.0, 20.0), (2, 10.0, 25.0), (3, 12.0, 20.0)]);
        (registry, cat)
    }

    #[test]
    fn test_normalize_all_abort() {
        let (registry, cat) = registry_with_gap();
        let err = normalize_all(
            &registry,
            &cat,
            &NormalizeOptions::default(),
            MissingStarPolicy::Abort,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingStar { ref constellation, .. } if constellation == "B"));
    }

    #[test]
    fn test_normalize_all_skip_keeps_order() {
        let (registry, cat) = registry_with_gap();
        let out = normalize_all(
            &registry,
            &cat,
            &NormalizeOptions::default(),
            MissingStarPolicy::Skip,
        )
        .unwrap();
        let names: Vec<&str> = out.layouts.iter().map(|(c, _)| c.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(out.skipped, vec![("B".to_string(), StarId(999))]);
    }

    #[test]
    fn test_normalize_all_matches_sequential() {
        let entries: Vec<(String, Vec<Connection>)> = (0..40u32)
            .map(|i| (format!("C{}", i), vec![Connection::new(i, i + 1)]))
            .collect();
        let registry = Registry::from_entries(entries);
        let cat: CatalogStore = (0..=40u32)
            .map(|i| {
                let f = i as f64;
                (StarId(i), StarPosition::new(f * 7.3 % 360.0, f * 1.9 - 40.0))
            })
            .collect();
        let options = NormalizeOptions::default();
        let out = normalize_all(&registry, &cat, &options, MissingStarPolicy::Abort).unwrap();
        assert_eq!(out.layouts.len(), 40);
        for ((c, layout), expected) in out.layouts.iter().zip(registry.iter()) {
            assert_eq!(c.name(), expected.name());
            assert_eq!(layout, &normalize(expected, &cat, &options).unwrap());
        }
    }
}

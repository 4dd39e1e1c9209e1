//! In-memory star position catalog keyed by Hipparcos number.
//!
//! A [`CatalogStore`] is built once per run, either from the full Hipparcos
//! main catalog ([`hipparcos::parse_hip_main`]) or from the much smaller
//! reference table written by [`CatalogStore::write_csv`], and is read-only
//! afterwards.
//!
//! The reference table is plain CSV:
//!
//! ```text
//! hip,ra_degrees,dec_degrees
//! 677,2.09652901,29.09082805
//! ```

pub mod hipparcos;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

const CSV_HEADER: &str = "hip,ra_degrees,dec_degrees";

/// Catalog identifier of a single star (a Hipparcos number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub u32);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StarId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(StarId)
    }
}

/// Equatorial position of a star, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPosition {
    pub ra_degrees: f64,
    pub dec_degrees: f64,
}

impl StarPosition {
    pub fn new(ra_degrees: f64, dec_degrees: f64) -> Self {
        Self {
            ra_degrees,
            dec_degrees,
        }
    }
}

/// Star positions indexed by [`StarId`]. Iteration is in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    stars: BTreeMap<StarId, StarPosition>,
}

impl FromIterator<(StarId, StarPosition)> for CatalogStore {
    fn from_iter<I: IntoIterator<Item = (StarId, StarPosition)>>(iter: I) -> Self {
        Self {
            stars: iter.into_iter().collect(),
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: StarId, position: StarPosition) {
        self.stars.insert(id, position);
    }

    pub fn get(&self, id: StarId) -> Option<StarPosition> {
        self.stars.get(&id).copied()
    }

    /// Looks up a star on behalf of `constellation`.
    ///
    /// # Errors
    /// Returns [`Error::MissingStar`] if the id has no catalog entry.
    pub fn position(&self, constellation: &str, id: StarId) -> Result<StarPosition> {
        self.get(id)
            .ok_or_else(|| Error::missing_star(constellation, id))
    }

    pub fn contains(&self, id: StarId) -> bool {
        self.stars.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StarId, StarPosition)> + '_ {
        self.stars.iter().map(|(id, pos)| (*id, *pos))
    }

    /// Returns the subset of this catalog covering `ids`, plus the ids that
    /// had no entry (sorted, deduplicated).
    pub fn restrict_to(&self, ids: &[StarId]) -> (CatalogStore, Vec<StarId>) {
        let mut subset = CatalogStore::new();
        let mut missing = Vec::new();
        for &id in ids {
            match self.get(id) {
                Some(pos) => subset.insert(id, pos),
                None => missing.push(id),
            }
        }
        missing.sort_unstable();
        missing.dedup();
        (subset, missing)
    }

    /// Writes the reference table as CSV, one row per star in id order.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", CSV_HEADER)?;
        for (id, pos) in self.iter() {
            writeln!(writer, "{},{},{}", id, pos.ra_degrees, pos.dec_degrees)?;
        }
        Ok(())
    }

    pub fn save_csv(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a reference table written by [`CatalogStore::write_csv`].
    ///
    /// A leading header row is optional. Blank lines are ignored.
    pub fn read_csv<R: BufRead>(reader: R, source_name: &str) -> Result<Self> {
        let mut store = CatalogStore::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || (line_num == 0 && line.starts_with("hip")) {
                continue;
            }
            let (id, pos) = parse_csv_row(line)
                .ok_or_else(|| Error::parse(source_name, line_num + 1, "malformed row"))?;
            store.insert(id, pos);
        }
        Ok(store)
    }

    pub fn load_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_csv(BufReader::new(file), &path.display().to_string())
    }
}

fn parse_csv_row(line: &str) -> Option<(StarId, StarPosition)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return None;
    }
    let id: StarId = fields[0].parse().ok()?;
    let ra: f64 = fields[1].trim().parse().ok()?;
    let dec: f64 = fields[2].trim().parse().ok()?;
    Some((id, StarPosition::new(ra, dec)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> CatalogStore {
        [
            (StarId(36850), StarPosition::new(113.649428, 31.888276)),
            (StarId(37826), StarPosition::new(116.328958, 28.026199)),
            (StarId(677), StarPosition::new(2.09652901, 29.09082805)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_position_lookup() {
        let store = sample();
        let pos = store.position("Gem", StarId(37826)).unwrap();
        assert_eq!(pos.ra_degrees, 116.328958);
        assert_eq!(pos.dec_degrees, 28.026199);
    }

    #[test]
    fn test_position_missing_star() {
        let store = sample();
        let err = store.position("Gem", StarId(999)).unwrap_err();
        match err {
            Error::MissingStar {
                constellation,
                star,
            } => {
                assert_eq!(constellation, "Gem");
                assert_eq!(star, StarId(999));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_iteration_sorted_by_id() {
        let ids: Vec<StarId> = sample().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![StarId(677), StarId(36850), StarId(37826)]);
    }

    #[test]
    fn test_restrict_to_reports_missing() {
        let store = sample();
        let (subset, missing) =
            store.restrict_to(&[StarId(37826), StarId(5), StarId(677), StarId(5)]);
        assert_eq!(subset.len(), 2);
        assert!(subset.contains(StarId(677)));
        assert!(!subset.contains(StarId(36850)));
        assert_eq!(missing, vec![StarId(5)]);
    }

    #[test]
    fn test_csv_round_trip_is_exact() {
        let store = sample();
        let mut buf = Vec::new();
        store.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("hip,ra_degrees,dec_degrees\n677,"));

        let back = CatalogStore::read_csv(Cursor::new(buf), "star_data.csv").unwrap();
        assert_eq!(back.len(), 3);
        for (id, pos) in store.iter() {
            assert_eq!(back.get(id), Some(pos));
        }
    }

    #[test]
    fn test_read_csv_without_header() {
        let data = "1,10.0,20.0\n\n2,10.0,25.0\n";
        let store = CatalogStore::read_csv(Cursor::new(data), "fixture").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(StarId(2)), Some(StarPosition::new(10.0, 25.0)));
    }

    #[test]
    fn test_read_csv_malformed_row() {
        let data = "hip,ra_degrees,dec_degrees\n1,10.0\n";
        let err = CatalogStore::read_csv(Cursor::new(data), "star_data.csv").unwrap_err();
        assert_eq!(err.to_string(), "star_data.csv:2: malformed row");
    }
}

//! Persisted registry state (`constellations.json`).
//!
//! ```json
//! {
//!     "Gem": {
//!         "connections": [[36850, 37826], ...],
//!         "stars": [36850, 37826, ...]
//!     }
//! }
//! ```
//!
//! Object order follows registry order in both directions. `stars` is always
//! regenerated from `connections` on load; the stored list is only checked.

use super::{unique_stars, Connection, Constellation, Registry};
use crate::catalog::StarId;
use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::warn;

pub const FIGURES_FILENAME: &str = "constellations.json";

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    connections: Vec<Connection>,
    #[serde(default)]
    stars: Vec<StarId>,
}

/// Name-to-record map that keeps document order.
struct OrderedRecords(Vec<(String, Record)>);

impl Serialize for OrderedRecords {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in &self.0 {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderedRecords {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RecordsVisitor;

        impl<'de> Visitor<'de> for RecordsVisitor {
            type Value = OrderedRecords;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of constellation records")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, record)) = map.next_entry::<String, Record>()? {
                    entries.push((name, record));
                }
                Ok(OrderedRecords(entries))
            }
        }

        deserializer.deserialize_map(RecordsVisitor)
    }
}

pub fn write_json<W: Write>(registry: &Registry, writer: W) -> Result<()> {
    let records = OrderedRecords(
        registry
            .iter()
            .map(|c| {
                (
                    c.name().to_string(),
                    Record {
                        connections: c.connections().to_vec(),
                        stars: c.stars().to_vec(),
                    },
                )
            })
            .collect(),
    );
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    records.serialize(&mut ser)?;
    Ok(())
}

pub fn read_json<R: Read>(reader: R) -> Result<Registry> {
    let records: OrderedRecords = serde_json::from_reader(reader)?;
    let mut registry = Registry::new();
    for (name, record) in records.0 {
        check_stars(&name, &record);
        registry.insert(Constellation::new(name, record.connections));
    }
    Ok(registry)
}

pub fn save(registry: &Registry, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(registry, &mut writer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Registry> {
    read_json(BufReader::new(File::open(path)?))
}

/// Number of constellations held in the persisted state, after repeated
/// names collapse the same way [`load`] collapses them.
pub fn count(path: &Path) -> Result<usize> {
    Ok(load(path)?.len())
}

fn check_stars(name: &str, record: &Record) {
    let mut stored = record.stars.clone();
    stored.sort_unstable();
    stored.dedup();
    if stored != unique_stars(&record.connections) {
        warn!(
            "{}: stored star list disagrees with its connections, regenerating",
            name
        );
    }
}

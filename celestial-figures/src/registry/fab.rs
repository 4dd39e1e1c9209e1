//! Stellarium `constellationship.fab` parser.
//!
//! Each non-comment line is `<abbr> <pair count> <hip> <hip> <hip> <hip> ...`,
//! whitespace separated, with consecutive ids forming one connection.

use super::{Connection, Registry};
use crate::catalog::StarId;
use crate::error::{Error, Result};
use tracing::warn;

pub const FAB_URL: &str =
    "https://raw.githubusercontent.com/Stellarium/stellarium/master/skycultures/modern_st/constellationship.fab";
pub const FAB_FILENAME: &str = "constellationship.fab";

pub fn parse_fab(text: &str, source_name: &str) -> Result<Registry> {
    let mut entries = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        entries.push(parse_fab_line(line, source_name, line_num + 1)?);
    }
    Ok(Registry::from_entries(entries))
}

fn parse_fab_line(line: &str, source_name: &str, line_no: usize) -> Result<(String, Vec<Connection>)> {
    let mut fields = line.split_whitespace();
    let name = fields
        .next()
        .ok_or_else(|| Error::parse(source_name, line_no, "empty record"))?;
    let declared: usize = fields
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::parse(source_name, line_no, "missing connection count"))?;

    let ids = fields
        .map(|f| {
            f.parse::<StarId>().map_err(|_| {
                Error::parse(source_name, line_no, format!("invalid star id {:?}", f))
            })
        })
        .collect::<Result<Vec<StarId>>>()?;
    if ids.len() % 2 != 0 {
        return Err(Error::parse(
            source_name,
            line_no,
            format!("{} has an odd number of star ids", name),
        ));
    }

    let connections: Vec<Connection> = ids
        .chunks_exact(2)
        .map(|pair| Connection(pair[0], pair[1]))
        .collect();
    if connections.len() != declared {
        warn!(
            "{}:{}: {} declares {} connections but lists {}",
            source_name,
            line_no,
            name,
            declared,
            connections.len()
        );
    }
    Ok((name.to_string(), connections))
}

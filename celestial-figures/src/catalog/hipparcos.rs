//! Hipparcos main catalog (ESA 1997, CDS I/239) reader.
//!
//! `hip_main.dat` is pipe-delimited, one star per line. Only three fields are
//! used: field 1 (HIP number), field 8 (RA, degrees, ICRS J1991.25) and
//! field 9 (Dec, degrees). About 260 entries carry no astrometric solution;
//! those rows have blank position fields and are skipped.

use super::{CatalogStore, StarId, StarPosition};
use crate::error::Result;
use std::io::BufRead;
use tracing::debug;

pub const HIP_MAIN_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";
pub const HIP_MAIN_FILENAME: &str = "hip_main.dat";

const FIELD_HIP: usize = 1;
const FIELD_RA_DEG: usize = 8;
const FIELD_DEC_DEG: usize = 9;

/// Counters collected while reading `hip_main.dat`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HipStats {
    pub total_lines: u64,
    pub kept: u64,
    pub without_position: u64,
    pub malformed: u64,
}

enum Row {
    Star(StarId, StarPosition),
    NoPosition,
    Malformed,
}

pub fn parse_hip_main<R: BufRead>(reader: R) -> Result<(CatalogStore, HipStats)> {
    let mut store = CatalogStore::new();
    let mut stats = HipStats::default();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.total_lines += 1;
        match parse_hip_line(&line) {
            Row::Star(id, pos) => {
                store.insert(id, pos);
                stats.kept += 1;
            }
            Row::NoPosition => stats.without_position += 1,
            Row::Malformed => {
                stats.malformed += 1;
                debug!("hip_main.dat line {}: unparsable record", line_num + 1);
            }
        }
    }
    Ok((store, stats))
}

fn parse_hip_line(line: &str) -> Row {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() <= FIELD_DEC_DEG {
        return Row::Malformed;
    }
    let Ok(id) = fields[FIELD_HIP].parse::<StarId>() else {
        return Row::Malformed;
    };
    let ra = fields[FIELD_RA_DEG].trim();
    let dec = fields[FIELD_DEC_DEG].trim();
    if ra.is_empty() || dec.is_empty() {
        return Row::NoPosition;
    }
    match (ra.parse::<f64>(), dec.parse::<f64>()) {
        (Ok(ra), Ok(dec)) => Row::Star(id, StarPosition::new(ra, dec)),
        _ => Row::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
H|           1| |00 00 00.22|+01 05 20.4| 9.10| |H|000.00091185|+01.08901332| |   3.54|   -5.20|   -1.88|
H|       32349| |06 45 09.25|-16 42 47.3|-1.44| |H|101.28854105|-16.71314306| | 379.21| -546.01|-1223.08|
H|         114| |00 01 22.08|-23 36 12.9| 9.39| |G|            |            | |       |        |        |
H|      abc| |00 00 00.00|+00 00 00.0| 9.10| |H|000.0|+00.0| |

";

    #[test]
    fn test_parse_hip_main_keeps_positioned_stars() {
        let (store, stats) = parse_hip_main(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(store.len(), 2);
        let sirius = store.get(StarId(32349)).unwrap();
        assert_eq!(sirius.ra_degrees, 101.28854105);
        assert_eq!(sirius.dec_degrees, -16.71314306);
        let first = store.get(StarId(1)).unwrap();
        assert_eq!(first.ra_degrees, 0.00091185);
        assert_eq!(first.dec_degrees, 1.08901332);
        assert_eq!(
            stats,
            HipStats {
                total_lines: 4,
                kept: 2,
                without_position: 1,
                malformed: 1,
            }
        );
    }

    #[test]
    fn test_blank_position_is_not_zero() {
        let (store, _) = parse_hip_main(Cursor::new(SAMPLE)).unwrap();
        assert!(store.get(StarId(114)).is_none());
    }

    #[test]
    fn test_short_record_is_malformed() {
        assert!(matches!(parse_hip_line("H|1|"), Row::Malformed));
    }
}

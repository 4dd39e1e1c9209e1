//! TikZ output: one `\newcommand` per constellation.
//!
//! ```text
//! \newcommand{\Tri}{
//! 	\constellation{
//! 		\starAt{0.0, 1.77}{0.1cm}
//! 		\starAt{5.0, 0.0}{0.1cm}
//!
//! 		\connectStars{0.0, 1.77}{5.0, 0.0}
//! 	}
//! }
//! ```
//!
//! Stars are placed in layout order, lines follow connection order. The
//! `\constellation`, `\starAt` and `\connectStars` macros are defined by the
//! consuming LaTeX document; their names are configurable through
//! [`TikzStyle`].

use crate::error::{Error, Result};
use crate::normalize::{Layout, Normalized, NormalizedPoint};
use crate::registry::Constellation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TikzStyle {
    /// Wrapper macro around one constellation's drawing commands.
    pub group: String,
    /// Star marker macro, called as `\point{x, y}{radius}`.
    pub point: String,
    /// Line macro, called as `\line{xa, ya}{xb, yb}`.
    pub line: String,
    /// Marker radius, including its TeX unit.
    pub radius: String,
}

impl Default for TikzStyle {
    fn default() -> Self {
        Self {
            group: "constellation".to_string(),
            point: "starAt".to_string(),
            line: "connectStars".to_string(),
            radius: "0.1cm".to_string(),
        }
    }
}

/// Formats a coordinate in shortest round-trip form, always with a decimal
/// point (`0.0`, `5.0`, `2.37`).
pub fn format_coord(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || !value.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}

fn format_pair(p: NormalizedPoint) -> String {
    format!("{}, {}", format_coord(p.x), format_coord(p.y))
}

pub fn emit_block(
    constellation: &Constellation,
    layout: &Layout,
    style: &TikzStyle,
) -> Result<String> {
    let name = constellation.name();
    let mut out = format!("\\newcommand{{\\{}}}{{\n\t\\{}{{", name, style.group);
    for (_, p) in layout.points() {
        out.push_str(&format!(
            "\n\t\t\\{}{{{}}}{{{}}}",
            style.point,
            format_pair(*p),
            style.radius
        ));
    }
    out.push_str("\n\t");
    for connection in constellation.connections() {
        let a = layout
            .point(connection.0)
            .ok_or_else(|| Error::missing_star(name, connection.0))?;
        let b = layout
            .point(connection.1)
            .ok_or_else(|| Error::missing_star(name, connection.1))?;
        out.push_str(&format!(
            "\n\t\t\\{}{{{}}}{{{}}}",
            style.line,
            format_pair(a),
            format_pair(b)
        ));
    }
    out.push_str("\n\t}\n}\n\n");
    Ok(out)
}

/// Concatenates the blocks of every normalized constellation in registry
/// order.
pub fn emit_document(normalized: &Normalized<'_>, style: &TikzStyle) -> Result<String> {
    let mut doc = String::new();
    for (constellation, layout) in &normalized.layouts {
        doc.push_str(&emit_block(constellation, layout, style)?);
    }
    Ok(doc)
}

//! Constellation stick figures, normalized for typeset diagrams.
//!
//! Reads the Stellarium constellation line definitions and the Hipparcos
//! star catalog, projects each constellation into a small drawing frame and
//! writes one TikZ command per constellation.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | [`CatalogStore`](catalog::CatalogStore) of star positions, Hipparcos reader, CSV reference table |
//! | [`registry`] | [`Registry`](registry::Registry) of constellations, fab parser, JSON state |
//! | [`normalize`] | [`normalize`](normalize::normalize) into the drawing frame, [`normalize_all`](normalize::normalize_all) |
//! | [`emit`] | TikZ [`emit_block`](emit::emit_block) / [`emit_document`](emit::emit_document) |
//! | [`plot`] | SVG preview of one figure |
//! | [`fetch`] | Cached downloads with gzip handling |
//! | [`config`] | TOML configuration |
//!
//! # Quick Start
//!
//! ```
//! use celestial_figures::catalog::{CatalogStore, StarId, StarPosition};
//! use celestial_figures::emit::{emit_block, TikzStyle};
//! use celestial_figures::normalize::{normalize, NormalizeOptions};
//! use celestial_figures::registry::{Connection, Constellation};
//!
//! let catalog: CatalogStore = [
//!     (StarId(1), StarPosition::new(10.0, 20.0)),
//!     (StarId(2), StarPosition::new(10.0, 25.0)),
//! ]
//! .into_iter()
//! .collect();
//! let figure = Constellation::new("Tst", vec![Connection::new(1, 2)]);
//!
//! let layout = normalize(&figure, &catalog, &NormalizeOptions::default())?;
//! let tex = emit_block(&figure, &layout, &TikzStyle::default())?;
//! assert!(tex.contains("\\starAt{0.0, 5.0}{0.1cm}"));
//! # Ok::<(), celestial_figures::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod plot;
pub mod registry;

pub use error::{Error, Result};

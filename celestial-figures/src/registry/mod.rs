//! Constellation stick figures: named, ordered lists of star connections.
//!
//! A [`Registry`] keeps constellations in the order they were first seen.
//! Re-inserting a name replaces its connections but keeps its position, the
//! same way a dictionary overwrite behaves.

pub mod fab;
pub mod store;

use crate::catalog::StarId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A line segment between two stars. Order is kept for output only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection(pub StarId, pub StarId);

impl Connection {
    pub fn new(a: u32, b: u32) -> Self {
        Self(StarId(a), StarId(b))
    }
}

/// One constellation's stick figure.
///
/// `stars` is derived from `connections` at construction: the union of both
/// endpoints of every connection, sorted by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    name: String,
    connections: Vec<Connection>,
    stars: Vec<StarId>,
}

impl Constellation {
    pub fn new(name: impl Into<String>, connections: Vec<Connection>) -> Self {
        let stars = unique_stars(&connections);
        Self {
            name: name.into(),
            connections,
            stars,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn stars(&self) -> &[StarId] {
        &self.stars
    }
}

/// Sorted, deduplicated endpoints of `connections`.
pub fn unique_stars(connections: &[Connection]) -> Vec<StarId> {
    let mut stars: Vec<StarId> = connections.iter().flat_map(|c| [c.0, c.1]).collect();
    stars.sort_unstable();
    stars.dedup();
    stars
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    constellations: Vec<Constellation>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Connection>)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, connections) in entries {
            registry.insert(Constellation::new(name, connections));
        }
        registry
    }

    /// Adds a constellation. An existing entry of the same name is replaced
    /// in place.
    pub fn insert(&mut self, constellation: Constellation) {
        match self.index.get(constellation.name()) {
            Some(&slot) => {
                debug!(
                    "Constellation {} defined twice, keeping the later definition",
                    constellation.name()
                );
                self.constellations[slot] = constellation;
            }
            None => {
                self.index
                    .insert(constellation.name().to_string(), self.constellations.len());
                self.constellations.push(constellation);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Constellation> {
        self.index.get(name).map(|&i| &self.constellations[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constellation> {
        self.constellations.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constellations.iter().map(Constellation::name)
    }

    pub fn len(&self) -> usize {
        self.constellations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constellations.is_empty()
    }

    pub fn as_slice(&self) -> &[Constellation] {
        &self.constellations
    }

    /// Every star referenced by any constellation, sorted and deduplicated.
    pub fn referenced_stars(&self) -> Vec<StarId> {
        let mut stars: Vec<StarId> = self
            .constellations
            .iter()
            .flat_map(|c| c.stars().iter().copied())
            .collect();
        stars.sort_unstable();
        stars.dedup();
        stars
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Constellation;
    type IntoIter = std::slice::Iter<'a, Constellation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

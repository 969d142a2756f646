//! Shape adjacency: which pairs of shapes touch or are wired together.
//!
//! Purpose
//! - Derive a neighbour graph over shapes, either geometrically (bounding boxes
//!   stretched outward and tested for overlap) or from connector segments drawn
//!   between shapes and resolved through a [`ShapesCanvas`](crate::spatial::ShapesCanvas).
//!
//! Invariants
//! - Edges are canonical (`source < target`), never self-loops, unique, and
//!   listed in sorted order.

mod connectors;
mod stretch;

use std::collections::BTreeSet;

use nalgebra::DMatrix;
use serde::Serialize;

use crate::key::ShapeId;

pub use connectors::{
    extract_connection_records, extract_connections, ConnectionEdge, Connector,
};
pub use stretch::{extract_adjacent_shapes, shape_centers};

/// Unordered shape pair stored with `source < target`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AdjacencyEdge {
    pub source: ShapeId,
    pub target: ShapeId,
}

impl AdjacencyEdge {
    /// Canonical edge between `a` and `b`; `None` for a self pair.
    pub fn new(a: ShapeId, b: ShapeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                source: a,
                target: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                source: b,
                target: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Sorted, duplicate-free list of adjacency edges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdjacencyList {
    edges: Vec<AdjacencyEdge>,
}

impl AdjacencyList {
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = AdjacencyEdge>,
    {
        let set: BTreeSet<AdjacencyEdge> = edges.into_iter().collect();
        Self {
            edges: set.into_iter().collect(),
        }
    }

    #[inline]
    pub fn edges(&self) -> &[AdjacencyEdge] {
        &self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AdjacencyEdge> {
        self.edges.iter()
    }

    /// Whether `a` and `b` are adjacent, in either order.
    pub fn contains(&self, a: &ShapeId, b: &ShapeId) -> bool {
        let (s, t) = if a <= b { (a, b) } else { (b, a) };
        self.edges
            .binary_search_by(|e| (&e.source, &e.target).cmp(&(s, t)))
            .is_ok()
    }

    /// Sorted ids that appear in at least one edge.
    pub fn keys(&self) -> Vec<ShapeId> {
        let set: BTreeSet<&ShapeId> = self
            .edges
            .iter()
            .flat_map(|e| [&e.source, &e.target])
            .collect();
        set.into_iter().cloned().collect()
    }

    /// Symmetric 0/1 matrix over `keys()`; row/column `i` is `keys()[i]`.
    pub fn matrix(&self) -> (DMatrix<u8>, Vec<ShapeId>) {
        let keys = self.keys();
        let mut m = DMatrix::<u8>::zeros(keys.len(), keys.len());
        for e in &self.edges {
            if let (Ok(i), Ok(j)) = (keys.binary_search(&e.source), keys.binary_search(&e.target)) {
                m[(i, j)] = 1;
                m[(j, i)] = 1;
            }
        }
        (m, keys)
    }
}

impl<'a> IntoIterator for &'a AdjacencyList {
    type Item = &'a AdjacencyEdge;
    type IntoIter = std::slice::Iter<'a, AdjacencyEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests;

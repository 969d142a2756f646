//! Shape identifiers and the explicit id allocator for unlabeled elements.
//!
//! A `ShapeId` is an ordered composite key. Almost every id in practice has a
//! single part (an element `id` attribute or an allocated integer); composite
//! ids come from callers grouping shapes by several attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};

/// One component of a composite shape key. Integers order before text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyPart {
    Int(i64),
    Text(String),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(n) => write!(f, "{n}"),
            KeyPart::Text(s) => f.write_str(s),
        }
    }
}

/// Stable, totally ordered shape identifier (lexicographic over parts).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId {
    parts: Vec<KeyPart>,
}

impl ShapeId {
    /// Single-part integer id.
    pub fn int(n: i64) -> Self {
        Self {
            parts: vec![KeyPart::Int(n)],
        }
    }

    /// Single-part text id.
    pub fn name(s: impl Into<String>) -> Self {
        Self {
            parts: vec![KeyPart::Text(s.into())],
        }
    }

    /// Composite id; an empty part list is rejected.
    pub fn composite(parts: Vec<KeyPart>) -> Result<Self> {
        if parts.is_empty() {
            return Err(GeomError::invalid("shape key needs at least one part"));
        }
        Ok(Self { parts })
    }

    #[inline]
    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        self.parts.len() == 1
    }

    /// The only part of a single-part key.
    ///
    /// Aggregations that group by one attribute (centres, stretch adjacency)
    /// call this and propagate `AmbiguousShapeKey` for composite keys.
    pub fn single(&self) -> Result<&KeyPart> {
        match self.parts.as_slice() {
            [only] => Ok(only),
            parts => Err(GeomError::AmbiguousShapeKey {
                key: self.to_string(),
                parts: parts.len(),
            }),
        }
    }

    /// Extend this key with one more component, e.g. a loop or triangle index.
    pub fn child(&self, part: KeyPart) -> Self {
        let mut parts = self.parts.clone();
        parts.push(part);
        Self { parts }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.parts.as_slice() {
            return write!(f, "{only}");
        }
        f.write_str("(")?;
        for (i, p) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str(")")
    }
}

impl From<i64> for ShapeId {
    fn from(n: i64) -> Self {
        Self::int(n)
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self::name(s)
    }
}

impl From<String> for ShapeId {
    fn from(s: String) -> Self {
        Self::name(s)
    }
}

/// Hands out integer ids to elements that carry none.
///
/// Passed explicitly through a document load; two loads with fresh allocators
/// number their unlabeled shapes identically.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    pub fn starting_at(first: i64) -> Self {
        Self { next: first }
    }

    /// Return the current id and advance.
    pub fn allocate(&mut self) -> ShapeId {
        let id = ShapeId::int(self.next);
        self.next += 1;
        id
    }

    /// Peek at the id the next `allocate` call returns.
    #[inline]
    pub fn peek(&self) -> i64 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_starts_at_one_and_increments() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate(), ShapeId::int(1));
        assert_eq!(ids.allocate(), ShapeId::int(2));
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn composite_keys_are_ambiguous_for_single_key_aggregations() {
        let k = ShapeId::composite(vec![KeyPart::Text("layer1".into()), KeyPart::Int(4)]).unwrap();
        assert_eq!(k.to_string(), "(layer1, 4)");
        assert_eq!(ShapeId::name("layer1").child(KeyPart::Int(4)), k);
        match k.single() {
            Err(GeomError::AmbiguousShapeKey { parts, .. }) => assert_eq!(parts, 2),
            other => panic!("expected AmbiguousShapeKey, got {other:?}"),
        }
        assert_eq!(ShapeId::name("e1").single().unwrap(), &KeyPart::Text("e1".into()));
        assert!(ShapeId::composite(vec![]).is_err());
    }

    #[test]
    fn ordering_is_numeric_then_text() {
        let mut ids = vec![
            ShapeId::name("b"),
            ShapeId::int(10),
            ShapeId::name("a"),
            ShapeId::int(2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                ShapeId::int(2),
                ShapeId::int(10),
                ShapeId::name("a"),
                ShapeId::name("b")
            ]
        );
    }
}

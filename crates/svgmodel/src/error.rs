//! Error taxonomy shared by parsing, geometry, triangulation and queries.
//!
//! Query misses (`find_shape` on empty space, connectors that hit nothing) are
//! not errors; they surface as `None` or as filtered results.

use thiserror::Error;

/// Everything that can go wrong between path data and spatial queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Malformed number, misplaced separator, or an impossible command sequence.
    #[error("syntax error at byte {pos}: {message}")]
    Syntax { pos: usize, message: String },

    /// A command letter outside the supported `M L H V Z h v` subset.
    #[error("unsupported path command `{letter}` at byte {pos}")]
    UnsupportedCommand { letter: char, pos: usize },

    /// A well-formed command in an impossible place, e.g. drawing before any move.
    #[error("command #{index}: {message}")]
    CommandOrder { index: usize, message: String },

    /// A loop left open where an explicit close is required.
    #[error("loop with {vertices} vertices was never closed")]
    UnclosedLoop { vertices: usize },

    /// A loop closed with fewer than three distinct vertices.
    #[error("loop needs 3 or more vertices, got {vertices}")]
    DegenerateLoop { vertices: usize },

    /// No valid non-overlapping triangle cover exists for the input.
    #[error("cannot triangulate shape: {reason}")]
    UntriangulableShape { reason: String },

    /// A composite key was given where a single-part key is required.
    #[error("shape key {key} has {parts} parts; this operation needs a single-part key")]
    AmbiguousShapeKey { key: String, parts: usize },

    /// Bounding box, centroid or fit requested on empty or zero-area geometry.
    #[error("empty geometry: {what}")]
    EmptyGeometry { what: String },

    /// A configuration value outside its valid range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A document element failed; carries its position in the element stream.
    #[error("shape #{position} (id {id}): {source}")]
    Element {
        position: usize,
        id: String,
        #[source]
        source: Box<GeomError>,
    },
}

impl GeomError {
    pub(crate) fn syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            pos,
            message: message.into(),
        }
    }

    pub(crate) fn empty(what: impl Into<String>) -> Self {
        Self::EmptyGeometry { what: what.into() }
    }

    pub(crate) fn untriangulable(reason: impl Into<String>) -> Self {
        Self::UntriangulableShape {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Innermost error, unwrapping any `Element` context.
    pub fn root_cause(&self) -> &GeomError {
        match self {
            GeomError::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T, E = GeomError> = std::result::Result<T, E>;

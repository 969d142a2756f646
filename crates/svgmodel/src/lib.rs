//! Polygon model, triangulation and point location for SVG shape drawings.
//!
//! Pipeline
//! - `path_data`: path `d` strings and polygon `points` to closed loops.
//! - `geom`: loops and paths with area, centroid, mass, moment and bounds.
//! - `triangulate`: simple polygons to triangles.
//! - `spatial`: fit shapes into a canvas and answer "which shape is at (x, y)".
//! - `adjacency`: neighbouring shapes from stretched boxes or connector lines.
//! - `document`: element stream in, recentred shape collection out.
//!
//! API Policy
//! - `api` re-exports the surface callers are expected to use; module paths may
//!   move between versions.

pub mod adjacency;
pub mod api;
pub mod document;
pub mod error;
pub mod gen;
pub mod geom;
pub mod key;
pub mod path_data;
pub mod spatial;
pub mod triangulate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeomError, Result};
pub use geom::{GeomCfg, Vertex};
pub use key::ShapeId;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::adjacency::{extract_adjacent_shapes, extract_connections, Connector};
    pub use crate::document::{load_document, LoadCfg, ShapeDocument, ShapeElement};
    pub use crate::error::{GeomError, Result};
    pub use crate::geom::{BBox, GeomCfg, Loop, Path, Vertex};
    pub use crate::key::{IdAllocator, ShapeId};
    pub use crate::spatial::{CanvasSize, ShapesCanvas};
    pub use crate::triangulate::triangulate;
}

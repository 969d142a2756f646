//! Curated API surface.
//!
//! Important
//! - Prefer these re-exports over deep module paths; internal layout may change.
//! - Grouped by pipeline stage, leaf first.

// Keys and errors
pub use crate::error::{GeomError, Result};
pub use crate::key::{IdAllocator, KeyPart, ShapeId};
// Path data
pub use crate::path_data::{
    loop_from_points, parse_path, parse_path_data, parse_points, trace_loops, LoopBuilder,
    PathCommand, TraceCfg,
};
// Geometry model
pub use crate::geom::{cross, BBox, GeomCfg, Loop, Path, Rgb, Triangle, Vertex, DEFAULT_DENSITY};
// Triangulation
pub use crate::triangulate::{
    tessellate_path, triangulate, triangulate_points, TaggedTriangle, Triangulation,
};
// Spatial index
pub use crate::spatial::{CanvasSize, FitTransform, ShapesCanvas, TriangleIndex};
// Adjacency
pub use crate::adjacency::{
    extract_adjacent_shapes, extract_connection_records, extract_connections, shape_centers,
    AdjacencyEdge, AdjacencyList, ConnectionEdge, Connector,
};
// Documents
pub use crate::document::{
    load_document, parse_fill, ElementKind, LoadCfg, LoadFailure, ShapeDocument, ShapeElement,
    BOUNDARY_ID,
};
// Random polygons
pub use crate::gen::{
    draw_star, grid_shapes, star_points, ReplayToken as StarReplay, StarCfg, VertexCount,
};

//! Polygon geometry model: loops, paths, bounding boxes.
//!
//! Purpose
//! - Own vertex rings parsed from drawings and derive area, centroid, mass,
//!   moment and bounds from them.
//! - Canonicalize winding once at construction so downstream code (triangulation,
//!   adjacency) can rely on a single orientation.
//!
//! Conventions
//! - y-axis up. `Loop::signed_area` is positive for clockwise rings, and every
//!   stored loop is clockwise.
//! - Loops never repeat their first vertex.

mod path;
mod ring;
mod triangle;
mod types;
pub(crate) mod util;

pub use path::{Path, DEFAULT_DENSITY};
pub use ring::Loop;
pub use triangle::Triangle;
pub use types::{BBox, GeomCfg, Rgb, Vertex};
pub use util::cross;

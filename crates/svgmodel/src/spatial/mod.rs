//! Spatial index: fit-to-canvas transform, triangle BVH, and the shapes canvas.
//!
//! Purpose
//! - Answer "which shape contains canvas point (x, y)" for an interactive
//!   front end, after scaling the drawing into the front end's canvas.
//!
//! Notes
//! - Containment is inclusive with `GeomCfg::eps_contains` slack; on shared
//!   edges the triangle inserted first wins.
//! - The index is rebuilt, never mutated, when the canvas changes.

mod bvh;
mod canvas;
mod fit;

pub use bvh::TriangleIndex;
pub use canvas::ShapesCanvas;
pub use fit::{CanvasSize, FitTransform};

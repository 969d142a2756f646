//! Convex decomposition: simple polygons to triangles.
//!
//! Purpose
//! - Cut each loop into triangles so point location reduces to point-in-triangle.
//!
//! Method
//! - Preprocess (drop repeated and collinear vertices), sweep top to bottom
//!   adding diagonals at split and merge vertices to obtain y-monotone pieces,
//!   then triangulate each piece with the usual two-chain stack walk.
//! - The result is checked: triangle areas must add up to the polygon area.
//!   Self-intersecting input fails that check and is reported as
//!   `UntriangulableShape`.
//!
//! Determinism
//! - Ties in the sweep are broken by x, then by vertex index; nothing depends on
//!   hashing or randomness.

mod monotone;

use serde::Serialize;
use tracing::debug;

use crate::error::{GeomError, Result};
use crate::geom::util::{dedup_ring, signed_area_cw};
use crate::geom::{cross, BBox, GeomCfg, Loop, Path, Triangle, Vertex};
use crate::key::ShapeId;

/// Triangles covering one polygon, wound like the input.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Triangulation {
    triangles: Vec<Triangle>,
}

impl Triangulation {
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }
}

impl IntoIterator for Triangulation {
    type Item = Triangle;
    type IntoIter = std::vec::IntoIter<Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Triangulation {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

/// A triangle with its origin: shape, loop within the shape, running number.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaggedTriangle {
    pub shape: ShapeId,
    pub loop_index: usize,
    /// Numbered across all loops of the shape, starting at 0.
    pub triangle_index: usize,
    pub triangle: Triangle,
}

/// Drop repeated vertices and vertices whose turn is below `eps_collinear`
/// (relative to the adjacent edge lengths), until none remain.
fn preprocess(verts: &[Vertex], cfg: &GeomCfg) -> Vec<Vertex> {
    let mut pts = verts.to_vec();
    dedup_ring(&mut pts);
    let mut changed = true;
    while changed && pts.len() >= 3 {
        changed = false;
        let mut i = 0;
        while i < pts.len() && pts.len() >= 3 {
            let n = pts.len();
            let (p, v, q) = (pts[(i + n - 1) % n], pts[i], pts[(i + 1) % n]);
            let scale = (v - p).norm() * (q - v).norm();
            if cross(p, v, q).abs() <= cfg.eps_collinear * scale {
                pts.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
        dedup_ring(&mut pts);
    }
    pts
}

/// Triangulate a raw vertex ring of either winding.
pub fn triangulate_points(verts: &[Vertex], cfg: &GeomCfg) -> Result<Triangulation> {
    let mut pts = preprocess(verts, cfg);
    if pts.len() < 3 {
        return Err(GeomError::untriangulable(format!(
            "{} vertices left after removing duplicates and collinear points",
            pts.len()
        )));
    }
    let signed = signed_area_cw(&pts);
    let diag2 = BBox::from_points(&pts)
        .map(|b| b.width() * b.width() + b.height() * b.height())
        .unwrap_or(0.0);
    // eps_area is relative to the squared bounding-box diagonal.
    if signed.abs() <= cfg.eps_area * diag2 {
        return Err(GeomError::untriangulable("polygon has no area"));
    }

    // The sweep wants counter-clockwise rings.
    let clockwise = signed > 0.0;
    if clockwise {
        pts.reverse();
    }
    let diagonals = monotone::monotone_diagonals(&pts)?;
    let pieces = monotone::split_pieces(&pts, &diagonals)?;
    let mut triangles = Vec::with_capacity(pts.len() - 2);
    for piece in &pieces {
        for [a, b, c] in monotone::triangulate_monotone(&pts, piece) {
            let t = Triangle::new(pts[a], pts[b], pts[c]);
            triangles.push(if clockwise { t.reversed() } else { t });
        }
    }

    let out = Triangulation { triangles };
    let area = signed.abs();
    let covered = out.total_area();
    if (covered - area).abs() > 1e-9 * area {
        return Err(GeomError::untriangulable(format!(
            "triangles cover {covered} of area {area}; ring is self-intersecting"
        )));
    }
    debug!(
        vertices = pts.len(),
        pieces = pieces.len(),
        triangles = out.len(),
        "triangulated"
    );
    Ok(out)
}

/// Triangulate a loop; triangles come out clockwise like the loop.
pub fn triangulate(ring: &Loop, cfg: &GeomCfg) -> Result<Triangulation> {
    triangulate_points(ring.vertices(), cfg)
}

/// Triangulate every loop of a shape, numbering triangles across loops.
pub fn tessellate_path(id: &ShapeId, path: &Path, cfg: &GeomCfg) -> Result<Vec<TaggedTriangle>> {
    let mut out = Vec::new();
    for (loop_index, ring) in path.loops().iter().enumerate() {
        for triangle in triangulate(ring, cfg)? {
            out.push(TaggedTriangle {
                shape: id.clone(),
                loop_index,
                triangle_index: out.len(),
                triangle,
            });
        }
    }
    Ok(out)
}

//! A single closed polygon boundary.

use serde::Serialize;

use super::types::{BBox, Vertex};
use super::util::signed_area_cw;
use crate::error::{GeomError, Result};

/// One simple closed polygon boundary (vertex ring).
///
/// Invariants:
/// - At least 3 vertices; the first vertex is not repeated at the end.
/// - Clockwise in a y-up frame, i.e. `signed_area() > 0` for non-degenerate
///   input. Construction reverses counter-clockwise input once; that reversal
///   and whole-loop translation are the only mutations a `Loop` undergoes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Loop {
    verts: Vec<Vertex>,
}

impl Loop {
    /// Build a loop, dropping a repeated closing vertex and normalizing winding.
    pub fn new(mut verts: Vec<Vertex>) -> Result<Self> {
        if verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        if verts.len() < 3 {
            return Err(GeomError::DegenerateLoop {
                vertices: verts.len(),
            });
        }
        let mut out = Self { verts };
        out.normalize_winding();
        Ok(out)
    }

    fn normalize_winding(&mut self) {
        if self.signed_area() <= 0.0 {
            self.verts.reverse();
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Always false; loops hold at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Shoelace area; positive for clockwise winding with the y-axis up.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_cw(&self.verts)
    }

    /// Always non-negative. Self-intersecting loops over-count.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    #[inline]
    pub fn mass(&self, density: f64) -> f64 {
        self.area() * density
    }

    /// Area centroid. Fails on zero area instead of dividing by it.
    pub fn centroid(&self) -> Result<Vertex> {
        let n = self.verts.len();
        let mut accum = Vertex::zeros();
        let mut twice_area = 0.0;
        for i in 0..n {
            let p = self.verts[i];
            let q = self.verts[(i + 1) % n];
            let factor = q.x * p.y - p.x * q.y;
            accum += (p + q) * factor;
            twice_area += factor;
        }
        if twice_area == 0.0 || !twice_area.is_finite() {
            return Err(GeomError::empty("centroid of a zero-area loop"));
        }
        Ok(accum / (3.0 * twice_area))
    }

    /// Polar moment of inertia about the origin for a uniform lamina.
    pub fn moment(&self, density: f64) -> Result<f64> {
        let n = self.verts.len();
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            let c = b.x * a.y - b.y * a.x;
            num += c * (a.dot(&a) + a.dot(&b) + b.dot(&b));
            den += c;
        }
        if den == 0.0 {
            return Err(GeomError::empty("moment of a zero-area loop"));
        }
        Ok(self.mass(density) * num / (6.0 * den))
    }

    pub fn bounding_box(&self) -> BBox {
        let first = self.verts[0];
        self.verts[1..]
            .iter()
            .fold(BBox::new(first, first), |b, p| b.including(*p))
    }

    /// Translate every vertex by `(dx, dy)`.
    pub fn offset(&mut self, dx: f64, dy: f64) {
        let d = Vertex::new(dx, dy);
        for v in &mut self.verts {
            *v += d;
        }
    }
}

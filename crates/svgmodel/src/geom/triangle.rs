//! Triangle primitive produced by triangulation and stored in the spatial index.

use serde::Serialize;

use super::types::{BBox, Vertex};
use super::util::cross;

/// Three vertices; winding follows the loop it was cut from (clockwise, y-up).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    #[inline]
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }

    /// Same sign convention as `Loop::signed_area`: positive for clockwise.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        -0.5 * cross(self.a, self.b, self.c)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[inline]
    pub fn reversed(&self) -> Triangle {
        Triangle::new(self.a, self.c, self.b)
    }

    #[inline]
    pub fn centroid(&self) -> Vertex {
        (self.a + self.b + self.c) / 3.0
    }

    pub fn bounding_box(&self) -> BBox {
        BBox::new(self.a, self.a).including(self.b).including(self.c)
    }

    /// Apply `f` to every vertex.
    pub fn map(&self, f: impl Fn(Vertex) -> Vertex) -> Triangle {
        Triangle::new(f(self.a), f(self.b), f(self.c))
    }

    /// Inclusive containment: boundary points count, with `eps` slack measured
    /// as distance outside an edge. Zero-area triangles contain nothing.
    pub fn contains_eps(&self, p: Vertex, eps: f64) -> bool {
        let orient = cross(self.a, self.b, self.c);
        if orient == 0.0 {
            return false;
        }
        let s = orient.signum();
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
            .iter()
            .all(|&(u, v)| {
                let len = (v - u).norm();
                s * cross(u, v, p) >= -eps * len
            })
    }
}

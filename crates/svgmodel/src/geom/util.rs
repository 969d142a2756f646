use super::types::Vertex;

/// z-component of `(b - a) × (c - a)`; positive for a left (counter-clockwise) turn.
#[inline]
pub fn cross(a: Vertex, b: Vertex, c: Vertex) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Shoelace sum with the loop convention: positive for clockwise winding (y-up).
///
/// The vertex list wraps implicitly; the first vertex must not be repeated.
pub fn signed_area_cw(verts: &[Vertex]) -> f64 {
    let n = verts.len();
    let mut accum = 0.0;
    for i in 0..n {
        let p = verts[i];
        let q = verts[(i + 1) % n];
        accum += q.x * p.y - p.x * q.y;
    }
    accum / 2.0
}

/// Drop consecutive duplicates and a closing vertex equal to the first.
pub fn dedup_ring(verts: &mut Vec<Vertex>) {
    verts.dedup();
    while verts.len() > 1 && verts.first() == verts.last() {
        verts.pop();
    }
}

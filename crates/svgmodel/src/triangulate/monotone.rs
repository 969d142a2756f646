//! Sweep-line decomposition into y-monotone pieces and per-piece triangulation.
//!
//! Input is a counter-clockwise ring (interior on the left) without repeated or
//! collinear vertices. Vertices are processed top to bottom; "above" means larger
//! y, and on equal y smaller x. Output triangles are counter-clockwise.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::error::{GeomError, Result};
use crate::geom::{cross, Vertex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VertexKind {
    Start,
    Split,
    End,
    Merge,
    Regular,
}

/// Sweep order: topmost first, ties by x then by index.
fn sweep_cmp(pts: &[Vertex], i: usize, j: usize) -> Ordering {
    let (p, q) = (pts[i], pts[j]);
    q.y.total_cmp(&p.y)
        .then(p.x.total_cmp(&q.x))
        .then(i.cmp(&j))
}

#[inline]
fn below(pts: &[Vertex], i: usize, j: usize) -> bool {
    sweep_cmp(pts, i, j) == Ordering::Greater
}

fn classify(pts: &[Vertex], i: usize) -> VertexKind {
    let n = pts.len();
    let prev = (i + n - 1) % n;
    let next = (i + 1) % n;
    let convex = cross(pts[prev], pts[i], pts[next]) > 0.0;
    match (below(pts, prev, i), below(pts, next, i)) {
        (true, true) if convex => VertexKind::Start,
        (true, true) => VertexKind::Split,
        (false, false) if convex => VertexKind::End,
        (false, false) => VertexKind::Merge,
        _ => VertexKind::Regular,
    }
}

/// Sweep status: edges `(i, i+1)` with the interior to their right, plus helpers.
struct Status<'a> {
    pts: &'a [Vertex],
    edges: Vec<(usize, usize)>,
}

impl<'a> Status<'a> {
    fn insert(&mut self, edge: usize, helper: usize) {
        self.edges.push((edge, helper));
    }

    fn remove(&mut self, edge: usize) -> Result<usize> {
        let at = self
            .edges
            .iter()
            .position(|&(e, _)| e == edge)
            .ok_or_else(|| lost_edge(edge))?;
        Ok(self.edges.remove(at).1)
    }

    fn helper(&self, edge: usize) -> Result<usize> {
        self.edges
            .iter()
            .find(|&&(e, _)| e == edge)
            .map(|&(_, h)| h)
            .ok_or_else(|| lost_edge(edge))
    }

    fn set_helper(&mut self, edge: usize, helper: usize) {
        if let Some(slot) = self.edges.iter_mut().find(|(e, _)| *e == edge) {
            slot.1 = helper;
        }
    }

    fn x_at(&self, edge: usize, y: f64) -> f64 {
        let n = self.pts.len();
        let (a, b) = (self.pts[edge], self.pts[(edge + 1) % n]);
        if a.y == b.y {
            return a.x.min(b.x);
        }
        a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y)
    }

    /// Status edge directly left of vertex `v`, ignoring edges incident to `v`.
    fn left_of(&self, v: usize) -> Result<usize> {
        let n = self.pts.len();
        let p = self.pts[v];
        let mut best: Option<(usize, f64)> = None;
        for &(e, _) in &self.edges {
            if e == v || (e + 1) % n == v {
                continue;
            }
            let x = self.x_at(e, p.y);
            if x <= p.x && best.map_or(true, |(_, bx)| x > bx) {
                best = Some((e, x));
            }
        }
        best.map(|(e, _)| e).ok_or_else(|| {
            GeomError::untriangulable(format!("no edge left of vertex {v}; ring is not simple"))
        })
    }
}

fn lost_edge(edge: usize) -> GeomError {
    GeomError::untriangulable(format!("sweep lost edge {edge}; ring is not simple"))
}

/// Diagonals splitting a counter-clockwise ring into y-monotone pieces.
pub(crate) fn monotone_diagonals(pts: &[Vertex]) -> Result<Vec<(usize, usize)>> {
    let n = pts.len();
    let kinds: Vec<VertexKind> = (0..n).map(|i| classify(pts, i)).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| sweep_cmp(pts, i, j));

    let mut status = Status {
        pts,
        edges: Vec::new(),
    };
    let mut diagonals = Vec::new();
    let is_merge = |h: usize| kinds[h] == VertexKind::Merge;

    for v in order {
        let prev_edge = (v + n - 1) % n;
        match kinds[v] {
            VertexKind::Start => status.insert(v, v),
            VertexKind::End => {
                let h = status.remove(prev_edge)?;
                if is_merge(h) {
                    diagonals.push((v, h));
                }
            }
            VertexKind::Split => {
                let e = status.left_of(v)?;
                diagonals.push((v, status.helper(e)?));
                status.set_helper(e, v);
                status.insert(v, v);
            }
            VertexKind::Merge => {
                let h = status.remove(prev_edge)?;
                if is_merge(h) {
                    diagonals.push((v, h));
                }
                let e = status.left_of(v)?;
                let h = status.helper(e)?;
                if is_merge(h) {
                    diagonals.push((v, h));
                }
                status.set_helper(e, v);
            }
            VertexKind::Regular => {
                // Interior lies right of v when the ring descends through it.
                if below(pts, (v + 1) % n, v) {
                    let h = status.remove(prev_edge)?;
                    if is_merge(h) {
                        diagonals.push((v, h));
                    }
                    status.insert(v, v);
                } else {
                    let e = status.left_of(v)?;
                    let h = status.helper(e)?;
                    if is_merge(h) {
                        diagonals.push((v, h));
                    }
                    status.set_helper(e, v);
                }
            }
        }
    }

    let mut canon: Vec<(usize, usize)> = diagonals
        .into_iter()
        .filter(|&(a, b)| a != b)
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect();
    let mut seen = BTreeSet::new();
    canon.retain(|d| seen.insert(*d));
    Ok(canon)
}

/// `b` lies strictly inside the interior wedge at `a` (prev `a0`, next `a1`).
fn in_cone(a0: Vertex, a: Vertex, a1: Vertex, b: Vertex) -> bool {
    if cross(a, a1, a0) >= 0.0 {
        cross(a, b, a0) > 0.0 && cross(b, a, a1) > 0.0
    } else {
        !(cross(a, b, a1) >= 0.0 && cross(b, a, a0) >= 0.0)
    }
}

/// Cut the ring along `diagonals`; every piece stays counter-clockwise.
pub(crate) fn split_pieces(pts: &[Vertex], diagonals: &[(usize, usize)]) -> Result<Vec<Vec<usize>>> {
    let mut pieces: Vec<Vec<usize>> = vec![(0..pts.len()).collect()];
    for &(a, b) in diagonals {
        let found = pieces.iter().enumerate().find_map(|(k, piece)| {
            let m = piece.len();
            let pa = piece.iter().position(|&v| v == a)?;
            let pb = piece.iter().position(|&v| v == b)?;
            let gap = pa.abs_diff(pb);
            if gap == 1 || gap == m - 1 {
                return None;
            }
            let a0 = pts[piece[(pa + m - 1) % m]];
            let a1 = pts[piece[(pa + 1) % m]];
            in_cone(a0, pts[a], a1, pts[b]).then_some((k, pa.min(pb), pa.max(pb)))
        });
        let (k, lo, hi) = found.ok_or_else(|| {
            GeomError::untriangulable(format!("diagonal {a}-{b} fits no piece; ring is not simple"))
        })?;
        let piece = pieces.swap_remove(k);
        let first: Vec<usize> = piece[lo..=hi].to_vec();
        let second: Vec<usize> = piece[hi..].iter().chain(&piece[..=lo]).copied().collect();
        pieces.push(first);
        pieces.push(second);
    }
    Ok(pieces)
}

/// Stack-based triangulation of one y-monotone counter-clockwise piece.
pub(crate) fn triangulate_monotone(pts: &[Vertex], piece: &[usize]) -> Vec<[usize; 3]> {
    let m = piece.len();
    let mut out = Vec::with_capacity(m.saturating_sub(2));
    if m < 3 {
        return out;
    }
    if m == 3 {
        out.push([piece[0], piece[1], piece[2]]);
        return out;
    }

    // Walking counter-clockwise from the top vertex descends the left chain.
    let top = (0..m)
        .min_by(|&i, &j| sweep_cmp(pts, piece[i], piece[j]))
        .unwrap_or(0);
    let bottom = (0..m)
        .max_by(|&i, &j| sweep_cmp(pts, piece[i], piece[j]))
        .unwrap_or(0);
    let mut on_left = vec![false; m];
    let mut k = top;
    while k != bottom {
        on_left[k] = true;
        k = (k + 1) % m;
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&i, &j| sweep_cmp(pts, piece[i], piece[j]));

    let emit = |out: &mut Vec<[usize; 3]>, u: usize, v: usize, w: usize| {
        let (pu, pv, pw) = (pts[piece[u]], pts[piece[v]], pts[piece[w]]);
        let c = cross(pu, pv, pw);
        if c > 0.0 {
            out.push([piece[u], piece[v], piece[w]]);
        } else if c < 0.0 {
            out.push([piece[u], piece[w], piece[v]]);
        }
    };

    let mut stack: Vec<usize> = vec![order[0], order[1]];
    for &u in &order[2..m - 1] {
        let top_of_stack = stack[stack.len() - 1];
        if on_left[u] != on_left[top_of_stack] {
            for w in stack.windows(2) {
                emit(&mut out, u, w[0], w[1]);
            }
            stack.clear();
            stack.push(top_of_stack);
            stack.push(u);
        } else {
            let mut last = stack.pop().unwrap_or(top_of_stack);
            while let Some(&prev) = stack.last() {
                let turn = cross(pts[piece[u]], pts[piece[last]], pts[piece[prev]]);
                let inside = if on_left[u] { turn < 0.0 } else { turn > 0.0 };
                if !inside {
                    break;
                }
                emit(&mut out, u, last, prev);
                last = prev;
                stack.pop();
            }
            stack.push(last);
            stack.push(u);
        }
    }
    let u = order[m - 1];
    for w in stack.windows(2) {
        emit(&mut out, u, w[0], w[1]);
    }
    out
}

//! Geometric adjacency: stretch each shape outward per axis and test overlap.

use std::collections::BTreeMap;

use tracing::debug;

use super::{AdjacencyEdge, AdjacencyList};
use crate::error::{GeomError, Result};
use crate::geom::{BBox, Path, Vertex};
use crate::key::ShapeId;

/// Bounding boxes of one shape: as drawn, stretched along x, stretched along y.
#[derive(Clone, Copy, Debug)]
struct Boxes {
    plain: BBox,
    along_x: BBox,
    along_y: BBox,
}

impl Boxes {
    fn union(&self, other: &Boxes) -> Boxes {
        Boxes {
            plain: self.plain.union(&other.plain),
            along_x: self.along_x.union(&other.along_x),
            along_y: self.along_y.union(&other.along_y),
        }
    }
}

/// Move `v` by `d` away from `c` on one axis; points at the centre move forward.
#[inline]
fn push_out(v: f64, c: f64, d: f64) -> f64 {
    if v - c < 0.0 {
        v - d
    } else {
        v + d
    }
}

/// Boxes of `path` with every vertex pushed `d` away from the centroid.
///
/// The centroid lies inside the bounding box, so for shapes with area the
/// stretched boxes are the plain box grown by `d` along one axis.
fn stretched_boxes(path: &Path, d: f64) -> Result<Boxes> {
    let plain = path.bounding_box()?;
    let c = path.centroid()?;
    let xs: Vec<Vertex> = path
        .vertices()
        .map(|v| Vertex::new(push_out(v.x, c.x, d), v.y))
        .collect();
    let ys: Vec<Vertex> = path
        .vertices()
        .map(|v| Vertex::new(v.x, push_out(v.y, c.y, d)))
        .collect();
    match (BBox::from_points(&xs), BBox::from_points(&ys)) {
        (Some(along_x), Some(along_y)) => Ok(Boxes {
            plain,
            along_x,
            along_y,
        }),
        _ => Err(GeomError::empty("stretch of a path with no vertices")),
    }
}

/// `o` is hit by the stretched boxes of another shape.
fn overlaps(o: &BBox, s: &Boxes) -> bool {
    let (sx, sy) = (&s.along_x, &s.along_y);
    let hit_x = ((o.min.x < sx.max.x && sx.max.x <= o.max.x)
        || (o.min.x < sx.min.x && sx.min.x <= o.max.x))
        && o.min.y < sx.max.y
        && o.max.y > sx.min.y;
    let hit_y = ((o.min.y < sy.max.y && sy.max.y <= o.max.y)
        || (o.min.y < sy.min.y && sy.min.y <= o.max.y))
        && o.min.x < sy.max.x
        && o.max.x > sy.min.x;
    hit_x || hit_y
}

/// Collect per-shape boxes; repeated ids are merged by box union.
fn collect_boxes<'a, I>(shapes: I, extend: f64) -> Result<BTreeMap<ShapeId, Boxes>>
where
    I: IntoIterator<Item = (&'a ShapeId, &'a Path)>,
{
    let mut out: BTreeMap<ShapeId, Boxes> = BTreeMap::new();
    for (position, (id, path)) in shapes.into_iter().enumerate() {
        id.single()?;
        if path.is_empty() {
            continue;
        }
        let b = stretched_boxes(path, extend).map_err(|source| GeomError::Element {
            position,
            id: id.to_string(),
            source: Box::new(source),
        })?;
        out.entry(id.clone())
            .and_modify(|acc| *acc = acc.union(&b))
            .or_insert(b);
    }
    Ok(out)
}

/// Adjacent shape pairs under the stretch heuristic.
///
/// Each shape is stretched by `extend` along x, and separately along y; a
/// shape whose plain box is hit by either stretched box is a neighbour.
/// Empty paths are skipped and repeated ids merge by box union.
pub fn extract_adjacent_shapes<'a, I>(shapes: I, extend: f64) -> Result<AdjacencyList>
where
    I: IntoIterator<Item = (&'a ShapeId, &'a Path)>,
{
    if !(extend.is_finite() && extend >= 0.0) {
        return Err(GeomError::invalid(format!(
            "stretch distance must be finite and >= 0, got {extend}"
        )));
    }
    let boxes = collect_boxes(shapes, extend)?;
    let mut edges = Vec::new();
    for (s_id, s) in &boxes {
        for (o_id, o) in &boxes {
            if s_id != o_id && overlaps(&o.plain, s) {
                edges.extend(AdjacencyEdge::new(s_id.clone(), o_id.clone()));
            }
        }
    }
    let list = AdjacencyList::from_edges(edges);
    debug!(shapes = boxes.len(), edges = list.len(), extend, "stretch adjacency");
    Ok(list)
}

/// Bounding-box centre of every non-empty shape. Composite ids are rejected.
pub fn shape_centers<'a, I>(shapes: I) -> Result<BTreeMap<ShapeId, Vertex>>
where
    I: IntoIterator<Item = (&'a ShapeId, &'a Path)>,
{
    let mut bounds: BTreeMap<ShapeId, BBox> = BTreeMap::new();
    for (id, path) in shapes {
        id.single()?;
        if path.is_empty() {
            continue;
        }
        let b = path.bounding_box()?;
        bounds
            .entry(id.clone())
            .and_modify(|acc| *acc = acc.union(&b))
            .or_insert(b);
    }
    Ok(bounds.into_iter().map(|(id, b)| (id, b.center())).collect())
}

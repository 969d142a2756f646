//! Bounding-volume hierarchy over triangles, answering "whose triangle holds p".

use crate::geom::{BBox, GeomCfg, Triangle, Vertex};
use crate::key::ShapeId;

const LEAF_SIZE: usize = 4;

#[derive(Debug)]
enum Node {
    Leaf {
        bounds: BBox,
        handles: Vec<usize>,
    },
    Internal {
        bounds: BBox,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn bounds(&self) -> &BBox {
        match self {
            Node::Leaf { bounds, .. } | Node::Internal { bounds, .. } => bounds,
        }
    }
}

/// Immutable point-location index. Handles are insertion positions; among
/// several triangles containing a point the lowest handle wins, so queries on
/// shared edges and vertices have one stable answer.
#[derive(Debug)]
pub struct TriangleIndex {
    triangles: Vec<Triangle>,
    owners: Vec<ShapeId>,
    root: Option<Node>,
    eps: f64,
}

impl TriangleIndex {
    /// Build from `(triangle, owner)` pairs in handle order.
    pub fn build<I>(items: I, cfg: &GeomCfg) -> Self
    where
        I: IntoIterator<Item = (Triangle, ShapeId)>,
    {
        let (triangles, owners): (Vec<Triangle>, Vec<ShapeId>) = items.into_iter().unzip();
        let boxes: Vec<BBox> = triangles.iter().map(Triangle::bounding_box).collect();
        let root = if triangles.is_empty() {
            None
        } else {
            Some(build_node(&boxes, (0..triangles.len()).collect()))
        };
        Self {
            triangles,
            owners,
            root,
            eps: cfg.eps_contains,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn get(&self, handle: usize) -> Option<(&Triangle, &ShapeId)> {
        Some((self.triangles.get(handle)?, self.owners.get(handle)?))
    }

    /// Owner of the lowest-handle triangle containing `p`.
    pub fn find(&self, p: Vertex) -> Option<&ShapeId> {
        let handle = self.hits(p).into_iter().min()?;
        self.owners.get(handle)
    }

    /// Every distinct owner with a triangle containing `p`, in handle order.
    pub fn find_all(&self, p: Vertex) -> Vec<&ShapeId> {
        let mut hits = self.hits(p);
        hits.sort_unstable();
        let mut out: Vec<&ShapeId> = Vec::new();
        for h in hits {
            let owner = &self.owners[h];
            if !out.contains(&owner) {
                out.push(owner);
            }
        }
        out
    }

    fn hits(&self, p: Vertex) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            self.collect(root, p, &mut out);
        }
        out
    }

    fn collect(&self, node: &Node, p: Vertex, out: &mut Vec<usize>) {
        if !node.bounds().contains_eps(p, self.eps) {
            return;
        }
        match node {
            Node::Leaf { handles, .. } => out.extend(
                handles
                    .iter()
                    .copied()
                    .filter(|&h| self.triangles[h].contains_eps(p, self.eps)),
            ),
            Node::Internal { left, right, .. } => {
                self.collect(left, p, out);
                self.collect(right, p, out);
            }
        }
    }
}

/// Median split on the longest axis of the node bounds, by box centre.
fn build_node(boxes: &[BBox], mut handles: Vec<usize>) -> Node {
    let bounds = handles[1..]
        .iter()
        .fold(boxes[handles[0]], |acc, &h| acc.union(&boxes[h]));
    if handles.len() <= LEAF_SIZE {
        return Node::Leaf { bounds, handles };
    }
    let axis = if bounds.width() >= bounds.height() { 0 } else { 1 };
    handles.sort_by(|&a, &b| {
        let (ca, cb) = (boxes[a].center()[axis], boxes[b].center()[axis]);
        ca.total_cmp(&cb).then(a.cmp(&b))
    });
    let right = handles.split_off(handles.len() / 2);
    Node::Internal {
        bounds,
        left: Box::new(build_node(boxes, handles)),
        right: Box::new(build_node(boxes, right)),
    }
}

//! Shapes fitted into a canvas, with point lookup in canvas coordinates.

use std::collections::BTreeMap;

use tracing::debug;

use super::bvh::TriangleIndex;
use super::fit::{CanvasSize, FitTransform};
use crate::error::{GeomError, Result};
use crate::geom::{BBox, GeomCfg, Path, Vertex};
use crate::key::ShapeId;
use crate::triangulate::{tessellate_path, TaggedTriangle};

/// Shapes tessellated once in source space and indexed in canvas space.
///
/// `reset_shape` re-fits to a new canvas by transforming the stored source
/// triangles; paths are never re-tessellated.
#[derive(Debug)]
pub struct ShapesCanvas {
    cfg: GeomCfg,
    source_bbox: Option<BBox>,
    source_bounds: BTreeMap<ShapeId, BBox>,
    source_triangles: Vec<TaggedTriangle>,
    canvas: CanvasSize,
    padding: f64,
    transform: FitTransform,
    canvas_bounds: BTreeMap<ShapeId, BBox>,
    index: TriangleIndex,
}

impl ShapesCanvas {
    /// Fit `shapes` into `canvas` (default: the source extent) with `padding`.
    pub fn new<I>(shapes: I, canvas: Option<CanvasSize>, padding: f64) -> Result<Self>
    where
        I: IntoIterator<Item = (ShapeId, Path)>,
    {
        Self::with_cfg(shapes, canvas, padding, GeomCfg::default())
    }

    /// Borrowing variant of [`ShapesCanvas::new`], e.g. over a loaded document.
    pub fn from_paths<'a, I>(shapes: I, canvas: Option<CanvasSize>, padding: f64) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a ShapeId, &'a Path)>,
    {
        Self::new(
            shapes.into_iter().map(|(id, p)| (id.clone(), p.clone())),
            canvas,
            padding,
        )
    }

    pub fn with_cfg<I>(
        shapes: I,
        canvas: Option<CanvasSize>,
        padding: f64,
        cfg: GeomCfg,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (ShapeId, Path)>,
    {
        let mut source_bounds: BTreeMap<ShapeId, BBox> = BTreeMap::new();
        let mut source_triangles = Vec::new();
        for (position, (id, path)) in shapes.into_iter().enumerate() {
            let wrap = |source: GeomError| GeomError::Element {
                position,
                id: id.to_string(),
                source: Box::new(source),
            };
            if path.is_empty() {
                continue;
            }
            let bb = path.bounding_box().map_err(wrap)?;
            source_bounds
                .entry(id.clone())
                .and_modify(|b| *b = b.union(&bb))
                .or_insert(bb);
            source_triangles.extend(tessellate_path(&id, &path, &cfg).map_err(wrap)?);
        }
        let source_bbox = source_bounds.values().copied().reduce(|a, b| a.union(&b));

        let mut out = Self {
            cfg,
            source_bbox,
            source_bounds,
            source_triangles,
            canvas: CanvasSize::new(0.0, 0.0),
            padding,
            transform: FitTransform::identity(),
            canvas_bounds: BTreeMap::new(),
            index: TriangleIndex::build(std::iter::empty(), &cfg),
        };
        out.reset_shape(canvas, padding)?;
        Ok(out)
    }

    /// Re-fit to a new canvas and padding; rebuilds canvas-space data only.
    pub fn reset_shape(&mut self, canvas: Option<CanvasSize>, padding: f64) -> Result<()> {
        if !(0.0..0.5).contains(&padding) {
            return Err(GeomError::invalid(format!(
                "padding must lie in [0, 0.5), got {padding}"
            )));
        }
        let Some(source) = self.source_bbox else {
            debug!("canvas has no shapes; using identity transform");
            self.canvas = canvas.unwrap_or(CanvasSize::new(0.0, 0.0));
            self.padding = padding;
            return Ok(());
        };
        let canvas = canvas.unwrap_or_else(|| CanvasSize::of(&source));
        let transform = FitTransform::fit(source, canvas, padding)?;

        let canvas_triangles = self.source_triangles.iter().map(|t| {
            (
                t.triangle.map(|v| transform.apply(v)),
                t.shape.clone(),
            )
        });
        self.index = TriangleIndex::build(canvas_triangles, &self.cfg);
        self.canvas_bounds = self
            .source_bounds
            .iter()
            .map(|(id, b)| (id.clone(), transform.apply_bbox(b)))
            .collect();
        self.transform = transform;
        self.canvas = canvas;
        self.padding = padding;
        debug!(
            shapes = self.source_bounds.len(),
            triangles = self.index.len(),
            scale = transform.scale,
            "canvas fitted"
        );
        Ok(())
    }

    /// Shape under canvas point `(x, y)`; `None` over empty space.
    pub fn find_shape(&self, x: f64, y: f64) -> Option<&ShapeId> {
        self.index.find(Vertex::new(x, y))
    }

    #[inline]
    pub fn transform(&self) -> &FitTransform {
        &self.transform
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Triangles in source coordinates, in index handle order.
    pub fn source_triangles(&self) -> &[TaggedTriangle] {
        &self.source_triangles
    }

    pub fn index(&self) -> &TriangleIndex {
        &self.index
    }

    /// Bounding box of each shape in canvas coordinates.
    pub fn canvas_bounds(&self) -> &BTreeMap<ShapeId, BBox> {
        &self.canvas_bounds
    }

    pub fn shape_ids(&self) -> impl Iterator<Item = &ShapeId> + '_ {
        self.source_bounds.keys()
    }

    #[inline]
    pub fn to_canvas(&self, p: Vertex) -> Vertex {
        self.transform.apply(p)
    }

    #[inline]
    pub fn to_source(&self, p: Vertex) -> Vertex {
        self.transform.invert(p)
    }
}

//! Document loading: element stream in, recentred shape collection out.
//!
//! Purpose
//! - Consume the flat `ShapeElement` stream an external XML reader produces,
//!   build one `Path` per shape id, and recentre the collection once.
//!
//! Error policy
//! - With an error callback a failing element is reported and skipped.
//! - Without one, the first failure aborts the load as `GeomError::Element`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GeomError, Result};
use crate::geom::{BBox, Path, Rgb, Vertex, DEFAULT_DENSITY};
use crate::key::{IdAllocator, ShapeId};
use crate::path_data::{loop_from_points, parse_path, TraceCfg};

/// Shape id whose bounding box, when present, defines the document origin.
pub const BOUNDARY_ID: &str = "boundary";

/// Geometry attribute flavour of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// `d` path data.
    Path,
    /// `points` list.
    Polygon,
}

/// One drawable element as handed over by the reader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub id: Option<ShapeId>,
    pub kind: ElementKind,
    pub geometry: String,
    pub style: Option<String>,
}

impl ShapeElement {
    pub fn path(id: Option<ShapeId>, d: impl Into<String>) -> Self {
        Self {
            id,
            kind: ElementKind::Path,
            geometry: d.into(),
            style: None,
        }
    }

    pub fn polygon(id: Option<ShapeId>, points: impl Into<String>) -> Self {
        Self {
            id,
            kind: ElementKind::Polygon,
            geometry: points.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Loader settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadCfg {
    pub trace: TraceCfg,
    /// Density given to every loaded path.
    pub density: f64,
    /// Offset the collection so its reference box is centred on the origin.
    pub recenter: bool,
}

impl Default for LoadCfg {
    fn default() -> Self {
        Self {
            trace: TraceCfg::default(),
            density: DEFAULT_DENSITY,
            recenter: true,
        }
    }
}

/// A skipped element, as reported to the error callback.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadFailure {
    pub position: usize,
    pub id: ShapeId,
    pub error: GeomError,
}

impl LoadFailure {
    fn into_error(self) -> GeomError {
        GeomError::Element {
            position: self.position,
            id: self.id.to_string(),
            source: Box::new(self.error),
        }
    }
}

/// Loaded shapes keyed by id, in id order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ShapeDocument {
    shapes: BTreeMap<ShapeId, Path>,
    shift: Vertex,
}

impl ShapeDocument {
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Path> {
        self.shapes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &Path)> + '_ {
        self.shapes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ShapeId> + '_ {
        self.shapes.keys()
    }

    /// Translation applied at load time (zero when recentring was off).
    #[inline]
    pub fn shift(&self) -> Vertex {
        self.shift
    }

    /// Box around every shape; `EmptyGeometry` for an empty document.
    pub fn bounding_box(&self) -> Result<BBox> {
        union_box(&self.shapes)?.ok_or_else(|| GeomError::empty("bounding box of an empty document"))
    }

    pub fn into_shapes(self) -> BTreeMap<ShapeId, Path> {
        self.shapes
    }
}

impl<'a> IntoIterator for &'a ShapeDocument {
    type Item = (&'a ShapeId, &'a Path);
    type IntoIter = std::collections::btree_map::Iter<'a, ShapeId, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

fn union_box(shapes: &BTreeMap<ShapeId, Path>) -> Result<Option<BBox>> {
    let mut acc: Option<BBox> = None;
    for p in shapes.values() {
        let b = p.bounding_box()?;
        acc = Some(acc.map_or(b, |a| a.union(&b)));
    }
    Ok(acc)
}

/// Colour of the last `fill:` declaration in an inline style.
///
/// `none` and missing declarations give `None`; so does an unparsable value,
/// which is logged.
pub fn parse_fill(style: &str) -> Option<Rgb> {
    let value = style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(key, _)| key.trim() == "fill")
        .map(|(_, value)| value.trim())
        .last()?;
    if value.eq_ignore_ascii_case("none") {
        return None;
    }
    let rgb = Rgb::parse_hex(value);
    if rgb.is_none() {
        warn!(fill = value, "ignoring unparsable fill colour");
    }
    rgb
}

fn build_path(el: &ShapeElement, cfg: &LoadCfg) -> Result<Path> {
    let loops = match el.kind {
        ElementKind::Path => parse_path(&el.geometry, &cfg.trace)?,
        ElementKind::Polygon => vec![loop_from_points(&el.geometry)?],
    };
    let fill = el.style.as_deref().and_then(parse_fill);
    Path::new(loops).with_fill(fill).with_density(cfg.density)
}

/// Load an element stream into a [`ShapeDocument`].
///
/// Unlabelled elements draw ids from `ids`. Elements sharing an id are merged
/// into one path (first element's fill wins). Elements that yield no loops are
/// skipped. With `cfg.recenter` every path is offset by minus the centre of
/// the `boundary` shape's box, or of the whole collection's box.
pub fn load_document<I>(
    elements: I,
    cfg: &LoadCfg,
    ids: &mut IdAllocator,
    mut on_error: Option<&mut dyn FnMut(&LoadFailure)>,
) -> Result<ShapeDocument>
where
    I: IntoIterator<Item = ShapeElement>,
{
    if !(cfg.density.is_finite() && cfg.density > 0.0) {
        return Err(GeomError::invalid(format!(
            "density must be finite and > 0, got {}",
            cfg.density
        )));
    }
    let mut shapes: BTreeMap<ShapeId, Path> = BTreeMap::new();
    let mut skipped = 0usize;
    for (position, el) in elements.into_iter().enumerate() {
        let id = el.id.clone().unwrap_or_else(|| ids.allocate());
        let path = match build_path(&el, cfg) {
            Ok(p) => p,
            Err(error) => {
                let failure = LoadFailure {
                    position,
                    id,
                    error,
                };
                match on_error.as_deref_mut() {
                    Some(cb) => {
                        warn!(position, id = %failure.id, error = %failure.error, "skipping element");
                        cb(&failure);
                        skipped += 1;
                        continue;
                    }
                    None => return Err(failure.into_error()),
                }
            }
        };
        if path.is_empty() {
            debug!(position, id = %id, "element has no loops");
            continue;
        }
        match shapes.get_mut(&id) {
            Some(existing) => existing.append(path),
            None => {
                shapes.insert(id, path);
            }
        }
    }

    let mut shift = Vertex::zeros();
    if cfg.recenter {
        let reference = match shapes.get(&ShapeId::name(BOUNDARY_ID)) {
            Some(b) => Some(b.bounding_box()?),
            None => union_box(&shapes)?,
        };
        if let Some(bb) = reference {
            shift = -bb.center();
            for p in shapes.values_mut() {
                p.offset(shift.x, shift.y);
            }
        }
    }
    debug!(
        shapes = shapes.len(),
        skipped,
        dx = shift.x,
        dy = shift.y,
        "document loaded"
    );
    Ok(ShapeDocument { shapes, shift })
}

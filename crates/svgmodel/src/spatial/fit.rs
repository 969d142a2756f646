//! Aspect-preserving fit of a source bounding box into a canvas.

use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};
use crate::geom::{BBox, Vertex};

/// Target canvas extent; the canvas spans `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent of a bounding box.
    pub fn of(b: &BBox) -> Self {
        Self::new(b.width(), b.height())
    }
}

/// Uniform scale followed by a translation: `canvas = source * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    pub scale: f64,
    pub offset: Vertex,
}

impl FitTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Vertex::zeros(),
        }
    }

    /// Scale `source` to fill `canvas` minus a `padding` fraction on each side,
    /// keeping the aspect ratio, and centre it.
    ///
    /// - `scale = min(w_c / w_s, h_c / h_s) × (1 − 2·padding)`; an axis with zero
    ///   source extent is left out of the minimum.
    /// - The unused margin on the non-binding axis is split evenly.
    pub fn fit(source: BBox, canvas: CanvasSize, padding: f64) -> Result<Self> {
        if !(0.0..0.5).contains(&padding) {
            return Err(GeomError::invalid(format!(
                "padding must lie in [0, 0.5), got {padding}"
            )));
        }
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(canvas.width) && valid(canvas.height)) {
            return Err(GeomError::invalid(format!(
                "canvas must have positive finite extent, got {} x {}",
                canvas.width, canvas.height
            )));
        }
        let (ws, hs) = (source.width(), source.height());
        let ratio = match (ws > 0.0, hs > 0.0) {
            (true, true) => (canvas.width / ws).min(canvas.height / hs),
            (true, false) => canvas.width / ws,
            (false, true) => canvas.height / hs,
            (false, false) => {
                return Err(GeomError::empty("cannot fit a source box with zero extent"))
            }
        };
        let scale = ratio * (1.0 - 2.0 * padding);
        let margin = Vertex::new(canvas.width - ws * scale, canvas.height - hs * scale) * 0.5;
        Ok(Self {
            scale,
            offset: margin - source.min * scale,
        })
    }

    #[inline]
    pub fn apply(&self, p: Vertex) -> Vertex {
        p * self.scale + self.offset
    }

    #[inline]
    pub fn invert(&self, p: Vertex) -> Vertex {
        (p - self.offset) / self.scale
    }

    /// Image of a bounding box (exact, since the scale is positive).
    pub fn apply_bbox(&self, b: &BBox) -> BBox {
        BBox::new(self.apply(b.min), self.apply(b.max))
    }
}

//! Basic 2D types and tolerances.
//!
//! - `Vertex`: a point in the drawing plane (y-up convention for winding).
//! - `BBox`: axis-aligned bounding box with min/max corners.
//! - `GeomCfg`: centralizes epsilons for area, collinearity and containment.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A polygon vertex.
pub type Vertex = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Relative area below which a polygon counts as degenerate
    /// (scaled by the squared bounding-box diagonal).
    pub eps_area: f64,
    /// Relative cross-product threshold for dropping collinear vertices.
    pub eps_collinear: f64,
    /// Absolute slack for point-in-triangle tests.
    pub eps_contains: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_area: 1e-12,
            eps_collinear: 1e-12,
            eps_contains: 1e-9,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Vertex,
    pub max: Vertex,
}

impl BBox {
    #[inline]
    pub fn new(min: Vertex, max: Vertex) -> Self {
        Self { min, max }
    }

    /// Min/max reduction over points; `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let mut it = points.into_iter();
        let first = *it.next()?;
        Some(it.fold(Self::new(first, first), |b, p| b.including(*p)))
    }

    /// Grow to include `p`.
    #[inline]
    pub fn including(self, p: Vertex) -> Self {
        Self {
            min: Vertex::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Vertex::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    #[inline]
    pub fn union(&self, other: &BBox) -> BBox {
        self.including(other.min).including(other.max)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vertex {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains_eps(&self, p: Vertex, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }
}

/// Fill colour of a shape as an 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize, w: usize| u8::from_str_radix(&hex[i..i + w], 16).ok();
        match hex.len() {
            6 => Some(Rgb {
                r: channel(0, 2)?,
                g: channel(2, 2)?,
                b: channel(4, 2)?,
            }),
            3 => {
                let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
                Some(Rgb {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => None,
        }
    }
}

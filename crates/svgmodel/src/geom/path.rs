//! Loops grouped under one shape id.

use serde::Serialize;

use super::ring::Loop;
use super::types::{BBox, Rgb, Vertex};
use crate::error::{GeomError, Result};

/// Default uniform density used for mass and moment.
pub const DEFAULT_DENSITY: f64 = 1.0;

/// One or more loops (islands or holes) belonging to a single shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path {
    loops: Vec<Loop>,
    fill: Option<Rgb>,
    density: f64,
}

impl Path {
    pub fn new(loops: Vec<Loop>) -> Self {
        Self {
            loops,
            fill: None,
            density: DEFAULT_DENSITY,
        }
    }

    pub fn with_fill(mut self, fill: Option<Rgb>) -> Self {
        self.fill = fill;
        self
    }

    /// Replace the density. Non-finite or non-positive values are rejected.
    pub fn with_density(mut self, density: f64) -> Result<Self> {
        if !(density.is_finite() && density > 0.0) {
            return Err(GeomError::invalid(format!(
                "density must be finite and > 0, got {density}"
            )));
        }
        self.density = density;
        Ok(self)
    }

    #[inline]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    #[inline]
    pub fn fill(&self) -> Option<Rgb> {
        self.fill
    }

    #[inline]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.loops.iter().flat_map(|l| l.vertices().iter())
    }

    pub fn area(&self) -> f64 {
        self.loops.iter().map(Loop::area).sum()
    }

    pub fn mass(&self) -> f64 {
        self.area() * self.density
    }

    /// Mass-weighted average of loop centroids; zero-area loops carry no weight.
    pub fn centroid(&self) -> Result<Vertex> {
        let mut weighted = Vertex::zeros();
        let mut total = 0.0;
        for l in &self.loops {
            let m = l.mass(self.density);
            if m == 0.0 {
                continue;
            }
            weighted += l.centroid()? * m;
            total += m;
        }
        if total == 0.0 {
            return Err(GeomError::empty("centroid of a path with no area"));
        }
        Ok(weighted / total)
    }

    /// Sum of loop moments about the origin.
    pub fn moment(&self) -> Result<f64> {
        if self.loops.is_empty() {
            return Err(GeomError::empty("moment of a path with no loops"));
        }
        self.loops.iter().map(|l| l.moment(self.density)).sum()
    }

    pub fn bounding_box(&self) -> Result<BBox> {
        BBox::from_points(self.vertices())
            .ok_or_else(|| GeomError::empty("bounding box of a path with no loops"))
    }

    /// Centre of the bounding box.
    pub fn center(&self) -> Result<Vertex> {
        Ok(self.bounding_box()?.center())
    }

    /// Move the loops of `other` into this path; fill and density stay ours.
    pub(crate) fn append(&mut self, other: Path) {
        self.loops.extend(other.loops);
    }

    pub fn offset(&mut self, dx: f64, dy: f64) {
        for l in &mut self.loops {
            l.offset(dx, dy);
        }
    }
}

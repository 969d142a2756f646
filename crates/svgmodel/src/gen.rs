//! Random simple polygons and shape grids (radial jitter + replay tokens).
//!
//! Purpose
//! - Feed property tests and benchmarks with reproducible, non-convex but
//!   simple polygons, plus regular grids of rectangular shapes for the
//!   spatial and adjacency layers.
//!
//! Model
//! - Star polygons: `n` angles equally spaced on [0, 2π) with bounded angular
//!   jitter (kept below half the spacing, so angles stay strictly increasing)
//!   and independent radii. Every vertex is visible from the centre, hence the
//!   ring is simple.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::geom::{Loop, Path, Vertex};
use crate::key::{IdAllocator, ShapeId};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Star-polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.45].
    pub angle_jitter_frac: f64,
    /// Smallest radius as a fraction of `base_radius`. Clamped to [0.01, 1].
    pub radius_min_frac: f64,
    pub base_radius: f64,
    pub center: Vertex,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(16),
            angle_jitter_frac: 0.3,
            radius_min_frac: 0.3,
            base_radius: 1.0,
            center: Vertex::zeros(),
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Vertices of a random star polygon, counter-clockwise.
pub fn star_points(cfg: StarCfg, tok: ReplayToken) -> Vec<Vertex> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.45);
    let rmin = cfg.radius_min_frac.clamp(0.01, 1.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    (0..n)
        .map(|k| {
            let th = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = r0 * (rmin + (1.0 - rmin) * rng.gen::<f64>());
            cfg.center + Vertex::new(th.cos(), th.sin()) * r
        })
        .collect()
}

/// Random star polygon as a normalized loop.
pub fn draw_star(cfg: StarCfg, tok: ReplayToken) -> Result<Loop> {
    Loop::new(star_points(cfg, tok))
}

/// `rows × cols` axis-aligned `cell × cell` squares separated by `gap`,
/// ids allocated row by row from `ids`.
pub fn grid_shapes(
    rows: usize,
    cols: usize,
    cell: f64,
    gap: f64,
    ids: &mut IdAllocator,
) -> Result<Vec<(ShapeId, Path)>> {
    let pitch = cell + gap;
    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let (x0, y0) = (c as f64 * pitch, r as f64 * pitch);
            let ring = Loop::new(vec![
                Vertex::new(x0, y0),
                Vertex::new(x0 + cell, y0),
                Vertex::new(x0 + cell, y0 + cell),
                Vertex::new(x0, y0 + cell),
            ])?;
            out.push((ids.allocate(), Path::new(vec![ring])));
        }
    }
    Ok(out)
}

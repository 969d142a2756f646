//! Loop builder: folds a command stream into closed loops.
//!
//! States
//! - `Idle`: no open loop; remembers the current point once something was closed.
//! - `Building`: collecting vertices of an open loop.
//!
//! Unclosed loops are closed implicitly when a new `Move` arrives or the data
//! ends, provided they have 3 or more vertices. Shorter open loops are dropped
//! at a `Move` (logged) and rejected at the end of data. `TraceCfg::require_close`
//! turns every unclosed loop into an error.

use tracing::{debug, warn};

use super::lexer::{parse_path_data, parse_points, PathCommand};
use crate::error::{GeomError, Result};
use crate::geom::util::dedup_ring;
use crate::geom::{Loop, Vertex};

/// Loop-building policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceCfg {
    /// Reject loops that are never closed with `Z` instead of closing them.
    pub require_close: bool,
}

#[derive(Debug)]
enum State {
    Idle { current: Option<Vertex> },
    Building(Vec<Vertex>),
}

/// Incremental command consumer. Feed commands with [`LoopBuilder::push`] and
/// collect loops with [`LoopBuilder::finish`].
#[derive(Debug)]
pub struct LoopBuilder {
    cfg: TraceCfg,
    state: State,
    loops: Vec<Loop>,
    index: usize,
}

impl LoopBuilder {
    pub fn new(cfg: TraceCfg) -> Self {
        Self {
            cfg,
            state: State::Idle { current: None },
            loops: Vec::new(),
            index: 0,
        }
    }

    /// Loops closed so far.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn push(&mut self, cmd: PathCommand) -> Result<()> {
        let index = self.index;
        self.index += 1;
        match cmd {
            PathCommand::Move { x, y } => {
                if let State::Building(verts) = std::mem::replace(
                    &mut self.state,
                    State::Idle { current: None },
                ) {
                    self.abandon_or_close(verts)?;
                }
                self.state = State::Building(vec![Vertex::new(x, y)]);
            }
            PathCommand::Close => match std::mem::replace(
                &mut self.state,
                State::Idle { current: None },
            ) {
                State::Building(verts) => {
                    let first = verts[0];
                    self.close(verts)?;
                    self.state = State::Idle {
                        current: Some(first),
                    };
                }
                idle @ State::Idle { .. } => {
                    debug!(index, "close with no open loop ignored");
                    self.state = idle;
                }
            },
            PathCommand::Line { x, y } => self.draw_to(index, |_| Vertex::new(x, y))?,
            PathCommand::Horizontal { value, relative } => self.draw_to(index, |last| {
                let x = if relative { last.x + value } else { value };
                Vertex::new(x, last.y)
            })?,
            PathCommand::Vertical { value, relative } => self.draw_to(index, |last| {
                let y = if relative { last.y + value } else { value };
                Vertex::new(last.x, y)
            })?,
        }
        Ok(())
    }

    /// Close any open loop under the configured policy and return all loops.
    pub fn finish(mut self) -> Result<Vec<Loop>> {
        if let State::Building(mut verts) =
            std::mem::replace(&mut self.state, State::Idle { current: None })
        {
            dedup_ring(&mut verts);
            if self.cfg.require_close {
                return Err(GeomError::UnclosedLoop {
                    vertices: verts.len(),
                });
            }
            if verts.len() < 3 {
                return Err(GeomError::DegenerateLoop {
                    vertices: verts.len(),
                });
            }
            debug!(vertices = verts.len(), "closing loop implicitly at end of data");
            self.loops.push(Loop::new(verts)?);
        }
        Ok(self.loops)
    }

    /// Append the vertex `next(last)`; after a close, a new loop opens at the current point.
    fn draw_to(&mut self, index: usize, next: impl FnOnce(Vertex) -> Vertex) -> Result<()> {
        let last = match &self.state {
            State::Building(verts) => verts[verts.len() - 1],
            State::Idle { current: Some(p) } => *p,
            State::Idle { current: None } => {
                return Err(GeomError::CommandOrder {
                    index,
                    message: "drawing command before any move".into(),
                })
            }
        };
        let v = next(last);
        match &mut self.state {
            State::Building(verts) => verts.push(v),
            State::Idle { .. } => self.state = State::Building(vec![last, v]),
        }
        Ok(())
    }

    fn close(&mut self, mut verts: Vec<Vertex>) -> Result<()> {
        dedup_ring(&mut verts);
        if verts.len() < 3 {
            return Err(GeomError::DegenerateLoop {
                vertices: verts.len(),
            });
        }
        self.loops.push(Loop::new(verts)?);
        Ok(())
    }

    fn abandon_or_close(&mut self, mut verts: Vec<Vertex>) -> Result<()> {
        dedup_ring(&mut verts);
        if self.cfg.require_close {
            return Err(GeomError::UnclosedLoop {
                vertices: verts.len(),
            });
        }
        if verts.len() < 3 {
            warn!(vertices = verts.len(), "discarding unclosed loop before move");
            return Ok(());
        }
        debug!(vertices = verts.len(), "closing loop implicitly before move");
        self.loops.push(Loop::new(verts)?);
        Ok(())
    }
}

/// Run a command sequence through a fresh [`LoopBuilder`].
pub fn trace_loops<I>(commands: I, cfg: &TraceCfg) -> Result<Vec<Loop>>
where
    I: IntoIterator<Item = PathCommand>,
{
    let mut builder = LoopBuilder::new(*cfg);
    for cmd in commands {
        builder.push(cmd)?;
    }
    builder.finish()
}

/// Parse path data straight into loops.
pub fn parse_path(data: &str, cfg: &TraceCfg) -> Result<Vec<Loop>> {
    trace_loops(parse_path_data(data)?, cfg)
}

/// Single loop of a polygon `points` attribute.
pub fn loop_from_points(data: &str) -> Result<Loop> {
    let mut verts = parse_points(data)?;
    dedup_ring(&mut verts);
    Loop::new(verts)
}

//! Connector segments drawn between shapes, resolved to shape pairs.

use serde::Serialize;
use tracing::{debug, trace};

use super::{AdjacencyEdge, AdjacencyList};
use crate::error::{GeomError, Result};
use crate::geom::Vertex;
use crate::path_data::{parse_path_data, PathCommand};
use crate::spatial::ShapesCanvas;

/// A connector line with its two end points in canvas coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Connector {
    pub id: Option<String>,
    pub start: Vertex,
    pub end: Vertex,
}

impl Connector {
    pub fn new(id: Option<String>, start: Vertex, end: Vertex) -> Self {
        Self { id, start, end }
    }

    /// Connector from path data: the opening `M` is the start, the pen
    /// position after the last drawing command is the end.
    pub fn from_path_data(id: Option<String>, data: &str) -> Result<Self> {
        let commands = parse_path_data(data)?;
        let mut it = commands.into_iter();
        let start = match it.next() {
            Some(PathCommand::Move { x, y }) => Vertex::new(x, y),
            Some(_) => {
                return Err(GeomError::CommandOrder {
                    index: 0,
                    message: "connector must start with M".into(),
                })
            }
            None => return Err(GeomError::empty("connector path data is empty")),
        };
        let mut pen = start;
        let mut subpath_start = start;
        let mut end = None;
        for cmd in it {
            match cmd {
                PathCommand::Move { x, y } => {
                    pen = Vertex::new(x, y);
                    subpath_start = pen;
                    continue;
                }
                PathCommand::Line { x, y } => pen = Vertex::new(x, y),
                PathCommand::Horizontal { value, relative } => {
                    pen.x = if relative { pen.x + value } else { value }
                }
                PathCommand::Vertical { value, relative } => {
                    pen.y = if relative { pen.y + value } else { value }
                }
                PathCommand::Close => pen = subpath_start,
            }
            end = Some(pen);
        }
        let end = end.ok_or_else(|| GeomError::empty("connector has no drawn segment"))?;
        Ok(Self { id, start, end })
    }
}

/// A connector whose two ends landed on two different shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectionEdge {
    pub edge: AdjacencyEdge,
    pub connector: Option<String>,
}

/// Resolve each connector's end points through `canvas`.
///
/// Connectors with an end over empty space, or with both ends on the same
/// shape, are dropped. Output keeps connector order with one record per
/// accepted connector, so a pair wired twice appears twice.
pub fn extract_connection_records<'a, I>(canvas: &ShapesCanvas, connectors: I) -> Vec<ConnectionEdge>
where
    I: IntoIterator<Item = &'a Connector>,
{
    let mut out = Vec::new();
    let mut dropped = 0usize;
    for c in connectors {
        let a = canvas.find_shape(c.start.x, c.start.y);
        let b = canvas.find_shape(c.end.x, c.end.y);
        match (a, b) {
            (Some(a), Some(b)) => match AdjacencyEdge::new(a.clone(), b.clone()) {
                Some(edge) => out.push(ConnectionEdge {
                    edge,
                    connector: c.id.clone(),
                }),
                None => {
                    trace!(connector = ?c.id, shape = %a, "connector loops back to one shape");
                    dropped += 1;
                }
            },
            _ => {
                trace!(connector = ?c.id, "connector end over empty space");
                dropped += 1;
            }
        }
    }
    debug!(connections = out.len(), dropped, "connectors resolved");
    out
}

/// Shape pairs joined by at least one connector, deduplicated and sorted.
pub fn extract_connections<'a, I>(canvas: &ShapesCanvas, connectors: I) -> AdjacencyList
where
    I: IntoIterator<Item = &'a Connector>,
{
    AdjacencyList::from_edges(
        extract_connection_records(canvas, connectors)
            .into_iter()
            .map(|c| c.edge),
    )
}

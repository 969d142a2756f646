//! Path data: command tokenizer and loop builder.
//!
//! Purpose
//! - Turn the `d` attribute of a path (or the `points` of a polygon) into
//!   closed, winding-normalized [`Loop`](crate::geom::Loop)s.
//!
//! Supported subset
//! - `M L H V Z` absolute, `h v` relative. Curves, arcs and the remaining
//!   relative commands are rejected, never approximated.

mod lexer;
mod tracer;

pub use lexer::{parse_path_data, parse_points, PathCommand};
pub use tracer::{loop_from_points, parse_path, trace_loops, LoopBuilder, TraceCfg};

#[cfg(test)]
mod tests;

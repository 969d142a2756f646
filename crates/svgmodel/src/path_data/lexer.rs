//! Tokenizer for the supported path-data subset and for polygon point lists.

use serde::Serialize;

use crate::error::{GeomError, Result};
use crate::geom::Vertex;

/// One drawing command. Coordinates are absolute except where `relative` says otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PathCommand {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Horizontal { value: f64, relative: bool },
    Vertical { value: f64, relative: bool },
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Kind {
    Move,
    Line,
    Horizontal { relative: bool },
    Vertical { relative: bool },
    Close,
}

impl Kind {
    fn from_letter(letter: char, pos: usize) -> Result<Kind> {
        Ok(match letter {
            'M' => Kind::Move,
            'L' => Kind::Line,
            'H' => Kind::Horizontal { relative: false },
            'h' => Kind::Horizontal { relative: true },
            'V' => Kind::Vertical { relative: false },
            'v' => Kind::Vertical { relative: true },
            'Z' => Kind::Close,
            _ => return Err(GeomError::UnsupportedCommand { letter, pos }),
        })
    }
}

/// Command letter plus the numbers collected so far.
struct Pending {
    kind: Kind,
    letter: char,
    pos: usize,
    args: Vec<f64>,
    // A comma was consumed and no number has followed it yet.
    dangling_comma: bool,
}

impl Pending {
    fn flush(self, out: &mut Vec<PathCommand>) -> Result<()> {
        if self.dangling_comma {
            return Err(GeomError::syntax(
                self.pos,
                format!("`{}` ends with a dangling comma", self.letter),
            ));
        }
        let n = self.args.len();
        match self.kind {
            Kind::Close => {
                if n != 0 {
                    return Err(GeomError::syntax(self.pos, "`Z` takes no arguments"));
                }
                out.push(PathCommand::Close);
            }
            Kind::Move | Kind::Line => {
                if n == 0 || n % 2 != 0 {
                    return Err(GeomError::syntax(
                        self.pos,
                        format!("`{}` needs coordinate pairs, got {n} numbers", self.letter),
                    ));
                }
                for (i, pair) in self.args.chunks_exact(2).enumerate() {
                    let (x, y) = (pair[0], pair[1]);
                    // Extra pairs after a move are implicit lines.
                    if i == 0 && self.kind == Kind::Move {
                        out.push(PathCommand::Move { x, y });
                    } else {
                        out.push(PathCommand::Line { x, y });
                    }
                }
            }
            Kind::Horizontal { relative } | Kind::Vertical { relative } => {
                if n == 0 {
                    return Err(GeomError::syntax(
                        self.pos,
                        format!("`{}` needs a value", self.letter),
                    ));
                }
                let horizontal = matches!(self.kind, Kind::Horizontal { .. });
                for &value in &self.args {
                    out.push(if horizontal {
                        PathCommand::Horizontal { value, relative }
                    } else {
                        PathCommand::Vertical { value, relative }
                    });
                }
            }
        }
        Ok(())
    }
}

#[inline]
fn starts_number(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+')
}

/// Scan one number starting at `start`; returns the value and the end offset.
///
/// A sign only continues the token right after an exponent marker, so `10-5`
/// yields two numbers while `1.2.3` is one malformed token.
fn scan_number(data: &str, start: usize) -> Result<(f64, usize)> {
    let bytes = data.as_bytes();
    let mut end = start;
    while end < bytes.len() {
        let b = bytes[end];
        let sign_ok = end == start || matches!(bytes[end - 1], b'e' | b'E');
        let accept = b.is_ascii_digit()
            || matches!(b, b'.' | b'e' | b'E')
            || (matches!(b, b'-' | b'+') && sign_ok);
        if !accept {
            break;
        }
        end += 1;
    }
    let token = &data[start..end];
    let value: f64 = token
        .parse()
        .map_err(|_| GeomError::syntax(start, format!("malformed number `{token}`")))?;
    if !value.is_finite() {
        return Err(GeomError::syntax(start, format!("number `{token}` is not finite")));
    }
    Ok((value, end))
}

fn unexpected_char(data: &str, pos: usize) -> GeomError {
    let c = data[pos..].chars().next().unwrap_or('\u{fffd}');
    GeomError::syntax(pos, format!("unexpected character `{c}`"))
}

/// Tokenize path data into commands.
///
/// Supported: `M L H V Z` (absolute) and `h v` (relative). Any other command
/// letter is rejected with `UnsupportedCommand`. A final `L` that returns to the
/// initial `M` point is rewritten to `Close`.
pub fn parse_path_data(data: &str) -> Result<Vec<PathCommand>> {
    let bytes = data.as_bytes();
    let mut out = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() {
            pos += 1;
        } else if b == b',' {
            match pending.as_mut() {
                Some(p) if !p.args.is_empty() && !p.dangling_comma => {
                    p.dangling_comma = true;
                    pos += 1;
                }
                _ => return Err(GeomError::syntax(pos, "unexpected comma")),
            }
        } else if starts_number(b) {
            let Some(p) = pending.as_mut() else {
                return Err(GeomError::syntax(pos, "number before any command"));
            };
            let (value, end) = scan_number(data, pos)?;
            p.args.push(value);
            p.dangling_comma = false;
            pos = end;
        } else if b.is_ascii_alphabetic() {
            if let Some(p) = pending.take() {
                p.flush(&mut out)?;
            }
            let letter = b as char;
            pending = Some(Pending {
                kind: Kind::from_letter(letter, pos)?,
                letter,
                pos,
                args: Vec::new(),
                dangling_comma: false,
            });
            pos += 1;
        } else {
            return Err(unexpected_char(data, pos));
        }
    }
    if let Some(p) = pending.take() {
        p.flush(&mut out)?;
    }

    if let (Some(PathCommand::Move { x: x0, y: y0 }), Some(PathCommand::Line { x, y })) =
        (out.first().copied(), out.last().copied())
    {
        if out.len() > 1 && x == x0 && y == y0 {
            if let Some(last) = out.last_mut() {
                *last = PathCommand::Close;
            }
        }
    }
    Ok(out)
}

/// Parse a polygon `points` attribute: whitespace-separated `x,y` pairs.
pub fn parse_points(data: &str) -> Result<Vec<Vertex>> {
    let bytes = data.as_bytes();
    let mut coords: Vec<f64> = Vec::new();
    let mut comma_ok = false;
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() {
            pos += 1;
        } else if b == b',' {
            if !comma_ok {
                return Err(GeomError::syntax(pos, "unexpected comma"));
            }
            comma_ok = false;
            pos += 1;
        } else if starts_number(b) {
            let (value, end) = scan_number(data, pos)?;
            coords.push(value);
            comma_ok = true;
            pos = end;
        } else {
            return Err(unexpected_char(data, pos));
        }
    }
    if coords.len() % 2 != 0 {
        return Err(GeomError::syntax(
            data.len(),
            format!("odd number of coordinates ({})", coords.len()),
        ));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|c| Vertex::new(c[0], c[1]))
        .collect())
}

// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path-data tokenizer and command parser.
//!
//! Parsing never fails. Unknown command letters are logged and skipped together with
//! their arguments, and a command with too few arguments is dropped.

use kurbo::{Point, Vec2};

/// Endpoint-parameterized elliptical arc, as written in path data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcTo {
    /// Current point when the arc starts.
    pub from: Point,
    /// Arc end point.
    pub to: Point,
    /// Ellipse radii as given; they may be too small to reach `to`.
    pub radii: Vec2,
    /// Rotation of the ellipse's x axis, in radians.
    pub x_rotation: f64,
    /// Take the longer of the two candidate arcs.
    pub large_arc: bool,
    /// Sweep in the positive-angle direction.
    pub sweep: bool,
}

/// One drawing command with absolute coordinates.
///
/// Relative forms, `H`/`V` and the smooth `S`/`T` curves are resolved while parsing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line to a point.
    LineTo(Point),
    /// Quadratic Bézier with one control point.
    QuadTo(Point, Point),
    /// Cubic Bézier with two control points.
    CubicTo(Point, Point, Point),
    /// Elliptical arc.
    ArcTo(ArcTo),
    /// Close the current subpath back to its start.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Command(u8),
    Number(f64),
}

fn tokenize(d: &str) -> Vec<Token> {
    let bytes = d.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    // Numbers read since the last command letter, for spotting arc flags.
    let mut command = 0_u8;
    let mut args = 0_usize;
    let mut i = 0;
    while i < len {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
            continue;
        }
        if b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E') {
            tokens.push(Token::Command(b));
            command = b;
            args = 0;
            i += 1;
            continue;
        }
        // Arc flags are single digits and may be written without separators.
        if matches!(command, b'A' | b'a')
            && matches!(args % 7, 3 | 4)
            && matches!(b, b'0' | b'1')
            && bytes.get(i + 1) != Some(&b'.')
        {
            tokens.push(Token::Number(f64::from(b - b'0')));
            args += 1;
            i += 1;
            continue;
        }

        let start = i;
        let mut j = i;
        if matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let mut digits = false;
        let mut dot = false;
        while j < len {
            match bytes[j] {
                b'0'..=b'9' => digits = true,
                b'.' if !dot => dot = true,
                _ => break,
            }
            j += 1;
        }
        if digits && j < len && matches!(bytes[j], b'e' | b'E') {
            let mut k = j + 1;
            if k < len && matches!(bytes[k], b'+' | b'-') {
                k += 1;
            }
            if k < len && bytes[k].is_ascii_digit() {
                while k < len && bytes[k].is_ascii_digit() {
                    k += 1;
                }
                j = k;
            }
        }

        if !digits {
            tracing::debug!(offset = start, "skipping unexpected character in path data");
            i = start + 1;
            while i < len && !d.is_char_boundary(i) {
                i += 1;
            }
            continue;
        }
        match d[start..j].parse::<f64>() {
            Ok(v) => {
                tokens.push(Token::Number(v));
                args += 1;
            }
            Err(_) => tracing::debug!(token = &d[start..j], "skipping malformed number"),
        }
        i = j;
    }
    tokens
}

fn arity(cmd: u8) -> Option<usize> {
    match cmd.to_ascii_uppercase() {
        b'Z' => Some(0),
        b'H' | b'V' => Some(1),
        b'M' | b'L' | b'T' => Some(2),
        b'S' | b'Q' => Some(4),
        b'C' => Some(6),
        b'A' => Some(7),
        _ => None,
    }
}

fn reflect(p: Point, around: Point) -> Point {
    around + (around - p)
}

#[derive(Default)]
struct Cursor {
    current: Point,
    start: Point,
    last_cubic: Option<Point>,
    last_quad: Option<Point>,
}

impl Cursor {
    fn point(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            self.current + Vec2::new(x, y)
        } else {
            Point::new(x, y)
        }
    }

    fn apply(&mut self, cmd: u8, a: &[f64]) -> PathCommand {
        let rel = cmd.is_ascii_lowercase();
        let mut cubic = None;
        let mut quad = None;
        let out = match cmd.to_ascii_uppercase() {
            b'M' => {
                let p = self.point(rel, a[0], a[1]);
                self.start = p;
                PathCommand::MoveTo(p)
            }
            b'L' => PathCommand::LineTo(self.point(rel, a[0], a[1])),
            b'H' => {
                let x = if rel { self.current.x + a[0] } else { a[0] };
                PathCommand::LineTo(Point::new(x, self.current.y))
            }
            b'V' => {
                let y = if rel { self.current.y + a[0] } else { a[0] };
                PathCommand::LineTo(Point::new(self.current.x, y))
            }
            b'C' => {
                let c1 = self.point(rel, a[0], a[1]);
                let c2 = self.point(rel, a[2], a[3]);
                cubic = Some(c2);
                PathCommand::CubicTo(c1, c2, self.point(rel, a[4], a[5]))
            }
            b'S' => {
                let c1 = self
                    .last_cubic
                    .map_or(self.current, |c| reflect(c, self.current));
                let c2 = self.point(rel, a[0], a[1]);
                cubic = Some(c2);
                PathCommand::CubicTo(c1, c2, self.point(rel, a[2], a[3]))
            }
            b'Q' => {
                let c = self.point(rel, a[0], a[1]);
                quad = Some(c);
                PathCommand::QuadTo(c, self.point(rel, a[2], a[3]))
            }
            b'T' => {
                let c = self
                    .last_quad
                    .map_or(self.current, |c| reflect(c, self.current));
                quad = Some(c);
                PathCommand::QuadTo(c, self.point(rel, a[0], a[1]))
            }
            b'A' => PathCommand::ArcTo(ArcTo {
                from: self.current,
                to: self.point(rel, a[5], a[6]),
                radii: Vec2::new(a[0].abs(), a[1].abs()),
                x_rotation: a[2].to_radians(),
                large_arc: a[3] != 0.0,
                sweep: a[4] != 0.0,
            }),
            _ => PathCommand::Close,
        };
        self.last_cubic = cubic;
        self.last_quad = quad;
        self.current = match out {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::QuadTo(_, p) | PathCommand::CubicTo(_, _, p) => p,
            PathCommand::ArcTo(arc) => arc.to,
            PathCommand::Close => self.start,
        };
        out
    }
}

/// Parse SVG path data into absolute commands.
///
/// Extra coordinate groups repeat the previous command; after a move-to they become
/// line-tos. Unknown commands and trailing partial argument groups are skipped.
///
/// ```
/// use hitgraph_geometry::path::{PathCommand, parse};
/// use kurbo::Point;
///
/// let cmds = parse("M0 0 10 0 v10 z");
/// assert_eq!(cmds[1], PathCommand::LineTo(Point::new(10.0, 0.0)));
/// assert_eq!(cmds[2], PathCommand::LineTo(Point::new(10.0, 10.0)));
/// assert_eq!(cmds[3], PathCommand::Close);
/// ```
pub fn parse(d: &str) -> Vec<PathCommand> {
    let tokens = tokenize(d);
    let mut commands = Vec::new();
    let mut cursor = Cursor::default();
    let mut active: Option<(u8, usize)> = None;
    let mut args = Vec::with_capacity(7);
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Command(c) => {
                i += 1;
                match arity(c) {
                    Some(0) => {
                        commands.push(cursor.apply(c, &[]));
                        active = None;
                    }
                    Some(n) => active = Some((c, n)),
                    None => {
                        tracing::debug!(command = %char::from(c), "skipping unknown path command");
                        active = None;
                    }
                }
            }
            Token::Number(_) => {
                let Some((c, n)) = active else {
                    i += 1;
                    continue;
                };
                args.clear();
                while args.len() < n {
                    match tokens.get(i) {
                        Some(Token::Number(v)) => {
                            args.push(*v);
                            i += 1;
                        }
                        _ => break,
                    }
                }
                if args.len() < n {
                    tracing::debug!(
                        command = %char::from(c),
                        expected = n,
                        found = args.len(),
                        "dropping path command with missing arguments"
                    );
                    active = None;
                    continue;
                }
                commands.push(cursor.apply(c, &args));
                active = match c {
                    b'M' => Some((b'L', 2)),
                    b'm' => Some((b'l', 2)),
                    _ => Some((c, n)),
                };
            }
        }
    }
    commands
}

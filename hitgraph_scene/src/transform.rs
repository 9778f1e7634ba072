// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG transform-list parsing.
//!
//! Supported operations are `translate(tx [ty])`, `scale(sx [sy])`,
//! `rotate(deg [cx cy])` and `matrix(a b c d e f)`, with arguments separated by
//! commas or whitespace. Unknown operations and wrong argument counts are skipped.

use hitgraph_geometry::Matrix;
use kurbo::Point;

/// One parsed transform operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Translate by `(tx, ty)`.
    Translate(f64, f64),
    /// Scale by `(sx, sy)`.
    Scale(f64, f64),
    /// Rotate by `degrees`, optionally about a center other than the origin.
    Rotate {
        /// Angle in degrees; positive turns +x towards +y.
        degrees: f64,
        /// Pivot point.
        center: Option<Point>,
    },
    /// Right-multiply by the affine `(a, b, c, d, e, f)`.
    Matrix([f64; 6]),
}

impl TransformOp {
    fn from_args(name: &str, args: &[f64]) -> Option<Self> {
        match (name, args) {
            ("translate", &[tx]) => Some(Self::Translate(tx, 0.0)),
            ("translate", &[tx, ty]) => Some(Self::Translate(tx, ty)),
            ("scale", &[s]) => Some(Self::Scale(s, s)),
            ("scale", &[sx, sy]) => Some(Self::Scale(sx, sy)),
            ("rotate", &[degrees]) => Some(Self::Rotate {
                degrees,
                center: None,
            }),
            ("rotate", &[degrees, cx, cy]) => Some(Self::Rotate {
                degrees,
                center: Some(Point::new(cx, cy)),
            }),
            ("matrix", &[a, b, c, d, e, f]) => Some(Self::Matrix([a, b, c, d, e, f])),
            _ => None,
        }
    }

    /// Right-multiply `m` by this operation.
    pub fn apply(&self, m: &mut Matrix) {
        match *self {
            Self::Translate(tx, ty) => {
                m.translate(tx, ty);
            }
            Self::Scale(sx, sy) => {
                m.scale(sx, sy);
            }
            Self::Rotate { degrees, center } => match center {
                Some(c) => {
                    m.translate(c.x, c.y)
                        .rotate(degrees.to_radians())
                        .translate(-c.x, -c.y);
                }
                None => {
                    m.rotate(degrees.to_radians());
                }
            },
            Self::Matrix([a, b, c, d, e, f]) => {
                m.multiply(&Matrix::from_affine_values(a, b, c, d, e, f));
            }
        }
    }
}

/// Parse a transform list into operations, in source order.
pub fn parse_transform(src: &str) -> Vec<TransformOp> {
    let mut ops = Vec::new();
    let mut rest = src;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() {
            break;
        }
        let Some(open) = rest.find('(') else {
            tracing::debug!(rest, "ignoring trailing text in transform list");
            break;
        };
        let Some(close) = rest[open..].find(')').map(|i| open + i) else {
            tracing::debug!(rest, "unterminated transform operation");
            break;
        };
        let name = rest[..open].trim();
        let body = &rest[open + 1..close];
        rest = &rest[close + 1..];

        let args: Result<Vec<f64>, _> = body
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>)
            .collect();
        let Ok(args) = args else {
            tracing::debug!(name, body, "skipping transform with malformed arguments");
            continue;
        };
        match TransformOp::from_args(name, &args) {
            Some(op) => ops.push(op),
            None => tracing::debug!(name, count = args.len(), "skipping unsupported transform"),
        }
    }
    ops
}

/// Fold `ops` onto a copy of `base`.
pub fn apply_transform(ops: &[TransformOp], base: &Matrix) -> Matrix {
    let mut m = base.snapshot();
    for op in ops {
        op.apply(&mut m);
    }
    m
}

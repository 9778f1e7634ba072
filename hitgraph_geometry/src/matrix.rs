// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 3×3 homogeneous 2D affine matrix with a save/restore stack.
//!
//! Elements are stored row-major. A point `(x, y)` maps to
//! `(m[0][0]·x + m[0][1]·y + m[0][2], m[1][0]·x + m[1][1]·y + m[1][2])`.
//!
//! All composing operations right-multiply, so a chain such as
//! `m.translate(10.0, 0.0).scale(2.0, 2.0)` scales first and translates second
//! when applied to a point, matching SVG transform-list order.

use kurbo::{Affine, Point};

/// Row-major element storage.
pub type Elements = [[f64; 3]; 3];

const IDENTITY: Elements = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Operand for [`Matrix::multiply`].
#[derive(Clone, Copy, Debug)]
pub enum Multiplier<'a> {
    /// Matrix product `self × other`.
    Matrix(&'a Matrix),
    /// Element-wise scaling of every entry.
    Scalar(f64),
}

impl<'a> From<&'a Matrix> for Multiplier<'a> {
    fn from(m: &'a Matrix) -> Self {
        Self::Matrix(m)
    }
}

impl From<f64> for Multiplier<'_> {
    fn from(s: f64) -> Self {
        Self::Scalar(s)
    }
}

/// 2D affine matrix in homogeneous form.
///
/// The saved-state stack is part of the value: [`Matrix::save`] pushes a copy of the
/// current elements and [`Matrix::restore`] pops it back. Restoring with an empty
/// stack does nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    m: Elements,
    stack: Vec<Elements>,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// The identity matrix with an empty stack.
    pub fn identity() -> Self {
        Self::from_elements(IDENTITY)
    }

    /// Build a matrix from row-major elements.
    pub fn from_elements(m: Elements) -> Self {
        Self {
            m,
            stack: Vec::new(),
        }
    }

    /// Build a matrix from the six canvas-style affine values.
    ///
    /// `(a, b)` is the image of the x axis, `(c, d)` of the y axis and `(e, f)` the
    /// translation.
    pub fn from_affine_values(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self::from_elements([[a, c, e], [b, d, f], [0.0, 0.0, 1.0]])
    }

    /// Row-major elements.
    pub fn elements(&self) -> &Elements {
        &self.m
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the elements equal the identity exactly.
    pub fn is_identity(&self) -> bool {
        self.m == IDENTITY
    }

    /// Whether the linear part maps the axes onto themselves (no rotation or skew).
    pub fn is_axis_aligned(&self) -> bool {
        self.m[0][1] == 0.0 && self.m[1][0] == 0.0
    }

    /// Push a copy of the current elements.
    pub fn save(&mut self) -> &mut Self {
        self.stack.push(self.m);
        self
    }

    /// Pop the last saved elements. No-op when nothing was saved.
    pub fn restore(&mut self) -> &mut Self {
        if let Some(m) = self.stack.pop() {
            self.m = m;
        }
        self
    }

    /// Reset to the identity, keeping the saved stack.
    pub fn reset(&mut self) -> &mut Self {
        self.m = IDENTITY;
        self
    }

    /// Right-multiply by a translation.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.mul_elements(&[[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    /// Right-multiply by a non-uniform scale.
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.mul_elements(&[[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Right-multiply by a uniform scale.
    pub fn scale_uniform(&mut self, s: f64) -> &mut Self {
        self.scale(s, s)
    }

    /// Right-multiply by a rotation of `radians` (positive turns +x towards +y).
    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        let (s, c) = radians.sin_cos();
        self.mul_elements(&[[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Right-multiply by another matrix, or scale every element by a scalar.
    pub fn multiply<'a>(&mut self, by: impl Into<Multiplier<'a>>) -> &mut Self {
        match by.into() {
            Multiplier::Matrix(other) => {
                let rhs = other.m;
                self.mul_elements(&rhs)
            }
            Multiplier::Scalar(s) => {
                for row in &mut self.m {
                    for v in row.iter_mut() {
                        *v *= s;
                    }
                }
                self
            }
        }
    }

    /// Load the six affine values directly, replacing the current elements.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.m = [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]];
        self
    }

    /// Determinant of the full 3×3 matrix.
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Invert in place via adjugate over determinant.
    ///
    /// A singular matrix yields non-finite elements; callers that care check
    /// [`Matrix::determinant`] or [`Matrix::is_finite`].
    pub fn invert(&mut self) -> &mut Self {
        let m = self.m;
        let det = self.determinant();
        let inv = 1.0 / det;
        self.m = [
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
            ],
        ];
        self
    }

    /// Transpose in place.
    pub fn transpose(&mut self) -> &mut Self {
        let m = self.m;
        for (r, row) in self.m.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = m[c][r];
            }
        }
        self
    }

    /// A copy of the elements without the saved stack.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self::from_elements(self.m)
    }

    /// A new matrix holding the inverse of this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut out = self.snapshot();
        out.invert();
        out
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// Apply the matrix to a point.
    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.m;
        Point::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2],
        )
    }

    /// Apply the matrix to every point.
    pub fn transform_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.transform_point(*p)).collect()
    }

    /// Absolute area scale factor of the linear part, as a length ratio.
    pub fn length_scale(&self) -> f64 {
        let m = &self.m;
        (m[0][0] * m[1][1] - m[0][1] * m[1][0]).abs().sqrt()
    }

    /// Convert to a kurbo affine, dropping the projective row.
    pub fn to_affine(&self) -> Affine {
        let m = &self.m;
        Affine::new([m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2]])
    }

    fn mul_elements(&mut self, rhs: &Elements) -> &mut Self {
        let lhs = self.m;
        for (r, row) in self.m.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = lhs[r][0] * rhs[0][c] + lhs[r][1] * rhs[1][c] + lhs[r][2] * rhs[2][c];
            }
        }
        self
    }
}

impl From<Affine> for Matrix {
    fn from(a: Affine) -> Self {
        let [a, b, c, d, e, f] = a.as_coeffs();
        Self::from_affine_values(a, b, c, d, e, f)
    }
}

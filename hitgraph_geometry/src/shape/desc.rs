// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Loosely-typed shape description, as produced by a declarative layer.
///
/// Which fields are present decides the shape; see [`Shape::infer`](crate::Shape::infer).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShapeDesc {
    /// Point x, or rect left edge.
    pub x: Option<f64>,
    /// Point y, or rect top edge.
    pub y: Option<f64>,
    /// Rect width.
    pub width: Option<f64>,
    /// Rect height.
    pub height: Option<f64>,
    /// Circle center x.
    pub cx: Option<f64>,
    /// Circle center y.
    pub cy: Option<f64>,
    /// Circle radius.
    pub r: Option<f64>,
    /// Line start x.
    pub x1: Option<f64>,
    /// Line start y.
    pub y1: Option<f64>,
    /// Line end x.
    pub x2: Option<f64>,
    /// Line end y.
    pub y2: Option<f64>,
    /// Polygon vertices as `[x, y]` pairs.
    pub vertices: Option<Vec<[f64; 2]>>,
}

impl ShapeDesc {
    /// A point descriptor.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A rect descriptor.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// A circle descriptor.
    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self {
            cx: Some(cx),
            cy: Some(cy),
            r: Some(r),
            ..Self::default()
        }
    }

    /// A line descriptor.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: Some(x1),
            y1: Some(y1),
            x2: Some(x2),
            y2: Some(y2),
            ..Self::default()
        }
    }

    /// A polygon descriptor.
    pub fn polygon(vertices: Vec<[f64; 2]>) -> Self {
        Self {
            vertices: Some(vertices),
            ..Self::default()
        }
    }
}

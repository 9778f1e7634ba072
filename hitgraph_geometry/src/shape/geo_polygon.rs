// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::Bounds;
use crate::collide::area_contains_point;
use crate::shape::Polygon;

/// Polygon with holes.
///
/// Ring 0 is the outer boundary and every later ring is a hole. Containment uses
/// even-odd parity across all rings, so a point inside a hole is outside the region.
/// Degenerate holes are dropped; a degenerate outer ring makes the whole shape
/// degenerate.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPolygon {
    rings: Vec<Polygon>,
}

impl GeoPolygon {
    /// Build from an outer ring followed by hole rings.
    pub fn new<R, I>(rings: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = Point>,
    {
        let mut out: Vec<Polygon> = Vec::new();
        for ring in rings {
            let poly = Polygon::new(ring);
            if out.is_empty() || !poly.is_degenerate() {
                out.push(poly);
            }
        }
        Self { rings: out }
    }

    /// Build from existing polygons, the first being the outer ring.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut rings = Vec::with_capacity(polygons.len());
        for (i, p) in polygons.into_iter().enumerate() {
            if i == 0 || !p.is_degenerate() {
                rings.push(p);
            }
        }
        Self { rings }
    }

    /// All rings, outer first.
    pub fn rings(&self) -> &[Polygon] {
        &self.rings
    }

    /// The outer ring, if any.
    pub fn outer(&self) -> Option<&Polygon> {
        self.rings.first()
    }

    /// Hole rings.
    pub fn holes(&self) -> &[Polygon] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Union of the ring bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.rings
            .iter()
            .filter_map(Polygon::bounds)
            .reduce(Bounds::union)
    }

    /// No usable outer ring.
    pub fn is_degenerate(&self) -> bool {
        self.outer().is_none_or(Polygon::is_degenerate)
    }

    /// Even-odd containment across every ring; any ring boundary counts as inside.
    pub fn contains_point(&self, p: Point) -> bool {
        !self.is_degenerate() && area_contains_point(self, p)
    }
}

// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::Bounds;
use crate::collide::area_contains_point;

/// Closed polygon collider.
///
/// Construction removes consecutive duplicate vertices and closes the ring when the
/// first and last vertex differ. A ring with two or fewer edges is degenerate and
/// never collides.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    ring: Vec<Point>,
    bounds: Option<Bounds>,
}

impl Polygon {
    /// Build a polygon from its vertices. The ring may be open or closed.
    pub fn new<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut ring: Vec<Point> = Vec::new();
        for v in vertices {
            if ring.last() != Some(&v) {
                ring.push(v);
            }
        }
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if first != last {
                ring.push(first);
            }
        }
        // A closed ring of n distinct vertices has n + 1 entries and n edges.
        let bounds = if ring.len() > 3 {
            Bounds::from_points(ring.iter().copied())
        } else {
            None
        };
        Self { ring, bounds }
    }

    /// Build a polygon from `[x, y]` pairs.
    pub fn from_coords<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        Self::new(coords.into_iter().map(|[x, y]| Point::new(x, y)))
    }

    /// The closed ring: the first vertex is repeated at the end.
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    /// Distinct vertices, without the closing repeat.
    pub fn vertices(&self) -> &[Point] {
        match self.ring.len() {
            0 => &self.ring,
            n => &self.ring[..n - 1],
        }
    }

    /// Number of edges in the closed ring.
    pub fn edge_count(&self) -> usize {
        self.ring.len().saturating_sub(1)
    }

    /// Bounding box, absent for degenerate polygons.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Two or fewer edges.
    pub fn is_degenerate(&self) -> bool {
        self.bounds.is_none()
    }

    /// Even-odd containment; points on an edge or vertex are inside.
    pub fn contains_point(&self, p: Point) -> bool {
        !self.is_degenerate() && area_contains_point(self, p)
    }
}

impl AsRef<[Point]> for Polygon {
    fn as_ref(&self) -> &[Point] {
        &self.ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_coords([[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]])
    }

    #[test]
    fn closes_and_dedups() {
        let p = Polygon::from_coords([[0.0, 0.0], [0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [4.0, 3.0]]);
        assert_eq!(p.ring().len(), 4);
        assert_eq!(p.edge_count(), 3);
        assert_eq!(p.ring().first(), p.ring().last());
        assert_eq!(p.vertices().len(), 3);
    }

    #[test]
    fn two_vertices_are_degenerate() {
        let p = Polygon::from_coords([[0.0, 0.0], [5.0, 5.0]]);
        assert!(p.is_degenerate());
        assert!(!p.contains_point(Point::new(0.0, 0.0)));
        assert!(!p.contains_point(Point::new(2.5, 2.5)));
    }

    #[test]
    fn vertices_and_edges_are_inside() {
        let sq = square();
        for p in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 7.5),
        ] {
            assert!(sq.contains_point(p), "{p:?} lies on the boundary");
        }
        assert!(!sq.contains_point(Point::new(10.0001, 5.0)));
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // Concave "arrow": the ray at y = 5 passes exactly through the vertex (5, 5).
        let p = Polygon::from_coords([
            [0.0, 0.0],
            [5.0, 5.0],
            [0.0, 10.0],
            [10.0, 10.0],
            [10.0, 0.0],
        ]);
        assert!(p.contains_point(Point::new(7.0, 5.0)));
        assert!(!p.contains_point(Point::new(2.0, 5.0)));
        // Diamond whose left vertex is touched by the ray without crossing.
        let d = Polygon::from_coords([[0.0, 5.0], [5.0, 0.0], [10.0, 5.0], [5.0, 10.0]]);
        assert!(d.contains_point(Point::new(5.0, 5.0)));
        assert!(!d.contains_point(Point::new(11.0, 5.0)));
    }
}

//! Stroke geometry: connected polylines and unordered segment meshes.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// An ordered sequence of points joined by straight segments.
///
/// When `closed` is set, an implicit edge runs from the last point back to the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Build an open polyline, collapsing immediately repeated vertices.
    ///
    /// Only neighbours are compared, so a vertex that reappears later in the
    /// sequence is kept.
    pub fn from_deduped<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points: Vec<Point> = vertices.into_iter().collect();
        points.dedup();
        Self {
            points,
            closed: false,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every edge of the polyline, including the closing edge when closed.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if self.points.len() > 1 => Some((last, first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    pub fn scaled(&self, factor: f32) -> Polyline {
        Polyline {
            points: self.points.iter().map(|p| *p * factor).collect(),
            closed: self.closed,
        }
    }
}

/// An unordered list of independent 2-point line segments.
///
/// Cutting a closed loop with a chord can leave several disjoint runs of edges,
/// so the result is kept as segments rather than a single walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub segments: Vec<[Point; 2]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, a: Point, b: Point) {
        self.segments.push([a, b]);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment endpoints in storage order, two per segment.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| s.iter().copied())
    }

    /// Walk the segment endpoints as one open polyline, dropping zero-length steps.
    pub fn to_polyline(&self) -> Polyline {
        Polyline::from_deduped(self.vertices())
    }

    pub fn scaled(&self, factor: f32) -> Mesh {
        Mesh {
            segments: self
                .segments
                .iter()
                .map(|[a, b]| [*a * factor, *b * factor])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_collapses_only_neighbours() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(1.0, 1.0);

        let poly = Polyline::from_deduped(vec![a, a, b, b, b, c]);
        assert_eq!(poly.points, vec![a, b, c]);
        assert!(!poly.closed);

        let revisit = Polyline::from_deduped(vec![a, b, a]);
        assert_eq!(revisit.points, vec![a, b, a]);
    }

    #[test]
    fn dedup_keeps_leading_origin() {
        let origin = Point::zero();
        let poly = Polyline::from_deduped(vec![origin, Point::new(2.0, 0.0)]);
        assert_eq!(poly.len(), 2);
    }

    #[test]
    fn closed_polyline_has_closing_edge() {
        let square = Polyline::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            true,
        );
        let edges: Vec<_> = square.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (Point::new(0.0, 1.0), Point::new(0.0, 0.0)));

        let open = Polyline::from_points(square.points.clone(), false);
        assert_eq!(open.edges().count(), 3);
    }

    #[test]
    fn degenerate_polylines_have_no_edges() {
        assert_eq!(Polyline::new().edges().count(), 0);
        let single = Polyline::from_points(vec![Point::new(3.0, 3.0)], true);
        assert_eq!(single.edges().count(), 0);
    }

    #[test]
    fn mesh_walk_joins_chained_segments() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(2.0, 1.0);

        let mut mesh = Mesh::new();
        mesh.push_segment(a, b);
        mesh.push_segment(b, c);

        assert_eq!(mesh.vertices().count(), 4);
        assert_eq!(mesh.to_polyline().points, vec![a, b, c]);
    }

    #[test]
    fn scaling_preserves_topology() {
        let poly = Polyline::from_points(vec![Point::new(2.0, 4.0)], true).scaled(0.5);
        assert_eq!(poly.points, vec![Point::new(1.0, 2.0)]);
        assert!(poly.closed);
    }
}

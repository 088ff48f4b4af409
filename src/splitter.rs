//! Circle generation and half-plane splitting of polylines against a chord.

use crate::curve::{Mesh, Polyline};
use crate::types::Point;

pub const DEFAULT_CIRCLE_RESOLUTION: usize = 32;

/// The two halves of a polyline cut by a directed chord.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    /// Edges whose midpoint has a negative determinant against the chord.
    pub above: Mesh,
    /// All remaining edges, including those with midpoints on the chord.
    pub below: Mesh,
}

/// A closed polygon approximating a circle, with `resolution` vertices spaced
/// evenly over a full turn starting at angle zero.
pub fn build_circle(center: Point, radius: f32, resolution: usize) -> Polyline {
    let base = Point::new(radius, 0.0);
    let points = (0..resolution)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / resolution as f32;
            center + base.rotated(angle)
        })
        .collect();
    Polyline::from_points(points, true)
}

/// Twice the signed area of the triangle `(start, end, point)`.
///
/// The sign tells which side of the directed line `start -> end` the point is on.
#[inline]
pub fn determinant(start: Point, end: Point, point: Point) -> f32 {
    (end.x - start.x) * (point.y - start.y) - (end.y - start.y) * (point.x - start.x)
}

/// Partition every edge of `poly` by which side of `left -> right` its midpoint lies.
///
/// Edges go whole into one mesh; classifying by midpoint keeps an edge that
/// touches the chord at a vertex from being ambiguous.
pub fn divide(poly: &Polyline, left: Point, right: Point) -> Split {
    let mut split = Split::default();
    for (a, b) in poly.edges() {
        if determinant(left, right, a.midpoint(b)) < 0.0 {
            split.above.push_segment(a, b);
        } else {
            split.below.push_segment(a, b);
        }
    }
    split
}

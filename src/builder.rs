//! Turns landmark indices into stroke polylines.
//!
//! Lip and nose curves run between two "corner" landmarks shared by several
//! curves. Each curve's end vertices are pulled from the corner toward the
//! curve's own neighbouring landmark, so strokes meeting at a mouth corner do
//! not all end on the same point.

use crate::curve::Polyline;
use crate::landmarks::{
    Feature, LEFT_MOUTH_CORNER, LEFT_NOSTRIL_ANCHOR, RIGHT_MOUTH_CORNER, RIGHT_NOSTRIL_ANCHOR,
};
use crate::tracker::Tracker;
use crate::types::Point;

/// Which configured blend factor a curve uses for its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShrinkFactor {
    Lip,
    Nostril,
}

/// A curve assembled from explicit landmarks with shrunk endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacialCurve {
    LowerLip,
    InnerUpperLip,
    InnerLowerLip,
    UpperLip,
    Nose,
}

impl FacialCurve {
    /// Corner landmark the curve starts from.
    pub fn start_corner(&self) -> usize {
        match self {
            FacialCurve::Nose => LEFT_NOSTRIL_ANCHOR,
            _ => LEFT_MOUTH_CORNER,
        }
    }

    /// Corner landmark the curve ends at.
    pub fn end_corner(&self) -> usize {
        match self {
            FacialCurve::Nose => RIGHT_NOSTRIL_ANCHOR,
            _ => RIGHT_MOUTH_CORNER,
        }
    }

    /// Landmarks between the corners, in drawing order.
    pub fn interior(&self) -> &'static [usize] {
        match self {
            FacialCurve::LowerLip => &[59, 58, 57, 56, 55],
            FacialCurve::InnerUpperLip => &[61, 62, 63],
            FacialCurve::InnerLowerLip => &[67, 66, 65],
            FacialCurve::UpperLip => &[49, 50, 51, 52, 53],
            FacialCurve::Nose => &[31, 32, 33, 34, 35],
        }
    }

    pub fn shrink_factor(&self) -> ShrinkFactor {
        match self {
            FacialCurve::Nose => ShrinkFactor::Nostril,
            _ => ShrinkFactor::Lip,
        }
    }

    fn max_index(&self) -> usize {
        self.interior()
            .iter()
            .copied()
            .chain([self.start_corner(), self.end_corner()])
            .max()
            .unwrap_or(0)
    }
}

/// Blend from `corner` toward `neighbor`: `width = 0` is the corner itself,
/// `width = 1` is the neighbour.
#[inline]
pub fn shrink_endpoint(corner: Point, neighbor: Point, width: f32) -> Point {
    corner.lerp(neighbor, width)
}

/// Polyline through `interior`, capped at each end by a shrunk corner point.
///
/// Yields an empty polyline when `interior` is empty.
pub fn shrunk_curve<T: Tracker + ?Sized>(
    tracker: &T,
    start_corner: usize,
    interior: &[usize],
    end_corner: usize,
    width: f32,
) -> Polyline {
    let (Some(&first), Some(&last)) = (interior.first(), interior.last()) else {
        return Polyline::new();
    };

    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(shrink_endpoint(
        tracker.image_point(start_corner),
        tracker.image_point(first),
        width,
    ));
    points.extend(interior.iter().map(|&i| tracker.image_point(i)));
    points.push(shrink_endpoint(
        tracker.image_point(end_corner),
        tracker.image_point(last),
        width,
    ));
    Polyline::from_points(points, false)
}

/// Build one of the named facial curves, or nothing if the face is not usable.
pub fn facial_curve<T: Tracker + ?Sized>(tracker: &T, curve: FacialCurve, width: f32) -> Polyline {
    if !tracker.found() || curve.max_index() >= tracker.landmark_count() {
        return Polyline::new();
    }
    shrunk_curve(
        tracker,
        curve.start_corner(),
        curve.interior(),
        curve.end_corner(),
        width,
    )
}

/// A feature group passed through unchanged.
pub fn feature_curve<T: Tracker + ?Sized>(tracker: &T, feature: Feature) -> Polyline {
    tracker.image_feature(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::TrackerSnapshot;
    use crate::types::Shape;

    fn face() -> TrackerSnapshot {
        let points = (0..68)
            .map(|i| Point::new(i as f32 * 2.0, 100.0 - i as f32))
            .collect();
        TrackerSnapshot::new(Shape::new(points), 1.0)
    }

    #[test]
    fn zero_width_keeps_corner() {
        let face = face();
        let lip = facial_curve(&face, FacialCurve::LowerLip, 0.0);
        assert_eq!(lip.points[0], face.image_point(48));
        assert_eq!(*lip.points.last().unwrap(), face.image_point(54));
    }

    #[test]
    fn full_width_lands_on_first_lip_point() {
        let face = face();
        let lip = facial_curve(&face, FacialCurve::LowerLip, 1.0);
        assert_eq!(lip.points[0], face.image_point(59));
        assert_eq!(lip.points[1], face.image_point(59));
        assert_eq!(*lip.points.last().unwrap(), face.image_point(55));
    }

    #[test]
    fn partial_width_interpolates() {
        let corner = Point::new(0.0, 0.0);
        let neighbor = Point::new(10.0, 20.0);
        let p = shrink_endpoint(corner, neighbor, 0.7);
        assert!((p.x - 7.0).abs() < 1e-5);
        assert!((p.y - 14.0).abs() < 1e-5);
    }

    #[test]
    fn curve_layout() {
        let face = face();
        let nose = facial_curve(&face, FacialCurve::Nose, 0.06);
        assert_eq!(nose.len(), 7);
        assert!(!nose.closed);
        assert_eq!(nose.points[1], face.image_point(31));
        assert_eq!(nose.points[5], face.image_point(35));

        let expected = face.image_point(4).lerp(face.image_point(31), 0.06);
        assert_eq!(nose.points[0], expected);

        assert_eq!(facial_curve(&face, FacialCurve::InnerUpperLip, 0.7).len(), 5);
        assert_eq!(facial_curve(&face, FacialCurve::InnerLowerLip, 0.7).len(), 5);
        assert_eq!(facial_curve(&face, FacialCurve::UpperLip, 0.7).len(), 7);
    }

    #[test]
    fn nostril_width_near_one_ends_by_the_nostril() {
        let face = face();
        let nose = facial_curve(&face, FacialCurve::Nose, 0.94);
        let (left, right) = (nose.points[0], nose.points[6]);

        let left_reach = face.image_point(31).distance(&face.image_point(4));
        assert!((left.distance(&face.image_point(31)) - 0.06 * left_reach).abs() < 1e-3);
        let right_reach = face.image_point(35).distance(&face.image_point(12));
        assert!((right.distance(&face.image_point(35)) - 0.06 * right_reach).abs() < 1e-3);
    }

    #[test]
    fn empty_interior_yields_empty_curve() {
        let face = face();
        assert!(shrunk_curve(&face, 48, &[], 54, 0.5).is_empty());
    }

    #[test]
    fn unusable_face_yields_empty_curve() {
        let mut face = face();
        face.found = false;
        assert!(facial_curve(&face, FacialCurve::UpperLip, 0.7).is_empty());

        let partial = TrackerSnapshot::new(Shape::new(face.shape.points[..50].to_vec()), 1.0);
        assert!(facial_curve(&partial, FacialCurve::LowerLip, 0.7).is_empty());
        assert!(!facial_curve(&partial, FacialCurve::Nose, 0.06).is_empty());
    }

    #[test]
    fn feature_passthrough_is_unchanged() {
        let face = face();
        let jaw = feature_curve(&face, Feature::Jaw);
        assert_eq!(jaw.points, face.shape.points[0..=16].to_vec());
    }
}

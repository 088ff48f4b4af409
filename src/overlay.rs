//! Per-frame assembly of face strokes.

use std::time::Instant;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::builder::{facial_curve, feature_curve, FacialCurve, ShrinkFactor};
use crate::config::OverlayConfig;
use crate::curve::{Mesh, Polyline};
use crate::hysteresis::Hysteresis;
use crate::landmarks::{Feature, Gesture, LEFT_EYE_LID, RIGHT_EYE_LID};
use crate::splitter::{build_circle, divide};
use crate::tracker::Tracker;
use crate::types::Point;

/// What a stroke depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeKind {
    NoseBridge,
    LeftIris,
    RightIris,
    LowerLip,
    InnerUpperLip,
    Nose,
    UpperLip,
    InnerLowerLip,
    LeftEyeTop,
    RightEyeTop,
    LeftEyebrow,
    RightEyebrow,
    Jaw,
}

/// Receives the strokes of one frame. Implemented by output devices.
pub trait CurveSink {
    fn add_polyline(&mut self, kind: StrokeKind, polyline: Polyline);

    fn add_segments(&mut self, kind: StrokeKind, mesh: Mesh);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StrokeShape {
    Polyline(Polyline),
    Segments(Mesh),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub kind: StrokeKind,
    pub shape: StrokeShape,
}

impl Stroke {
    /// The stroke as one connected path. Segment lists are walked in order with
    /// repeated vertices collapsed.
    pub fn to_polyline(&self) -> Polyline {
        match &self.shape {
            StrokeShape::Polyline(poly) => poly.clone(),
            StrokeShape::Segments(mesh) => mesh.to_polyline(),
        }
    }

    pub fn point_count(&self) -> usize {
        match &self.shape {
            StrokeShape::Polyline(poly) => poly.len(),
            StrokeShape::Segments(mesh) => mesh.len() * 2,
        }
    }
}

/// In-memory stroke list for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveCollection {
    pub strokes: Vec<Stroke>,
}

impl CurveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn kinds(&self) -> Vec<StrokeKind> {
        self.strokes.iter().map(|s| s.kind).collect()
    }

    pub fn get(&self, kind: StrokeKind) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.kind == kind)
    }

    /// A copy with every point multiplied by `scale`, e.g. `1 / frame height`.
    pub fn normalized(&self, scale: f32) -> CurveCollection {
        let strokes = self
            .strokes
            .iter()
            .map(|s| Stroke {
                kind: s.kind,
                shape: match &s.shape {
                    StrokeShape::Polyline(poly) => StrokeShape::Polyline(poly.scaled(scale)),
                    StrokeShape::Segments(mesh) => StrokeShape::Segments(mesh.scaled(scale)),
                },
            })
            .collect();
        CurveCollection { strokes }
    }
}

impl CurveSink for CurveCollection {
    fn add_polyline(&mut self, kind: StrokeKind, polyline: Polyline) {
        self.strokes.push(Stroke {
            kind,
            shape: StrokeShape::Polyline(polyline),
        });
    }

    fn add_segments(&mut self, kind: StrokeKind, mesh: Mesh) {
        self.strokes.push(Stroke {
            kind,
            shape: StrokeShape::Segments(mesh),
        });
    }
}

/// Builds the stroke set for a tracked face and debounces the gated strokes.
#[derive(Debug, Clone)]
pub struct FaceOverlay {
    pub config: OverlayConfig,
    /// Normalization hint handed to output consumers; never applied here.
    pub scale: f32,
    nose_gate: Hysteresis,
    mouth_gate: Hysteresis,
}

impl FaceOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        let delay = config.gate_delay();
        Self {
            scale: config.scale,
            config,
            nose_gate: Hysteresis::new(delay),
            mouth_gate: Hysteresis::new(delay),
        }
    }

    pub fn nose_visible(&self) -> bool {
        self.nose_gate.state()
    }

    pub fn mouth_open(&self) -> bool {
        self.mouth_gate.state()
    }

    /// Assemble a fresh collection for this frame.
    pub fn render_frame<T: Tracker + ?Sized>(&mut self, tracker: &T) -> CurveCollection {
        let mut frame = CurveCollection::new();
        self.draw(tracker, &mut frame);
        frame
    }

    pub fn draw<T, S>(&mut self, tracker: &T, sink: &mut S)
    where
        T: Tracker + ?Sized,
        S: CurveSink + ?Sized,
    {
        self.draw_at(tracker, sink, Instant::now());
    }

    /// Emit every stroke for `tracker` into `sink`, timing the gates with `now`.
    ///
    /// Nothing is emitted, and the gates are left untouched, when no face is found.
    pub fn draw_at<T, S>(&mut self, tracker: &T, sink: &mut S, now: Instant)
    where
        T: Tracker + ?Sized,
        S: CurveSink + ?Sized,
    {
        if !tracker.found() {
            trace!("no face, skipping overlay");
            return;
        }

        let turned = tracker.orientation().yaw.abs() > self.config.nose_angle_radians();
        if gate(&mut self.nose_gate, turned, now, "nose") {
            add_curve(sink, StrokeKind::NoseBridge, feature_curve(tracker, Feature::NoseBridge));
        }

        let (left_iris, right_iris) = self.irises(tracker);
        add_mesh(sink, StrokeKind::LeftIris, left_iris);
        add_mesh(sink, StrokeKind::RightIris, right_iris);

        for (kind, curve) in [
            (StrokeKind::LowerLip, FacialCurve::LowerLip),
            (StrokeKind::InnerUpperLip, FacialCurve::InnerUpperLip),
            (StrokeKind::Nose, FacialCurve::Nose),
            (StrokeKind::UpperLip, FacialCurve::UpperLip),
        ] {
            add_curve(sink, kind, self.facial(tracker, curve));
        }

        let open = tracker.gesture(Gesture::MouthHeight) > self.config.mouth_open_threshold;
        if gate(&mut self.mouth_gate, open, now, "mouth") {
            add_curve(
                sink,
                StrokeKind::InnerLowerLip,
                self.facial(tracker, FacialCurve::InnerLowerLip),
            );
        }

        for (kind, feature) in [
            (StrokeKind::LeftEyeTop, Feature::LeftEyeTop),
            (StrokeKind::RightEyeTop, Feature::RightEyeTop),
            (StrokeKind::LeftEyebrow, Feature::LeftEyebrow),
            (StrokeKind::RightEyebrow, Feature::RightEyebrow),
            (StrokeKind::Jaw, Feature::Jaw),
        ] {
            add_curve(sink, kind, feature_curve(tracker, feature));
        }
    }

    fn facial<T: Tracker + ?Sized>(&self, tracker: &T, curve: FacialCurve) -> Polyline {
        let width = match curve.shrink_factor() {
            ShrinkFactor::Lip => self.config.lip_width,
            ShrinkFactor::Nostril => self.config.nostril_width,
        };
        facial_curve(tracker, curve, width)
    }

    /// The visible lower arcs of both irises.
    fn irises<T: Tracker + ?Sized>(&self, tracker: &T) -> (Mesh, Mesh) {
        let needed = LEFT_EYE_LID.iter().chain(&RIGHT_EYE_LID).max().copied().unwrap_or(0);
        if needed >= tracker.landmark_count() {
            return (Mesh::new(), Mesh::new());
        }
        let radius = tracker.scale() * self.config.eye_radius_scale * self.config.iris_size;
        // A collapsed circle would park the beam on one spot
        if !radius.is_finite() || radius <= 0.0 {
            trace!("iris radius {} is degenerate, skipping irises", radius);
            return (Mesh::new(), Mesh::new());
        }
        (
            self.iris(tracker, &LEFT_EYE_LID, radius),
            self.iris(tracker, &RIGHT_EYE_LID, radius),
        )
    }

    fn iris<T: Tracker + ?Sized>(&self, tracker: &T, lid: &[usize; 4], radius: f32) -> Mesh {
        let (lid_left, lid_right) = lid_chord(tracker, lid, self.config.lid_height);
        let circle = build_circle(
            lid_left.midpoint(lid_right),
            radius,
            self.config.circle_resolution,
        );
        divide(&circle, lid_left, lid_right).below
    }
}

impl Default for FaceOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

/// Chord across the eye, partway between each corner and its upper-lid neighbour.
pub fn lid_chord<T: Tracker + ?Sized>(tracker: &T, lid: &[usize; 4], lid_height: f32) -> (Point, Point) {
    let [outer, outer_lid, inner_lid, inner] = *lid;
    let left = tracker
        .image_point(outer)
        .lerp(tracker.image_point(outer_lid), lid_height);
    let right = tracker
        .image_point(inner_lid)
        .lerp(tracker.image_point(inner), lid_height);
    (left, right)
}

fn gate(gate: &mut Hysteresis, condition: bool, now: Instant, name: &str) -> bool {
    let before = gate.state();
    let after = gate.set_at(condition, now);
    if before != after {
        debug!("{} gate switched {}", name, if after { "on" } else { "off" });
    }
    after
}

fn add_curve<S: CurveSink + ?Sized>(sink: &mut S, kind: StrokeKind, polyline: Polyline) {
    if polyline.is_empty() {
        return;
    }
    sink.add_polyline(kind, polyline);
}

fn add_mesh<S: CurveSink + ?Sized>(sink: &mut S, kind: StrokeKind, mesh: Mesh) {
    if mesh.is_empty() {
        return;
    }
    sink.add_segments(kind, mesh);
}

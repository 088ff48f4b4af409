//! The tracker boundary: what the overlay reads about a face each frame.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::Polyline;
use crate::error::Result;
use crate::landmarks::{Feature, Gesture, Orientation};
use crate::types::{Point, Shape};

/// Read-only view of a tracked face.
///
/// `image_point` is only defined for indices below `landmark_count`; asking for
/// anything else is a caller bug.
pub trait Tracker {
    fn found(&self) -> bool;

    fn landmark_count(&self) -> usize;

    fn image_point(&self, index: usize) -> Point;

    fn orientation(&self) -> Orientation;

    fn gesture(&self, gesture: Gesture) -> f32;

    /// Pixels per unit of face size.
    fn scale(&self) -> f32;

    /// The feature's landmarks as a polyline, or an empty polyline when the face
    /// is lost or the scheme does not cover the feature.
    fn image_feature(&self, feature: Feature) -> Polyline {
        let indices = feature.indices();
        if !self.found() || *indices.end() >= self.landmark_count() {
            return Polyline::new();
        }
        Polyline::from_points(
            indices.map(|i| self.image_point(i)).collect(),
            feature.is_closed(),
        )
    }
}

/// An owned, serializable tracker result for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub found: bool,
    pub shape: Shape,
    #[serde(default)]
    pub orientation: Orientation,
    pub scale: f32,
    /// Tracker-reported gesture values. Missing entries are measured from the shape.
    #[serde(default)]
    pub gestures: BTreeMap<Gesture, f32>,
    /// Capture time relative to the start of a recording.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl TrackerSnapshot {
    pub fn new(shape: Shape, scale: f32) -> Self {
        Self {
            found: true,
            shape,
            orientation: Orientation::default(),
            scale,
            gestures: BTreeMap::new(),
            timestamp_ms: 0,
        }
    }

    /// A snapshot for a frame in which no face was found.
    pub fn lost() -> Self {
        Self::default()
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_gesture(mut self, gesture: Gesture, value: f32) -> Self {
        self.gestures.insert(gesture, value);
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Distance between the gesture's landmark pair, in face units.
    ///
    /// Returns 0 when the landmarks are missing or the scale is degenerate.
    pub fn measure_gesture(&self, gesture: Gesture) -> f32 {
        let (a, b) = gesture.landmark_pair();
        match (self.shape.get(a), self.shape.get(b)) {
            (Some(pa), Some(pb)) if self.scale > 0.0 => pa.distance(&pb) / self.scale,
            _ => 0.0,
        }
    }
}

impl Tracker for TrackerSnapshot {
    fn found(&self) -> bool {
        self.found
    }

    fn landmark_count(&self) -> usize {
        self.shape.num_landmarks()
    }

    fn image_point(&self, index: usize) -> Point {
        self.shape[index]
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn gesture(&self, gesture: Gesture) -> f32 {
        self.gestures
            .get(&gesture)
            .copied()
            .unwrap_or_else(|| self.measure_gesture(gesture))
    }

    fn scale(&self) -> f32 {
        self.scale
    }
}

/// A timestamped sequence of tracker snapshots.
///
/// Files ending in `.bin` use bincode; anything else is JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<TrackerSnapshot>,
}

impl Recording {
    pub fn new(frames: Vec<TrackerSnapshot>) -> Self {
        Self { frames }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        if is_binary(path) {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            Ok(bincode::deserialize(&bytes)?)
        } else {
            Ok(serde_json::from_reader(reader)?)
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        if is_binary(path) {
            let bytes = bincode::serialize(self)?;
            writer.write_all(&bytes)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_shape() -> Shape {
        Shape::new(
            (0..68)
                .map(|i| Point::new((i % 10) as f32 * 10.0, (i / 10) as f32 * 10.0))
                .collect(),
        )
    }

    #[test]
    fn feature_lookup_respects_closed_flag() {
        let snapshot = TrackerSnapshot::new(grid_shape(), 1.0);

        let eye = snapshot.image_feature(Feature::LeftEye);
        assert_eq!(eye.len(), 6);
        assert!(eye.closed);
        assert_eq!(eye.points[0], snapshot.image_point(36));

        let brow = snapshot.image_feature(Feature::RightEyebrow);
        assert_eq!(brow.len(), 5);
        assert!(!brow.closed);
    }

    #[test]
    fn lost_face_has_empty_features() {
        let mut snapshot = TrackerSnapshot::new(grid_shape(), 1.0);
        snapshot.found = false;
        assert!(snapshot.image_feature(Feature::Jaw).is_empty());
        assert!(TrackerSnapshot::lost().image_feature(Feature::Jaw).is_empty());
    }

    #[test]
    fn short_shape_has_empty_features() {
        let shape = Shape::new(grid_shape().points[..30].to_vec());
        let snapshot = TrackerSnapshot::new(shape, 1.0);
        assert_eq!(snapshot.image_feature(Feature::Jaw).len(), 17);
        assert!(snapshot.image_feature(Feature::InnerMouth).is_empty());
    }

    #[test]
    fn reported_gesture_overrides_measurement() {
        let mut shape = grid_shape();
        shape.points[62] = Point::new(0.0, 0.0);
        shape.points[66] = Point::new(0.0, 12.0);
        let snapshot = TrackerSnapshot::new(shape, 4.0);

        assert!((snapshot.gesture(Gesture::MouthHeight) - 3.0).abs() < 1e-6);

        let reported = snapshot.with_gesture(Gesture::MouthHeight, 0.5);
        assert_eq!(reported.gesture(Gesture::MouthHeight), 0.5);
    }

    #[test]
    fn zero_scale_measures_nothing() {
        let snapshot = TrackerSnapshot::new(grid_shape(), 0.0);
        assert_eq!(snapshot.gesture(Gesture::MouthWidth), 0.0);
    }

    #[test]
    fn recording_survives_json_and_bincode() {
        let dir = std::env::temp_dir();
        let recording = Recording::new(vec![
            TrackerSnapshot::new(grid_shape(), 2.0)
                .with_gesture(Gesture::MouthHeight, 1.5)
                .with_timestamp(16),
            TrackerSnapshot::lost().with_timestamp(33),
        ]);

        for name in ["face_strokes_recording.json", "face_strokes_recording.bin"] {
            let path = dir.join(name);
            recording.save(&path).unwrap();
            let loaded = Recording::load(&path).unwrap();
            assert_eq!(loaded, recording);
            let _ = std::fs::remove_file(&path);
        }
    }
}

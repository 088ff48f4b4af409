//! # face-strokes
//!
//! Turns tracked facial landmarks into vector strokes for laser (galvo) and
//! plotter output.
//!
//! This crate provides:
//! - **Curve building**: 68-point landmark groups and lip/nose curves whose ends
//!   are pulled in from shared corners
//! - **Iris occlusion**: circle polylines split against the eyelid chord, keeping
//!   only the visible lower arc
//! - **Debouncing**: hysteresis gates so near-threshold gestures don't flicker
//! - **Frame plumbing**: luma extraction from packed camera frames and a
//!   per-frame pipeline around an external landmark tracker
//!
//! ## Algorithm Overview
//!
//! Each frame, for a tracked face:
//! 1. Gate the nose bridge on head yaw
//! 2. Split an iris circle per eye along the lid chord, emit the lower half
//! 3. Emit the lip and nose curves
//! 4. Gate the inner lower lip on mouth height
//! 5. Emit the eye tops, eyebrows, and jaw unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use face_strokes::{FaceOverlay, Point, Shape, TrackerSnapshot};
//!
//! let points = (0..68)
//!     .map(|i| Point::new((i % 12) as f32 * 8.0, (i / 12) as f32 * 8.0))
//!     .collect();
//! let snapshot = TrackerSnapshot::new(Shape::new(points), 4.0);
//!
//! let mut overlay = FaceOverlay::default();
//! let frame = overlay.render_frame(&snapshot);
//! println!("{} strokes", frame.len());
//! ```
//!
//! ## Custom Output Devices
//!
//! Implement [`CurveSink`] to stream strokes straight to a device:
//!
//! ```rust
//! use face_strokes::{CurveSink, Mesh, Polyline, StrokeKind};
//!
//! struct PointCounter(usize);
//!
//! impl CurveSink for PointCounter {
//!     fn add_polyline(&mut self, _kind: StrokeKind, polyline: Polyline) {
//!         self.0 += polyline.len();
//!     }
//!     fn add_segments(&mut self, _kind: StrokeKind, mesh: Mesh) {
//!         self.0 += mesh.len() * 2;
//!     }
//! }
//! ```

pub mod builder;
mod config;
mod curve;
mod error;
mod hysteresis;
pub mod landmarks;
mod luma;
mod overlay;
mod pipeline;
pub mod splitter;
mod tracker;
mod types;

pub use builder::{facial_curve, feature_curve, shrink_endpoint, shrunk_curve, FacialCurve};
pub use config::OverlayConfig;
pub use curve::{Mesh, Polyline};
pub use error::{Error, Result};
pub use hysteresis::{Hysteresis, DEFAULT_GATE_DELAY};
pub use landmarks::{Feature, Gesture, Orientation};
pub use luma::{GrayImage, LumaExtractor};
pub use overlay::{lid_chord, CurveCollection, CurveSink, FaceOverlay, Stroke, StrokeKind, StrokeShape};
pub use pipeline::{FramePipeline, LandmarkTracker};
pub use splitter::{build_circle, determinant, divide, Split};
pub use tracker::{Recording, Tracker, TrackerSnapshot};
pub use types::{Point, Shape};

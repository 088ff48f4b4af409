//! One capture-to-strokes pass per camera frame.

use std::time::Instant;

use log::{debug, trace};

use crate::config::OverlayConfig;
use crate::error::Result;
use crate::luma::{GrayImage, LumaExtractor};
use crate::overlay::{CurveCollection, FaceOverlay};
use crate::tracker::{Tracker, TrackerSnapshot};

/// Fits landmarks to a grayscale frame.
pub trait LandmarkTracker {
    fn update(&mut self, image: &GrayImage) -> Result<TrackerSnapshot>;
}

/// Owns the per-frame buffers: the grayscale image, the overlay gates, and the
/// stroke collection handed to the output device.
pub struct FramePipeline {
    extractor: LumaExtractor,
    gray: GrayImage,
    overlay: FaceOverlay,
    output: CurveCollection,
}

impl FramePipeline {
    /// Pipeline for packed frames of `width x height`. The overlay scale becomes
    /// `1 / height`, matching the square crop.
    pub fn new(width: u32, height: u32, config: OverlayConfig) -> Result<Self> {
        config.validate()?;
        let extractor = LumaExtractor::new(width, height)?;
        let mut overlay = FaceOverlay::new(config);
        if height > 0 {
            overlay.scale = 1.0 / height as f32;
        }
        Ok(Self {
            gray: GrayImage::zeros(extractor.output_size(), extractor.output_size()),
            extractor,
            overlay,
            output: CurveCollection::new(),
        })
    }

    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn overlay(&self) -> &FaceOverlay {
        &self.overlay
    }

    /// The strokes of the last frame that produced output.
    pub fn output(&self) -> &CurveCollection {
        &self.output
    }

    pub fn process_frame<T: LandmarkTracker + ?Sized>(
        &mut self,
        packed: &[u8],
        tracker: &mut T,
        output_ready: bool,
    ) -> Result<Option<&CurveCollection>> {
        self.process_frame_at(packed, tracker, output_ready, Instant::now())
    }

    /// Extract, track, and assemble one frame.
    ///
    /// Returns `None` and leaves the previous output in place when the face is
    /// lost or the output device is not ready.
    pub fn process_frame_at<T: LandmarkTracker + ?Sized>(
        &mut self,
        packed: &[u8],
        tracker: &mut T,
        output_ready: bool,
        now: Instant,
    ) -> Result<Option<&CurveCollection>> {
        self.extractor.extract(packed, &mut self.gray)?;
        let snapshot = tracker.update(&self.gray)?;

        if !output_ready || !snapshot.found() {
            debug!(
                "skipping overlay (output ready: {}, face found: {})",
                output_ready,
                snapshot.found()
            );
            return Ok(None);
        }

        self.output.clear();
        self.overlay.draw_at(&snapshot, &mut self.output, now);
        trace!("frame assembled with {} strokes", self.output.len());
        Ok(Some(&self.output))
    }
}

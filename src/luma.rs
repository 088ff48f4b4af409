//! Grayscale extraction from packed luma/chroma camera frames.
//!
//! Packed frames (YUYV / YUY2 and similar) store two bytes per pixel, with the
//! luma byte first. The extractor keeps the luma of a centered square window,
//! which is what the tracker consumes.

use crate::error::{Error, Result};

/// A single-channel 8-bit image buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn zeros(width: u32, height: u32) -> Self {
        Self::new(vec![0; (width * height) as usize], width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

const BYTES_PER_PIXEL: usize = 2;

/// Center-crops packed frames of a fixed size to square grayscale images.
///
/// The crop window is computed once at construction. When `width - height` is
/// odd the extra column is dropped on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumaExtractor {
    width: u32,
    height: u32,
    row_stride: usize,
    crop_start: usize,
}

impl LumaExtractor {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width < height {
            return Err(Error::InvalidGeometry { width, height });
        }
        let left_skip = ((width - height) / 2) as usize;
        Ok(Self {
            width,
            height,
            row_stride: width as usize * BYTES_PER_PIXEL,
            crop_start: left_skip * BYTES_PER_PIXEL,
        })
    }

    /// Side length of the square output.
    pub fn output_size(&self) -> u32 {
        self.height
    }

    /// Bytes a packed input frame must hold.
    pub fn input_len(&self) -> usize {
        self.row_stride * self.height as usize
    }

    /// Fill `dst` with the cropped luma of `src`, resizing it if needed.
    pub fn extract(&self, src: &[u8], dst: &mut GrayImage) -> Result<()> {
        if src.len() < self.input_len() {
            return Err(Error::InvalidFrame {
                width: self.width,
                height: self.height,
                expected: self.input_len(),
                actual: src.len(),
            });
        }

        let side = self.height as usize;
        if dst.width != self.height || dst.height != self.height {
            *dst = GrayImage::zeros(self.height, self.height);
        }
        if side == 0 {
            return Ok(());
        }

        let crop_len = side * BYTES_PER_PIXEL;
        for (row, out) in src
            .chunks_exact(self.row_stride)
            .zip(dst.data.chunks_exact_mut(side))
        {
            let window = &row[self.crop_start..self.crop_start + crop_len];
            for (pixel, luma) in out.iter_mut().zip(window.iter().step_by(BYTES_PER_PIXEL)) {
                *pixel = *luma;
            }
        }
        Ok(())
    }

    pub fn extract_new(&self, src: &[u8]) -> Result<GrayImage> {
        let mut dst = GrayImage::zeros(self.height, self.height);
        self.extract(src, &mut dst)?;
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_image_dimensions() {
        // 3x2, row-major
        let img = GrayImage::new(vec![0, 255, 0, 255, 0, 255], 3, 2);
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.as_raw()[3], 255);
        assert_eq!(GrayImage::zeros(4, 4).into_raw(), vec![0; 16]);
    }

    #[test]
    fn extracts_centered_luma() {
        // 8x4 frame, byte k holds k: luma at even offsets, chroma at odd.
        let src: Vec<u8> = (0..64).collect();
        let extractor = LumaExtractor::new(8, 4).unwrap();
        let gray = extractor.extract_new(&src).unwrap();

        #[rustfmt::skip]
        let expected = vec![
            4, 6, 8, 10,
            20, 22, 24, 26,
            36, 38, 40, 42,
            52, 54, 56, 58,
        ];
        assert_eq!(gray.as_raw(), expected.as_slice());
        assert_eq!(gray.width(), 4);
        assert_eq!(gray.height(), 4);
    }

    #[test]
    fn square_frame_keeps_every_luma_byte() {
        let src: Vec<u8> = (0..18).map(|i| if i % 2 == 0 { i * 10 } else { 255 }).collect();
        let gray = LumaExtractor::new(3, 3).unwrap().extract_new(&src).unwrap();
        assert_eq!(gray.into_raw(), vec![0, 20, 40, 60, 80, 100, 120, 140, 160]);
    }

    #[test]
    fn odd_margin_drops_extra_column_on_right() {
        // 5x4: one column dropped, on the right
        let src: Vec<u8> = (0..40).collect();
        let gray = LumaExtractor::new(5, 4).unwrap().extract_new(&src).unwrap();
        assert_eq!(&gray.as_raw()[..4], &[0, 2, 4, 6]);
        assert_eq!(&gray.as_raw()[4..8], &[10, 12, 14, 16]);
    }

    #[test]
    fn reuses_destination_buffer() {
        let extractor = LumaExtractor::new(8, 4).unwrap();
        let mut dst = GrayImage::zeros(1, 1);
        extractor.extract(&[7u8; 64], &mut dst).unwrap();
        assert_eq!(dst.width(), 4);
        assert!(dst.as_raw().iter().all(|&p| p == 7));
    }

    #[test]
    fn rejects_bad_geometry_and_short_frames() {
        assert!(matches!(
            LumaExtractor::new(4, 8),
            Err(Error::InvalidGeometry { width: 4, height: 8 })
        ));

        let extractor = LumaExtractor::new(8, 4).unwrap();
        let err = extractor.extract_new(&[0u8; 63]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFrame {
                expected: 64,
                actual: 63,
                ..
            }
        ));
    }
}

//! Borrowed and owned RGB pixel buffers.
//!
//! The stitching core never decodes or encodes images; callers hand in raw
//! row-major `width * height * 3` byte buffers and get one back.

/// Borrowed view over an interleaved RGB buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    /// Row-major RGB, len = width * height * 3.
    pub data: &'a [u8],
}

/// Owned interleaved RGB buffer, used for the output canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Zero-initialized (black) canvas.
    pub fn black(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 3],
        }
    }

    pub fn as_view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl<'a> RgbImageView<'a> {
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Pixel at `(x, y)`; caller guarantees the coordinates are in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let off = (y * self.width + x) * 3;
        [self.data[off], self.data[off + 1], self.data[off + 2]]
    }
}

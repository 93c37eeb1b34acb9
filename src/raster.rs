//! In-memory RGBA pixel buffers.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Bytes per interleaved RGBA pixel.
pub const CHANNELS: usize = 4;

/// A `width x height` grid of interleaved RGBA bytes, row-major, no padding.
///
/// The buffer length is checked at construction and cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Buffer length for the given dimensions, or `None` on overflow.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(CHANNELS)
}

impl RasterImage {
    /// Wrap an RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] if either dimension is zero and
    /// [`Error::InvalidBuffer`] if `pixels.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        match buffer_len(width, height) {
            Some(expected) if expected == pixels.len() => Ok(Self {
                width,
                height,
                pixels,
            }),
            expected => Err(Error::InvalidBuffer {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: pixels.len(),
            }),
        }
    }

    /// Create an image where every pixel is `rgba`.
    ///
    /// # Errors
    ///
    /// Same as [`RasterImage::new`].
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        let len = buffer_len(width, height).ok_or(Error::InvalidBuffer {
            width,
            height,
            expected: usize::MAX,
            actual: 0,
        })?;
        let pixels = rgba.iter().copied().cycle().take(len).collect();
        Self::new(width, height, pixels)
    }

    /// Take ownership of an `image` crate RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-sized image.
    pub fn from_rgba(img: RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Copy into an `image` crate RGBA buffer for encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if the buffer cannot back an image of
    /// these dimensions.
    pub fn to_rgba(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            Error::InvalidBuffer {
                width: self.width,
                height: self.height,
                expected: buffer_len(self.width, self.height).unwrap_or(usize::MAX),
                actual: self.pixels.len(),
            },
        )
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw interleaved RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return its RGBA bytes.
    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x},{y}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// The RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Overwrite the RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Bytes per row.
    pub(crate) fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Build from a buffer already known to match the dimensions.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(buffer_len(width, height), Some(pixels.len()));
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Map `[0, 1]` to a byte, rounding to nearest.
pub(crate) fn unit_to_byte(value: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

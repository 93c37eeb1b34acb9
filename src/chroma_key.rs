//! Single-image chroma keying with a linear falloff band.
//!
//! A pixel closer than `T` to the background becomes fully transparent, a
//! pixel farther than `2T` stays fully opaque, and the band in between ramps
//! linearly so edges stay anti-aliased. RGB is never touched, so background
//! color can bleed into semi-transparent edge pixels.

use crate::color::{BackgroundSpec, Color};
use crate::error::{Error, Result};
use crate::raster::{unit_to_byte, RasterImage, CHANNELS};

/// Tolerance used when the caller does not pick one.
pub const DEFAULT_TOLERANCE: i32 = 30;

/// The `[T, 2T]` distance band over which alpha ramps from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceBand {
    inner: u8,
}

impl ToleranceBand {
    /// Validate a tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTolerance`] if `tolerance` is outside `[0, 255]`.
    pub fn new(tolerance: i32) -> Result<Self> {
        u8::try_from(tolerance)
            .map(|inner| Self { inner })
            .map_err(|_| Error::InvalidTolerance(tolerance))
    }

    /// Distance at or below which a pixel is background.
    #[must_use]
    pub fn inner(self) -> u8 {
        self.inner
    }

    /// Distance above which a pixel is foreground (`2 * inner`).
    #[must_use]
    pub fn outer(self) -> u16 {
        u16::from(self.inner) * 2
    }

    /// Alpha in `[0, 1]` for a squared distance from the background.
    #[must_use]
    pub fn alpha_for(self, dist_sq: u32) -> f64 {
        let inner = u32::from(self.inner);
        let outer = u32::from(self.outer());
        if dist_sq <= inner * inner {
            0.0
        } else if dist_sq <= outer * outer {
            // Unreachable for inner == 0, so the division is safe.
            let t = f64::from(inner);
            (f64::from(dist_sq).sqrt() - t) / t
        } else {
            1.0
        }
    }
}

impl Default for ToleranceBand {
    fn default() -> Self {
        Self { inner: 30 }
    }
}

/// Derive alpha from similarity to a background color.
///
/// The tolerance is validated before `background` is resolved, and both
/// happen before any pixel is read. The result is a new image with the input
/// RGB and a recomputed alpha plane.
///
/// # Errors
///
/// Returns [`Error::InvalidTolerance`] if `tolerance` is outside `[0, 255]`.
pub fn chroma_key(
    image: &RasterImage,
    background: &BackgroundSpec,
    tolerance: i32,
) -> Result<RasterImage> {
    let band = ToleranceBand::new(tolerance)?;
    let color = background.resolve(image);
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        %background,
        %color,
        tolerance,
        "chroma keying"
    );
    Ok(chroma_key_with(image, color, band))
}

/// [`chroma_key`] with an already resolved background and validated band.
#[must_use]
pub fn chroma_key_with(image: &RasterImage, background: Color, band: ToleranceBand) -> RasterImage {
    let mut out = image.pixels().to_vec();

    #[cfg(feature = "parallel")]
    key_rows_parallel(&mut out, image.stride(), background, band);

    #[cfg(not(feature = "parallel"))]
    key_rows(&mut out, image.stride(), background, band);

    RasterImage::from_parts(image.width(), image.height(), out)
}

#[cfg(any(test, not(feature = "parallel")))]
fn key_rows(out: &mut [u8], stride: usize, background: Color, band: ToleranceBand) {
    out.chunks_exact_mut(stride)
        .for_each(|row| key_row(row, background, band));
}

#[cfg(feature = "parallel")]
fn key_rows_parallel(out: &mut [u8], stride: usize, background: Color, band: ToleranceBand) {
    use rayon::prelude::*;
    out.par_chunks_exact_mut(stride)
        .for_each(|row| key_row(row, background, band));
}

fn key_row(row: &mut [u8], background: Color, band: ToleranceBand) {
    for px in row.chunks_exact_mut(CHANNELS) {
        let dist_sq = background.distance_sq([px[0], px[1], px[2]]);
        px[3] = unit_to_byte(band.alpha_for(dist_sq));
    }
}

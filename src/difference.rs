//! Two-pass difference matting.
//!
//! The same foreground is rendered once over pure white and once over pure
//! black. A fully opaque pixel looks identical in both passes; a fully
//! transparent one shows the full white-to-black swing. Alpha follows from
//! how far apart the two samples are:
//!
//! `alpha = clamp(1 - |W - B| / |white - black|, 0, 1)`
//!
//! Since black contributes nothing to the composite, the black pass is
//! `alpha * foreground`, so un-premultiplying it gives the foreground color.

use crate::error::{Error, Result};
use crate::raster::{unit_to_byte, RasterImage, CHANNELS};

/// Distance between pure white and pure black, `sqrt(3 * 255^2)`.
const BG_DISTANCE: f64 = 441.672_955_930_063_7;

/// Below this alpha the color is not recovered and is emitted as black.
const MIN_ALPHA: f64 = 0.01;

/// Recover alpha and un-premultiplied color from a white and a black pass.
///
/// Returns a new image of the same dimensions. Neither input is modified.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the passes differ in size. No
/// pixel is read in that case.
pub fn difference_matte(white: &RasterImage, black: &RasterImage) -> Result<RasterImage> {
    if white.dimensions() != black.dimensions() {
        return Err(Error::DimensionMismatch {
            white: white.dimensions(),
            black: black.dimensions(),
        });
    }

    let (width, height) = white.dimensions();
    tracing::debug!(width, height, "difference matting");

    let mut out = vec![0u8; white.pixels().len()];

    #[cfg(feature = "parallel")]
    matte_rows_parallel(white, black, &mut out);

    #[cfg(not(feature = "parallel"))]
    matte_rows(white, black, &mut out);

    Ok(RasterImage::from_parts(width, height, out))
}

#[cfg(any(test, not(feature = "parallel")))]
fn matte_rows(white: &RasterImage, black: &RasterImage, out: &mut [u8]) {
    let stride = white.stride();
    out.chunks_exact_mut(stride)
        .zip(white.pixels().chunks_exact(stride))
        .zip(black.pixels().chunks_exact(stride))
        .for_each(|((dst, w), b)| matte_row(w, b, dst));
}

#[cfg(feature = "parallel")]
fn matte_rows_parallel(white: &RasterImage, black: &RasterImage, out: &mut [u8]) {
    use rayon::prelude::*;
    let stride = white.stride();
    out.par_chunks_exact_mut(stride)
        .zip(white.pixels().par_chunks_exact(stride))
        .zip(black.pixels().par_chunks_exact(stride))
        .for_each(|((dst, w), b)| matte_row(w, b, dst));
}

fn matte_row(white: &[u8], black: &[u8], dst: &mut [u8]) {
    for ((w, b), px) in white
        .chunks_exact(CHANNELS)
        .zip(black.chunks_exact(CHANNELS))
        .zip(dst.chunks_exact_mut(CHANNELS))
    {
        px.copy_from_slice(&matte_pixel([w[0], w[1], w[2]], [b[0], b[1], b[2]]));
    }
}

/// Alpha in `[0, 1]` for one white/black sample pair.
fn pass_alpha(white: [u8; 3], black: [u8; 3]) -> f64 {
    let dist_sq: f64 = white
        .iter()
        .zip(black.iter())
        .map(|(&w, &b)| (f64::from(w) - f64::from(b)).powi(2))
        .sum();
    (1.0 - dist_sq.sqrt() / BG_DISTANCE).clamp(0.0, 1.0)
}

fn matte_pixel(white: [u8; 3], black: [u8; 3]) -> [u8; 4] {
    let alpha = pass_alpha(white, black);
    let mut px = [0, 0, 0, unit_to_byte(alpha)];
    if alpha > MIN_ALPHA {
        for (dst, &b) in px.iter_mut().zip(black.iter()) {
            // Only the upper bound is clamped.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                *dst = (f64::from(b) / alpha).min(255.0).round() as u8;
            }
        }
    }
    px
}

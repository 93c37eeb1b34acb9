//! Background color estimation from corner samples.

use crate::color::Color;
use crate::raster::RasterImage;

/// Estimate a solid background color from the four corner pixels.
///
/// Each channel is the rounded mean of the top-left, top-right, bottom-left
/// and bottom-right samples. Alpha is ignored.
#[must_use]
pub fn estimate_background_color(image: &RasterImage) -> Color {
    let (w, h) = image.dimensions();
    let corners = [
        image.pixel(0, 0),
        image.pixel(w - 1, 0),
        image.pixel(0, h - 1),
        image.pixel(w - 1, h - 1),
    ];

    let mean = |ch: usize| {
        let sum: u16 = corners.iter().map(|px| u16::from(px[ch])).sum();
        // Four samples of at most 255: (sum + 2) / 4 <= 255.
        #[allow(clippy::cast_possible_truncation)]
        {
            ((sum + 2) / 4) as u8
        }
    };

    let color = Color::new(mean(0), mean(1), mean(2));
    tracing::debug!(width = w, height = h, %color, "estimated background from corners");
    color
}

//! Scale-then-center-crop to a fixed square.
//!
//! The image is first resampled so that its smaller side equals the target
//! size, then the centered `size x size` window is cut out of the result.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

/// Dimensions after scaling so the smaller side equals `size`.
///
/// Each side is rounded to the nearest integer (ties to even) and floored
/// at 1.
#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    let scale = f64::from(size) / f64::from(width.min(height).max(1));
    let side = |v: u32| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (f64::from(v) * scale).round_ties_even() as u32;
        scaled.max(1)
    };
    (side(width), side(height))
}

/// Top-left corner of the centered `size x size` window.
#[must_use]
pub fn crop_origin(width: u32, height: u32, size: u32) -> (u32, u32) {
    (width.saturating_sub(size) / 2, height.saturating_sub(size) / 2)
}

/// Resample `img` so its smaller side is `size`, then center-crop it to
/// `size x size`.
///
/// Resampling uses a Lanczos3 filter and is skipped when the image already
/// has the scaled dimensions.
#[must_use]
pub fn square(img: &RgbaImage, size: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (new_w, new_h) = scaled_dimensions(w, h, size);

    let scaled;
    let source = if (new_w, new_h) == (w, h) {
        img
    } else {
        debug!(from_w = w, from_h = h, to_w = new_w, to_h = new_h, "resampling");
        scaled = imageops::resize(img, new_w, new_h, FilterType::Lanczos3);
        &scaled
    };

    let (left, top) = crop_origin(new_w, new_h, size);
    debug!(left, top, size, "center crop");
    imageops::crop_imm(source, left, top, size, size).to_image()
}

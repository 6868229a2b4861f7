//! Whiteness alpha mask.
//!
//! A pixel is background when all of its R, G and B channels reach the
//! threshold. Background pixels get mask value 0, everything else 255.
//! The mask may be Gaussian-blurred before it replaces the alpha channel,
//! which softens the edge between kept and removed regions.

use image::{imageops, GrayImage, Luma, RgbaImage};

/// Smallest radius that is actually blurred.
///
/// Below this the outer taps of a 3-tap Gaussian carry less than
/// `0.5 / 255` of the weight, so no mask value can change. `imageops::blur`
/// also rejects subnormal sigmas and shifts the image by one pixel once the
/// outer taps underflow to zero.
pub const MIN_BLUR_RADIUS: f32 = 0.25;

/// Build a binary mask: 0 where R, G and B are all `>= threshold`, else 255.
#[must_use]
pub fn whiteness_mask(img: &RgbaImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let px = img.get_pixel(x, y);
        if px[0] >= threshold && px[1] >= threshold && px[2] >= threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Blur the mask with a Gaussian of the given radius.
///
/// Radii below [`MIN_BLUR_RADIUS`] (including zero, negative and NaN)
/// return the mask unchanged.
#[must_use]
pub fn smooth(mask: &GrayImage, radius: f32) -> GrayImage {
    if radius.is_nan() || radius < MIN_BLUR_RADIUS {
        return mask.clone();
    }
    imageops::blur(mask, radius)
}

/// Replace the alpha channel of `img` with `mask`, keeping RGB as is.
///
/// # Panics
///
/// Panics if `mask` and `img` differ in dimensions.
pub fn apply_alpha(img: &mut RgbaImage, mask: &GrayImage) {
    assert_eq!(
        img.dimensions(),
        mask.dimensions(),
        "alpha mask must match image dimensions"
    );
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px[3] = m[0];
    }
}

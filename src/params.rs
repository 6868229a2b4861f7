//! Normalization parameters and the rules that turn raw user input into
//! a whiteness threshold and a blur radius.
//!
//! Tolerance is a fraction in `[0, 1]`: `1.0` removes only pure white,
//! `0.0` removes every pixel. Values above `1.0` are read as the older
//! `0..=255` scale and divided by 255.

use tracing::warn;

/// Default output square size in pixels.
pub const DEFAULT_SIZE: u32 = 340;

/// Default whiteness tolerance (only pure white is removed).
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Default edge smoothing (none).
pub const DEFAULT_SMOOTHING: f64 = 0.0;

/// Blur radius reached at `smoothing == 1.0`.
pub const MAX_BLUR_RADIUS: f64 = 5.0;

/// Parameters for a single normalization pass.
///
/// `tolerance` and `smoothing` are stored as given; they are normalized
/// when the threshold and blur radius are derived, so legacy and
/// out-of-range values are accepted here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Side length of the square output image.
    pub size: u32,
    /// Whiteness tolerance, `0.0..=1.0` or legacy `0..=255`.
    pub tolerance: f64,
    /// Edge smoothing factor, `0.0..=1.0`.
    pub smoothing: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl NormalizeOptions {
    /// Whiteness threshold derived from [`Self::tolerance`].
    #[must_use]
    pub fn threshold(&self) -> u8 {
        threshold(normalize_tolerance(self.tolerance))
    }

    /// Gaussian blur radius derived from [`Self::smoothing`].
    #[must_use]
    pub fn blur_radius(&self) -> f32 {
        blur_radius(normalize_smoothing(self.smoothing))
    }
}

/// Normalize a tolerance value into `[0, 1]`.
///
/// Values above `1.0` are treated as legacy `0..=255` input and divided by
/// 255. NaN becomes `0.0`.
#[must_use]
pub fn normalize_tolerance(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let tol = if raw > 1.0 { raw / 255.0 } else { raw };
    tol.clamp(0.0, 1.0)
}

/// Normalize a smoothing value into `[0, 1]`. NaN becomes `0.0`.
#[must_use]
pub fn normalize_smoothing(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

/// Whiteness threshold for a normalized tolerance: `round(255 * tolerance)`,
/// ties to even.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn threshold(tolerance: f64) -> u8 {
    (255.0 * tolerance.clamp(0.0, 1.0)).round_ties_even() as u8
}

/// Blur radius for a normalized smoothing factor.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn blur_radius(smoothing: f64) -> f32 {
    (smoothing.clamp(0.0, 1.0) * MAX_BLUR_RADIUS) as f32
}

/// Parse a raw numeric parameter, falling back to `0.0` when the text is
/// not a number.
///
/// The fallback is logged at `warn` level with the parameter `name`, since
/// a tolerance of `0.0` makes every pixel transparent.
#[must_use]
pub fn parse_lenient(name: &str, raw: &str) -> f64 {
    if let Ok(value) = raw.trim().parse::<f64>() {
        value
    } else {
        warn!(parameter = name, value = raw, "not a number, using 0.0");
        0.0
    }
}

//! Pure calculation functions for picture scales.
//!
//! All functions here are pure and testable without a session or a renderer.
//!
//! Scales follow "contents scale" semantics: a scale of `s` means `s` source
//! pixels per displayed point, so a LARGER scale renders the image SMALLER.

use crate::geometry::Size;

/// Pivot used to invert the raw pinch multiplier (`2 - raw`).
pub const PINCH_PIVOT: f64 = 2.0;

/// Lowest scale a pinch can reach: one source pixel per point.
pub const MIN_SCALE: f64 = 1.0;

/// How far past the fit scale a pinch can zoom out.
pub const ZOOM_HEADROOM: f64 = 2.0;

/// Calculate the scale at which `image` fits entirely inside `frame`.
///
/// Tries the width ratio first and keeps it when the image scaled by it
/// fits on both axes; otherwise the height ratio is the constraining one.
///
/// # Examples
/// ```
/// # use overlay_compare::geometry::Size;
/// # use overlay_compare::scale::fit_scale;
/// // Landscape in a square frame: width constrains
/// assert_eq!(fit_scale(Size::new(4000.0, 2000.0), Size::new(1000.0, 1000.0)), 4.0);
///
/// // Portrait in a square frame: height constrains
/// assert_eq!(fit_scale(Size::new(1000.0, 2000.0), Size::new(1000.0, 1000.0)), 2.0);
/// ```
pub fn fit_scale(image: Size, frame: Size) -> f64 {
    let width_scale = image.width / frame.width;
    let height_scale = image.height / frame.height;

    if image.width / width_scale <= frame.width && image.height / width_scale <= frame.height {
        width_scale
    } else {
        height_scale
    }
}

/// Convert a raw pinch multiplier into the multiplier applied to the scale.
///
/// Spreading the fingers reports values above 1, which must shrink the
/// contents scale (zoom in), so the multiplier is mirrored around 1.
/// Non-finite input means no change.
pub fn inverted_pinch_multiplier(raw: f64) -> f64 {
    if raw.is_finite() {
        PINCH_PIVOT - raw
    } else {
        1.0
    }
}

/// Highest scale a pinch can reach for a picture fitted at `original`.
pub fn max_scale(original: f64) -> f64 {
    original + ZOOM_HEADROOM
}

/// Bound `scale` to `[MIN_SCALE, original + ZOOM_HEADROOM]`.
pub fn clamp_scale(scale: f64, original: f64) -> f64 {
    scale.max(MIN_SCALE).min(max_scale(original))
}

/// Scale after one pinch update.
pub fn pinched_scale(current: f64, original: f64, raw: f64) -> f64 {
    clamp_scale(current * inverted_pinch_multiplier(raw), original)
}

//! Picture fitting and pinch-zoom scales.
//!
//! - **Calculations**: pure functions for the fit rule and the pinch clamp
//! - **Picture**: [`PictureScaleModel`], the per-image state built on them

mod calculations;
mod picture;

pub use calculations::{
    MIN_SCALE, PINCH_PIVOT, ZOOM_HEADROOM, clamp_scale, fit_scale, inverted_pinch_multiplier,
    max_scale, pinched_scale,
};
pub(crate) use picture::validate_frame;
pub use picture::{PictureScaleModel, ScaleError};

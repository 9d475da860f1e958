//! Fit and zoom state for a single picture.

use super::calculations::{fit_scale, max_scale, pinched_scale};
use crate::geometry::Size;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ScaleError {
    #[error("Invalid frame {width}x{height}: both dimensions must be positive")]
    InvalidFrame { width: f64, height: f64 },
    #[error("Invalid image {width}x{height}: both dimensions must be positive")]
    InvalidImage { width: f64, height: f64 },
    #[error("No frame has been laid out yet")]
    FrameNotLaidOut,
}

pub(crate) fn validate_frame(frame: Size) -> Result<Size, ScaleError> {
    if frame.is_positive() {
        Ok(frame)
    } else {
        Err(ScaleError::InvalidFrame {
            width: frame.width,
            height: frame.height,
        })
    }
}

fn validate_image(image: Size) -> Result<Size, ScaleError> {
    if image.is_positive() {
        Ok(image)
    } else {
        Err(ScaleError::InvalidImage {
            width: image.width,
            height: image.height,
        })
    }
}

/// Fit scale of `image` in `frame`, which must itself be a usable scale.
///
/// Extreme but finite sizes can overflow the ratio; those are reported as an
/// invalid image.
fn checked_fit_scale(image: Size, frame: Size) -> Result<f64, ScaleError> {
    let scale = fit_scale(image, frame);
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(ScaleError::InvalidImage {
            width: image.width,
            height: image.height,
        })
    }
}

/// One image fitted into a display frame, plus its live pinch zoom.
///
/// `original_scale` is the aspect-fit scale for the current frame.
/// `current_scale` starts there and moves with pinch updates, bounded to
/// `[1, original_scale + 2]`. Changing the frame refits the picture and
/// discards any zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureScaleModel {
    image: Size,
    frame: Size,
    original_scale: f64,
    current_scale: f64,
}

impl PictureScaleModel {
    /// Fit `image` into `frame`.
    ///
    /// Fails with [`ScaleError::InvalidFrame`] or [`ScaleError::InvalidImage`]
    /// when either size has a zero, negative or non-finite dimension, and with
    /// [`ScaleError::InvalidImage`] when the ratio of the two overflows.
    pub fn new(image: Size, frame: Size) -> Result<Self, ScaleError> {
        let image = validate_image(image)?;
        let frame = validate_frame(frame)?;
        let scale = checked_fit_scale(image, frame)?;
        Ok(Self {
            image,
            frame,
            original_scale: scale,
            current_scale: scale,
        })
    }

    /// Refit to a new frame. Both scales reset to the new fit value.
    ///
    /// The model is left untouched on error.
    pub fn update_frame_size(&mut self, frame: Size) -> Result<(), ScaleError> {
        let frame = validate_frame(frame)?;
        let scale = checked_fit_scale(self.image, frame)?;
        self.frame = frame;
        self.original_scale = scale;
        self.current_scale = scale;
        Ok(())
    }

    /// Apply one raw pinch multiplier and return the new current scale.
    ///
    /// `raw > 1` (fingers apart) zooms in, `raw < 1` zooms out.
    pub fn apply_pinch_delta(&mut self, raw: f64) -> f64 {
        self.current_scale = pinched_scale(self.current_scale, self.original_scale, raw);
        self.current_scale
    }

    /// Overwrite the current scale without clamping.
    ///
    /// Used by the session to keep both layers on the bottom layer's scale.
    pub(crate) fn set_current_scale(&mut self, scale: f64) {
        self.current_scale = scale;
    }

    pub fn reset_zoom(&mut self) {
        self.current_scale = self.original_scale;
    }

    pub fn image(&self) -> Size {
        self.image
    }

    pub fn frame(&self) -> Size {
        self.frame
    }

    pub fn original_scale(&self) -> f64 {
        self.original_scale
    }

    pub fn current_scale(&self) -> f64 {
        self.current_scale
    }

    /// Upper bound for [`current_scale`](Self::current_scale).
    pub fn max_scale(&self) -> f64 {
        max_scale(self.original_scale)
    }

    /// Current scale relative to the fit scale (1.0 = fitted, < 1 zoomed in).
    pub fn zoom_factor(&self) -> f64 {
        self.current_scale / self.original_scale
    }

    /// On-screen size of the image at the current scale.
    pub fn displayed_size(&self) -> Size {
        self.image.scaled_down(self.current_scale)
    }
}

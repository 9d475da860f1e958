//! Plain geometry shared by the scale model and the render plan.
//!
//! Sizes are `f64` points, the same unit the frame and the image's natural
//! dimensions are expressed in. [`Size`] parses from and prints as `WxH`
//! so it can be used directly as a CLI argument.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSizeError {
    #[error("expected WIDTHxHEIGHT, got {0:?}")]
    Format(String),
    #[error("invalid number {0:?}")]
    Number(String),
}

/// Width and height of an image or a display frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Size after dividing both dimensions by `scale`.
    ///
    /// This is how a contents scale maps natural pixels to displayed points:
    /// a 4000px wide image at scale 4 occupies 1000 points.
    pub fn scaled_down(self, scale: f64) -> Self {
        Self {
            width: self.width / scale,
            height: self.height / scale,
        }
    }

    /// Width and height swapped.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseSizeError::Format(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ParseSizeError::Number(v.to_string()))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// `content` centred inside a container of size `within`.
    ///
    /// Content larger than the container gets a negative origin and spills
    /// over every edge evenly.
    pub fn centered(content: Size, within: Size) -> Self {
        Self {
            x: (within.width - content.width) / 2.0,
            y: (within.height - content.height) / 2.0,
            width: content.width,
            height: content.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_lowercase_and_uppercase() {
        assert_eq!("1000x800".parse::<Size>().unwrap(), Size::new(1000.0, 800.0));
        assert_eq!("390.5X844".parse::<Size>().unwrap(), Size::new(390.5, 844.0));
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert_eq!(
            "1000".parse::<Size>(),
            Err(ParseSizeError::Format("1000".into()))
        );
        assert_eq!(
            "axb".parse::<Size>(),
            Err(ParseSizeError::Number("a".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let size = Size::new(4000.0, 2000.0);
        assert_eq!(size.to_string(), "4000x2000");
        assert_eq!(size.to_string().parse::<Size>().unwrap(), size);
    }

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(1.0, -3.0).is_positive());
        assert!(!Size::new(f64::NAN, 1.0).is_positive());
        assert!(!Size::new(f64::INFINITY, 1.0).is_positive());
    }

    #[test]
    fn centered_smaller_content() {
        let rect = Rect::centered(Size::new(1000.0, 500.0), Size::new(1000.0, 1000.0));
        assert_eq!(
            rect,
            Rect {
                x: 0.0,
                y: 250.0,
                width: 1000.0,
                height: 500.0
            }
        );
    }

    #[test]
    fn centered_larger_content_spills_evenly() {
        let rect = Rect::centered(Size::new(1200.0, 1200.0), Size::new(1000.0, 1000.0));
        assert_eq!(rect.x, -100.0);
        assert_eq!(rect.y, -100.0);
    }
}

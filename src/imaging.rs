//! Image probing: natural size and EXIF orientation.
//!
//! Only the header is decoded. Phones often store photos sideways and tag
//! them with an EXIF orientation; the scale model must see the size the
//! photo has once displayed upright, so orientations 5–8 (the ones that
//! rotate by a quarter turn) swap width and height.

use crate::geometry::Size;
use image::metadata::Orientation;
use image::{ImageDecoder, ImageReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Header information of an image file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbedImage {
    /// Size as stored in the file.
    pub natural: Size,
    /// EXIF orientation tag value (1–8, 1 = upright).
    pub orientation: u16,
    /// Size once the orientation is applied.
    pub upright: Size,
}

/// EXIF tag value for an orientation reported by the decoder.
pub fn exif_orientation(orientation: Orientation) -> u16 {
    match orientation {
        Orientation::NoTransforms => 1,
        Orientation::FlipHorizontal => 2,
        Orientation::Rotate180 => 3,
        Orientation::FlipVertical => 4,
        Orientation::Rotate90FlipH => 5,
        Orientation::Rotate90 => 6,
        Orientation::Rotate270FlipH => 7,
        Orientation::Rotate270 => 8,
    }
}

/// Size after applying EXIF `orientation` to an image of `natural` size.
///
/// Unknown tag values are treated as upright.
pub fn upright_size(natural: Size, orientation: u16) -> Size {
    match orientation {
        5..=8 => natural.transposed(),
        _ => natural,
    }
}

/// Read size and orientation from the file header.
pub fn probe(path: &Path) -> Result<ProbedImage, ImagingError> {
    let decode = |source: image::ImageError| ImagingError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(decode)?;
    let orientation = exif_orientation(decoder.orientation().map_err(decode)?);
    let (width, height) = decoder.dimensions();

    let natural = Size::new(f64::from(width), f64::from(height));
    let upright = upright_size(natural, orientation);
    debug!(path = %path.display(), %natural, orientation, "probed image");
    Ok(ProbedImage {
        natural,
        orientation,
        upright,
    })
}

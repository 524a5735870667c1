//! Representation-specific resampling backends.
//!
//! Each module exposes the same capability surface (resize, pad, crop, flip,
//! affine, rotate, perspective, color adjustments, grayscale, normalize,
//! erase, to-tensor) over its own memory layout. The dispatcher in
//! [`crate::ops`] selects a backend from the image kind and forwards
//! already-normalized parameters; no backend ever sees raw caller input.

use warpix_image::{ArrayImage, TensorLayout};

use crate::error::TransformError;

pub(crate) mod array;
pub(crate) mod grid;
pub(crate) mod raster;
pub(crate) mod tensor;

/// Luma-based operations need a single- or RGB-channeled image.
pub(crate) fn require_luma_channels(
    op: &'static str,
    channels: usize,
) -> Result<(), TransformError> {
    if channels == 1 || channels >= 3 {
        Ok(())
    } else {
        Err(TransformError::UnsupportedType(format!(
            "{op} requires 1 or 3 channels, image has {channels}"
        )))
    }
}

/// Chroma operations need exactly one or three channels; a grayscale image
/// passes through unchanged.
pub(crate) fn require_chroma_channels(
    op: &'static str,
    channels: usize,
) -> Result<(), TransformError> {
    if channels == 1 || channels == 3 {
        Ok(())
    } else {
        Err(TransformError::UnsupportedType(format!(
            "{op} requires 1 or 3 channels, image has {channels}"
        )))
    }
}

/// Channel count of an array buffer as declared by the caller's layout.
pub(crate) fn array_channels(img: &ArrayImage, layout: TensorLayout) -> usize {
    match (img.rank(), layout) {
        (3, TensorLayout::Hwc) => img.shape()[2],
        (3, TensorLayout::Chw) => img.shape()[0],
        _ => 1,
    }
}

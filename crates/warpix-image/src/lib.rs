#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// Image value representations.
pub mod image;

pub use crate::error::ImageError;
pub use crate::image::{
    ArrayImage, GridImage, Image, ImageDtype, ImageKind, ImageSize, TensorImage, TensorLayout,
};

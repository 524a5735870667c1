#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// affine matrix derivation module.
pub mod affine;

mod backend;

/// image representation classification module.
pub mod classify;

mod color;

mod convention;

/// error types for the transform engine.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// the public operation surface.
pub mod ops;

/// spatial padding modes.
pub mod padding;

/// parameter normalization module.
pub mod params;

/// perspective coefficient solver module.
pub mod perspective;

pub use crate::error::TransformError;

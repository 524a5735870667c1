use warpix_image::ImageError;

/// An error type for the transform engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// Error when an image value is not one of the representations the
    /// operation supports, or an array buffer has an unsupported rank.
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// Error when a parameter fails shape, type or range validation.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Error when a shear angle makes the affine block non-invertible.
    #[error("singular transform: shear of {0} degrees cannot be inverted")]
    SingularTransform(f64),

    /// Error propagated from the image storage layer.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl TransformError {
    /// Build an [`TransformError::InvalidArgument`] naming the parameter.
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

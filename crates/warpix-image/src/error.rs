/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the channel count is not supported by the representation.
    #[error("Unsupported channel count ({0})")]
    InvalidChannels(usize),

    /// Error when a shape contains a zero-sized axis.
    #[error("Shape {0:?} contains a zero-sized axis")]
    ZeroSizedAxis(Vec<usize>),

    /// Error when a sample value cannot be represented in the target type.
    #[error("Cannot cast the sample data to {0}")]
    CastError(String),
}

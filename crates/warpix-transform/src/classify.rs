use warpix_image::{Image, ImageKind};

use crate::error::TransformError;

/// Determine which backend owns an image value.
///
/// Grid and tensor values classify by their variant alone. Array buffers must
/// additionally be rank 2 (grayscale plane) or rank 3 (channeled stack); any
/// other rank is rejected. Every public operation runs this check first, so
/// malformed images never reach parameter validation or matrix math.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedType`] for array buffers of
/// unsupported rank.
///
/// # Example
///
/// ```
/// use warpix_image::{ArrayImage, Image, ImageKind};
/// use warpix_transform::classify::classify;
///
/// let img = Image::Array(ArrayImage::from_shape_vec(vec![2, 3], vec![0.0; 6]).unwrap());
/// assert_eq!(classify(&img).unwrap(), ImageKind::Array);
///
/// let bad = Image::Array(ArrayImage::from_shape_vec(vec![1, 2, 3, 4], vec![0.0; 24]).unwrap());
/// assert!(classify(&bad).is_err());
/// ```
pub fn classify(img: &Image) -> Result<ImageKind, TransformError> {
    match img {
        Image::Grid(_) => Ok(ImageKind::Grid),
        Image::Tensor(_) => Ok(ImageKind::Tensor),
        Image::Array(arr) => match arr.rank() {
            2 | 3 => Ok(ImageKind::Array),
            rank => Err(TransformError::UnsupportedType(format!(
                "array buffer with rank {rank}, expected 2 or 3"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpix_image::{ArrayImage, GridImage, ImageSize, TensorImage, TensorLayout};

    #[test]
    fn classify_grid() -> Result<(), TransformError> {
        let img = Image::Grid(GridImage::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            0,
        )?);
        assert_eq!(classify(&img)?, ImageKind::Grid);
        Ok(())
    }

    #[test]
    fn classify_tensor() -> Result<(), TransformError> {
        let img = Image::Tensor(TensorImage::from_size_val(
            TensorLayout::Chw,
            3,
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?);
        assert_eq!(classify(&img)?, ImageKind::Tensor);
        Ok(())
    }

    #[test]
    fn classify_array_ranks() -> Result<(), TransformError> {
        let rank2 = Image::Array(ArrayImage::from_shape_vec(vec![2, 3], vec![0.0; 6])?);
        assert_eq!(classify(&rank2)?, ImageKind::Array);

        let rank3 = Image::Array(ArrayImage::from_shape_vec(vec![2, 3, 4], vec![0.0; 24])?);
        assert_eq!(classify(&rank3)?, ImageKind::Array);

        let rank4 = Image::Array(ArrayImage::from_shape_vec(vec![1, 2, 3, 4], vec![0.0; 24])?);
        assert!(matches!(
            classify(&rank4),
            Err(TransformError::UnsupportedType(_))
        ));

        let rank1 = Image::Array(ArrayImage::from_shape_vec(vec![6], vec![0.0; 6])?);
        assert!(matches!(
            classify(&rank1),
            Err(TransformError::UnsupportedType(_))
        ));

        Ok(())
    }
}

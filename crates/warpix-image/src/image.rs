use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use warpix_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for sample data types stored by the raster representations.
///
/// Send and Sync are required for the row-parallel resampling loops.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the sample data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Memory layout of a tensor-image buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TensorLayout {
    /// Channels first: (C, H, W).
    Chw,
    /// Channels last: (H, W, C).
    Hwc,
}

/// The representation kind of an image value.
///
/// Every image value belongs to exactly one kind; operations classify the
/// value before doing any other work and dispatch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    /// A pixel-grid object with interleaved 8-bit samples.
    Grid,
    /// A raw floating point sample buffer with an explicit shape.
    Array,
    /// A device-tensor style floating point buffer with a layout tag.
    Tensor,
}

/// A pixel-grid image: interleaved row-major `u8` samples.
///
/// The origin is the top-left corner and coordinate (0, 0) addresses the
/// center of the top-left pixel. Between 1 and 4 channels are supported.
///
/// # Examples
///
/// ```
/// use warpix_image::{GridImage, ImageSize};
///
/// let image = GridImage::new(
///     ImageSize { width: 10, height: 20 },
///     3,
///     vec![0u8; 10 * 20 * 3],
/// ).unwrap();
///
/// assert_eq!(image.size().width, 10);
/// assert_eq!(image.size().height, 20);
/// assert_eq!(image.channels(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridImage {
    size: ImageSize,
    channels: usize,
    data: Vec<u8>,
}

impl GridImage {
    /// Create a new pixel-grid image from interleaved sample data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the image size, if
    /// the channel count is outside 1..=4 or if a dimension is zero.
    pub fn new(size: ImageSize, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if !(1..=4).contains(&channels) {
            return Err(ImageError::InvalidChannels(channels));
        }
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSizedAxis(vec![size.height, size.width]));
        }
        if data.len() != size.width * size.height * channels {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height * channels,
            ));
        }

        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new pixel-grid image filled with a constant sample value.
    pub fn from_size_val(size: ImageSize, channels: usize, val: u8) -> Result<Self, ImageError> {
        let data = vec![val; size.width * size.height * channels];
        Self::new(size, channels, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the sample data as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the sample data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// A raw sample buffer with an explicit shape.
///
/// The buffer is row-major with the origin at the top-left corner. A shape of
/// rank 2 is a grayscale (H, W) plane and rank 3 is an (H, W, C) stack; other
/// ranks can be constructed but are rejected by classification.
///
/// # Examples
///
/// ```
/// use warpix_image::ArrayImage;
///
/// let image = ArrayImage::from_shape_vec(vec![2, 3], vec![0.0f32; 6]).unwrap();
/// assert_eq!(image.rank(), 2);
/// assert_eq!(image.channels(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayImage {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl ArrayImage {
    /// Create a sample buffer from a shape and row-major data.
    ///
    /// Any rank is accepted here; rank validation happens when the value is
    /// classified for an operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the shape product
    /// or if the shape contains a zero-sized axis.
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<f32>) -> Result<Self, ImageError> {
        if shape.iter().any(|&axis| axis == 0) {
            return Err(ImageError::ZeroSizedAxis(shape));
        }
        let numel = shape.iter().product::<usize>();
        if data.len() != numel {
            return Err(ImageError::InvalidDataLength(data.len(), numel));
        }

        Ok(Self { shape, data })
    }

    /// Create a sample buffer by casting numeric data of any primitive type.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented as f32 or if the
    /// data length does not match the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpix_image::ArrayImage;
    ///
    /// let image = ArrayImage::from_cast_vec(vec![2, 2], vec![0u8, 64, 128, 255]).unwrap();
    /// assert_eq!(image.as_slice()[3], 255.0);
    /// ```
    pub fn from_cast_vec<T>(shape: Vec<usize>, data: Vec<T>) -> Result<Self, ImageError>
    where
        T: Copy + num_traits::NumCast,
    {
        let data = data
            .iter()
            .map(|&x| num_traits::cast(x).ok_or_else(|| ImageError::CastError("f32".to_string())))
            .collect::<Result<Vec<f32>, ImageError>>()?;
        Self::from_shape_vec(shape, data)
    }

    /// Create a rank-3 (H, W, C) sample buffer.
    pub fn new(size: ImageSize, channels: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        Self::from_shape_vec(vec![size.height, size.width, channels], data)
    }

    /// Create a rank-2 (H, W) grayscale sample buffer.
    pub fn new_gray(size: ImageSize, data: Vec<f32>) -> Result<Self, ImageError> {
        Self::from_shape_vec(vec![size.height, size.width], data)
    }

    /// Get the shape of the buffer.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the rank (number of axes) of the buffer.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Get the spatial size of the buffer.
    ///
    /// Meaningful for rank 2 and rank 3 buffers, where the leading axes are
    /// (height, width).
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape.get(1).copied().unwrap_or(1),
            height: self.shape.first().copied().unwrap_or(1),
        }
    }

    /// Get the number of channels: the trailing axis for rank 3, otherwise 1.
    pub fn channels(&self) -> usize {
        match self.shape.len() {
            3 => self.shape[2],
            _ => 1,
        }
    }

    /// Get the sample data as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the sample data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// A device-tensor style floating point image.
///
/// The buffer is stored either channels-first (C, H, W) or channels-last
/// (H, W, C) according to its [`TensorLayout`] tag.
///
/// # Examples
///
/// ```
/// use warpix_image::{ImageSize, TensorImage, TensorLayout};
///
/// let image = TensorImage::new(
///     TensorLayout::Chw,
///     3,
///     ImageSize { width: 4, height: 2 },
///     vec![0.0f32; 3 * 2 * 4],
/// ).unwrap();
///
/// assert_eq!(image.channels(), 3);
/// assert_eq!(image.size().height, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TensorImage {
    layout: TensorLayout,
    channels: usize,
    size: ImageSize,
    data: Vec<f32>,
}

impl TensorImage {
    /// Create a new tensor-image from a layout, channel count, size and data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the dimensions or
    /// if a dimension is zero.
    pub fn new(
        layout: TensorLayout,
        channels: usize,
        size: ImageSize,
        data: Vec<f32>,
    ) -> Result<Self, ImageError> {
        if channels == 0 {
            return Err(ImageError::InvalidChannels(channels));
        }
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSizedAxis(vec![
                channels,
                size.height,
                size.width,
            ]));
        }
        if data.len() != channels * size.width * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                channels * size.width * size.height,
            ));
        }

        Ok(Self {
            layout,
            channels,
            size,
            data,
        })
    }

    /// Create a new tensor-image filled with a constant value.
    pub fn from_size_val(
        layout: TensorLayout,
        channels: usize,
        size: ImageSize,
        val: f32,
    ) -> Result<Self, ImageError> {
        let data = vec![val; channels * size.width * size.height];
        Self::new(layout, channels, size, data)
    }

    /// Get the memory layout of the buffer.
    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// Get the number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the spatial size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Linear offset of the sample at row `y`, column `x`, channel `c`.
    pub fn offset(&self, y: usize, x: usize, c: usize) -> usize {
        match self.layout {
            TensorLayout::Chw => (c * self.size.height + y) * self.size.width + x,
            TensorLayout::Hwc => (y * self.size.width + x) * self.channels + c,
        }
    }

    /// Get the sample data as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the sample data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// An image value in one of the three supported representations.
///
/// The engine never inspects sample data through this type; it only carries
/// the value between the caller and the representation-specific backends.
#[derive(Clone, Debug, PartialEq)]
pub enum Image {
    /// A pixel-grid image.
    Grid(GridImage),
    /// A raw sample buffer.
    Array(ArrayImage),
    /// A device-tensor style image.
    Tensor(TensorImage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
    }

    #[test]
    fn grid_smoke() -> Result<(), ImageError> {
        let image = GridImage::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.channels(), 3);

        Ok(())
    }

    #[test]
    fn grid_invalid_data_length() {
        let res = GridImage::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            vec![0u8; 5],
        );
        assert_eq!(res, Err(ImageError::InvalidDataLength(5, 12)));
    }

    #[test]
    fn grid_invalid_channels() {
        let res = GridImage::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            5,
            vec![0u8; 5],
        );
        assert_eq!(res, Err(ImageError::InvalidChannels(5)));
    }

    #[test]
    fn array_any_rank_construction() -> Result<(), ImageError> {
        let rank4 = ArrayImage::from_shape_vec(vec![1, 2, 2, 3], vec![0.0; 12])?;
        assert_eq!(rank4.rank(), 4);

        let rank2 = ArrayImage::from_shape_vec(vec![2, 3], vec![0.0; 6])?;
        assert_eq!(rank2.rank(), 2);
        assert_eq!(rank2.channels(), 1);
        assert_eq!(rank2.size().width, 3);
        assert_eq!(rank2.size().height, 2);

        Ok(())
    }

    #[test]
    fn array_cast_construction() -> Result<(), ImageError> {
        let img = ArrayImage::from_cast_vec(vec![1, 3], vec![-1i64, 0, 1])?;
        assert_eq!(img.as_slice(), &[-1.0, 0.0, 1.0]);

        let img = ArrayImage::from_cast_vec(vec![2], vec![0.25f64, 0.75])?;
        assert_eq!(img.as_slice(), &[0.25, 0.75]);
        Ok(())
    }

    #[test]
    fn array_zero_axis() {
        let res = ArrayImage::from_shape_vec(vec![2, 0, 3], vec![]);
        assert_eq!(res, Err(ImageError::ZeroSizedAxis(vec![2, 0, 3])));
    }

    #[test]
    fn tensor_offsets() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 2,
        };
        let chw = TensorImage::new(TensorLayout::Chw, 3, size, vec![0.0; 24])?;
        assert_eq!(chw.offset(1, 2, 0), 6);
        assert_eq!(chw.offset(0, 0, 2), 16);

        let hwc = TensorImage::new(TensorLayout::Hwc, 3, size, vec![0.0; 24])?;
        assert_eq!(hwc.offset(1, 2, 0), 18);
        assert_eq!(hwc.offset(0, 0, 2), 2);

        Ok(())
    }

    #[test]
    fn dtype_roundtrip() {
        assert_eq!(u8::from_f32(255.4), 255);
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(f32::from_f32(0.25), 0.25);
    }
}

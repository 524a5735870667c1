//! The public operation surface of the transform engine.
//!
//! Every operation follows the same path: classify the image value, validate
//! and normalize the caller's parameters, re-derive geometric parameters in
//! the selected backend's coordinate convention, and forward to that backend.
//! The result keeps the representation kind of the input, with two inherent
//! exceptions: [`to_tensor`] always yields a tensor-image, and [`normalize`]
//! rejects pixel-grid images whose integer samples cannot carry the
//! standardized output range.

use warpix_image::{Image, ImageSize, TensorLayout};

use crate::affine::affine_matrix;
use crate::backend::{array, grid, tensor};
use crate::classify::classify;
use crate::convention;
use crate::error::TransformError;
use crate::interpolation::InterpolationMode;
use crate::padding::PaddingMode;
use crate::params::{
    crop_size, normalize_center, normalize_erase_value, normalize_factor, normalize_fill,
    normalize_hue_factor, normalize_mean_std, normalize_padding, normalize_scale, normalize_shear,
    normalize_translate, resize_size, AffineOptions, Fill, RotateOptions, Shear, SizeSpec,
    WarpOptions,
};

fn image_size(img: &Image) -> ImageSize {
    match img {
        Image::Grid(g) => g.size(),
        Image::Array(a) => a.size(),
        Image::Tensor(t) => t.size(),
    }
}

fn check_region(
    name: &'static str,
    size: ImageSize,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
) -> Result<(), TransformError> {
    if height == 0 || width == 0 {
        return Err(TransformError::invalid(name, "dimensions must be non-zero"));
    }
    if top + height > size.height || left + width > size.width {
        return Err(TransformError::invalid(
            name,
            format!(
                "region ({top}, {left}) + {height}x{width} exceeds image {}x{}",
                size.height, size.width
            ),
        ));
    }
    Ok(())
}

/// The caller's center parameter re-derived in the tensor backend's frame.
///
/// Tensor backends read their dimensions in reverse axis order and take the
/// center as an offset from the image midpoint, so the logical (x, y) center
/// is swapped into the backend's (row, column) order for resolution and the
/// resulting offset swapped back for the warp kernels.
fn tensor_center_offset(center: Option<[f64; 2]>, size: ImageSize) -> [f64; 2] {
    let native = convention::TENSOR.resolve_center(center.map(|[x, y]| [y, x]), size);
    [native[1], native[0]]
}

/// Resize an image to a new size.
///
/// A scalar [`SizeSpec`] scales the shorter edge to the given length and
/// keeps the aspect ratio; an explicit (height, width) pair is used as-is.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedType`] for unrecognized image values
/// and [`TransformError::InvalidArgument`] for a zero-sized target.
///
/// # Example
///
/// ```
/// use warpix_image::{GridImage, Image, ImageSize};
/// use warpix_transform::interpolation::InterpolationMode;
/// use warpix_transform::ops::resize;
/// use warpix_transform::params::SizeSpec;
///
/// let img = Image::Grid(
///     GridImage::from_size_val(ImageSize { width: 300, height: 256 }, 3, 0).unwrap(),
/// );
/// let out = resize(&img, SizeSpec::Scalar(128), InterpolationMode::Bilinear).unwrap();
/// let Image::Grid(out) = out else { panic!() };
/// assert_eq!(out.size().height, 128);
/// assert_eq!(out.size().width, 150);
/// ```
pub fn resize(
    img: &Image,
    size: SizeSpec,
    interpolation: InterpolationMode,
) -> Result<Image, TransformError> {
    classify(img)?;
    let size = resize_size(size, image_size(img))?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::resize(g, size, interpolation)?)),
        Image::Array(a) => Ok(Image::Array(array::resize(a, size, interpolation)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::resize(t, size, interpolation)?)),
    }
}

/// Pad an image on all four sides.
///
/// The padding argument accepts one value (all sides), two values
/// (left/right, top/bottom) or four values (left, top, right, bottom). The
/// fill value is only consulted for [`PaddingMode::Constant`].
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] for any other padding length
/// or negative widths.
pub fn pad(
    img: &Image,
    padding: &[i64],
    fill: Fill,
    mode: PaddingMode,
) -> Result<Image, TransformError> {
    classify(img)?;
    let padding = normalize_padding(padding)?;
    let fill = normalize_fill(fill);
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::pad(g, &padding, fill, mode)?)),
        Image::Array(a) => Ok(Image::Array(array::pad(a, &padding, fill, mode)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::pad(t, &padding, fill, mode)?)),
    }
}

/// Crop a rectangular region out of an image.
///
/// `top` and `left` locate the region's corner from the image's top-left
/// origin; the region must lie fully inside the image.
pub fn crop(
    img: &Image,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
) -> Result<Image, TransformError> {
    classify(img)?;
    check_region("crop", image_size(img), top, left, height, width)?;
    let out_size = ImageSize { width, height };
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::crop(g, top, left, out_size)?)),
        Image::Array(a) => Ok(Image::Array(array::crop(a, top, left, out_size)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::crop(t, top, left, out_size)?)),
    }
}

/// Crop the central region of an image.
///
/// A scalar [`SizeSpec`] selects a square output.
pub fn center_crop(img: &Image, output_size: SizeSpec) -> Result<Image, TransformError> {
    classify(img)?;
    let out = crop_size(output_size)?;
    let size = image_size(img);
    if out.height > size.height || out.width > size.width {
        return Err(TransformError::invalid(
            "output_size",
            format!(
                "{}x{} exceeds image {}x{}",
                out.height, out.width, size.height, size.width
            ),
        ));
    }
    let top = (size.height - out.height) / 2;
    let left = (size.width - out.width) / 2;
    crop(img, top, left, out.height, out.width)
}

/// Flip an image horizontally.
pub fn hflip(img: &Image) -> Result<Image, TransformError> {
    classify(img)?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::hflip(g)?)),
        Image::Array(a) => Ok(Image::Array(array::hflip(a)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::hflip(t)?)),
    }
}

/// Flip an image vertically.
pub fn vflip(img: &Image) -> Result<Image, TransformError> {
    classify(img)?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::vflip(g)?)),
        Image::Array(a) => Ok(Image::Array(array::vflip(a)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::vflip(t)?)),
    }
}

/// Adjust the brightness of an image.
///
/// A factor of 0 gives a black image, 1 the original image and larger values
/// a brighter one.
pub fn adjust_brightness(img: &Image, factor: f64) -> Result<Image, TransformError> {
    classify(img)?;
    let factor = normalize_factor("brightness_factor", factor)?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::adjust_brightness(g, factor)?)),
        Image::Array(a) => Ok(Image::Array(array::adjust_brightness(a, factor)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::adjust_brightness(t, factor)?)),
    }
}

/// Adjust the contrast of an image.
///
/// Samples are blended toward the mean luma of the whole image; a factor of 0
/// collapses the image to that mean and 1 returns the original.
pub fn adjust_contrast(img: &Image, factor: f64) -> Result<Image, TransformError> {
    classify(img)?;
    let factor = normalize_factor("contrast_factor", factor)?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::adjust_contrast(g, factor)?)),
        Image::Array(a) => Ok(Image::Array(array::adjust_contrast(a, factor)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::adjust_contrast(t, factor)?)),
    }
}

/// Adjust the color saturation of an image.
///
/// Samples are blended toward the per-pixel luma; a grayscale image has no
/// chroma and passes through unchanged.
pub fn adjust_saturation(img: &Image, factor: f64) -> Result<Image, TransformError> {
    classify(img)?;
    let factor = normalize_factor("saturation_factor", factor)?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::adjust_saturation(g, factor)?)),
        Image::Array(a) => Ok(Image::Array(array::adjust_saturation(a, factor)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::adjust_saturation(t, factor)?)),
    }
}

/// Shift the hue of an image cyclically.
///
/// The factor must lie in [-0.5, 0.5], a half turn of the hue wheel in either
/// direction. A grayscale image passes through unchanged.
pub fn adjust_hue(img: &Image, factor: f64) -> Result<Image, TransformError> {
    classify(img)?;
    let factor = normalize_hue_factor(factor)?;
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::adjust_hue(g, factor)?)),
        Image::Array(a) => Ok(Image::Array(array::adjust_hue(a, factor)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::adjust_hue(t, factor)?)),
    }
}

/// Apply an affine transform to an image, keeping its canvas size.
///
/// The transform rotates clockwise by `angle` degrees about the center,
/// shifts by `translate` pixels, scales uniformly and shears both axes. An
/// absent center selects the un-offset image midpoint
/// (width / 2, height / 2), which keeps the output geometry identical across
/// the three backends.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] for malformed translate,
/// scale, shear or center arguments and
/// [`TransformError::SingularTransform`] for a shear angle at +/-90 degrees.
///
/// # Example
///
/// ```
/// use warpix_image::{GridImage, Image, ImageSize};
/// use warpix_transform::ops::affine;
/// use warpix_transform::params::{AffineOptions, Shear};
///
/// let img = Image::Grid(
///     GridImage::from_size_val(ImageSize { width: 300, height: 256 }, 3, 0).unwrap(),
/// );
/// let out = affine(
///     &img,
///     45.0,
///     &[0.2, 0.2],
///     0.5,
///     &Shear::Seq(vec![-10.0, 10.0]),
///     &AffineOptions::default(),
/// )
/// .unwrap();
/// let Image::Grid(out) = out else { panic!() };
/// assert_eq!(out.size(), ImageSize { width: 300, height: 256 });
/// ```
pub fn affine(
    img: &Image,
    angle: f64,
    translate: &[f64],
    scale: f64,
    shear: &Shear,
    options: &AffineOptions,
) -> Result<Image, TransformError> {
    classify(img)?;
    let translate = normalize_translate(translate)?;
    let scale = normalize_scale(scale)?;
    let shear = normalize_shear(shear)?;
    let center = normalize_center(options.center.as_deref())?;
    let fill = normalize_fill(options.fill);

    match img {
        Image::Grid(g) => {
            let center = convention::GRID.resolve_center(center, g.size());
            let matrix = affine_matrix(center, angle, translate, scale, shear)?;
            Ok(Image::Grid(grid::affine(
                g,
                &matrix,
                options.interpolation,
                fill,
            )?))
        }
        Image::Array(a) => {
            let center = convention::ARRAY.resolve_center(center, a.size());
            let matrix = affine_matrix(center, angle, translate, scale, shear)?;
            Ok(Image::Array(array::affine(
                a,
                &matrix,
                options.interpolation,
                fill,
            )?))
        }
        Image::Tensor(t) => {
            let offset = tensor_center_offset(center, t.size());
            let matrix = affine_matrix(offset, angle, translate, scale, shear)?;
            Ok(Image::Tensor(tensor::affine(
                t,
                &matrix,
                options.interpolation,
                fill,
            )?))
        }
    }
}

/// Rotate an image counter-clockwise by `angle` degrees.
///
/// With `expand` the output canvas grows to the bounding box of the rotated
/// image; otherwise the canvas size is kept and corners rotate out of frame.
///
/// # Example
///
/// ```
/// use warpix_image::{GridImage, Image, ImageSize};
/// use warpix_transform::ops::rotate;
/// use warpix_transform::params::RotateOptions;
///
/// let img = Image::Grid(
///     GridImage::from_size_val(ImageSize { width: 300, height: 256 }, 3, 0).unwrap(),
/// );
/// let options = RotateOptions {
///     expand: true,
///     ..Default::default()
/// };
/// let Image::Grid(out) = rotate(&img, 90.0, &options).unwrap() else { panic!() };
/// assert_eq!(out.size(), ImageSize { width: 256, height: 300 });
/// ```
pub fn rotate(img: &Image, angle: f64, options: &RotateOptions) -> Result<Image, TransformError> {
    classify(img)?;
    let center = normalize_center(options.center.as_deref())?;
    let fill = normalize_fill(options.fill);

    match img {
        Image::Grid(g) => {
            let center = convention::GRID.resolve_center(center, g.size());
            Ok(Image::Grid(grid::rotate(
                g,
                angle,
                options.interpolation,
                options.expand,
                center,
                fill,
            )?))
        }
        Image::Array(a) => {
            let center = convention::ARRAY.resolve_center(center, a.size());
            Ok(Image::Array(array::rotate(
                a,
                angle,
                options.interpolation,
                options.expand,
                center,
                fill,
            )?))
        }
        Image::Tensor(t) => {
            let offset = tensor_center_offset(center, t.size());
            Ok(Image::Tensor(tensor::rotate(
                t,
                angle,
                options.interpolation,
                options.expand,
                offset,
                fill,
            )?))
        }
    }
}

/// Apply a perspective transform solved from four point correspondences.
///
/// Both point sets hold corners in clockwise order: top-left, top-right,
/// bottom-right, bottom-left. The ordering is a contract of the caller and
/// is not validated; near-degenerate configurations solve to a best-effort
/// result instead of failing.
pub fn perspective(
    img: &Image,
    start_points: &[[f64; 2]; 4],
    end_points: &[[f64; 2]; 4],
    options: &WarpOptions,
) -> Result<Image, TransformError> {
    classify(img)?;
    let fill = normalize_fill(options.fill);
    let coeffs = crate::perspective::perspective_coeffs(start_points, end_points);
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::perspective(
            g,
            &coeffs,
            options.interpolation,
            fill,
        )?)),
        Image::Array(a) => Ok(Image::Array(array::perspective(
            a,
            &coeffs,
            options.interpolation,
            fill,
        )?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::perspective(
            t,
            &coeffs,
            options.interpolation,
            fill,
        )?)),
    }
}

/// Convert an image to grayscale with 1 or 3 output channels.
///
/// RGB inputs reduce through the ITU-R 601 luma weights; a three-channel
/// output repeats the luma plane.
pub fn to_grayscale(img: &Image, num_output_channels: usize) -> Result<Image, TransformError> {
    classify(img)?;
    if num_output_channels != 1 && num_output_channels != 3 {
        return Err(TransformError::invalid(
            "num_output_channels",
            format!("expected 1 or 3, got {num_output_channels}"),
        ));
    }
    match img {
        Image::Grid(g) => Ok(Image::Grid(grid::to_grayscale(g, num_output_channels)?)),
        Image::Array(a) => Ok(Image::Array(array::to_grayscale(a, num_output_channels)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::to_grayscale(t, num_output_channels)?)),
    }
}

/// Standardize an image per channel: `(value - mean) / std`.
///
/// `layout` declares how an array buffer's channels are laid out; tensors
/// carry their own layout tag and ignore it. With `to_rgb` the channel order
/// of an array buffer is reversed before standardizing (tensors are left
/// as-is). The output value range follows the input scale; nothing is
/// clamped.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedType`] for pixel-grid images, whose
/// integer samples cannot carry the standardized range.
pub fn normalize(
    img: &Image,
    mean: &[f64],
    std: &[f64],
    layout: TensorLayout,
    to_rgb: bool,
) -> Result<Image, TransformError> {
    classify(img)?;
    match img {
        Image::Grid(_) => Err(TransformError::UnsupportedType(
            "normalize does not support pixel-grid images".to_string(),
        )),
        Image::Array(a) => {
            let channels = crate::backend::array_channels(a, layout);
            let (mean, std) = normalize_mean_std(mean, std, channels)?;
            Ok(Image::Array(array::normalize(
                a, &mean, &std, layout, to_rgb,
            )?))
        }
        Image::Tensor(t) => {
            let (mean, std) = normalize_mean_std(mean, std, t.channels())?;
            Ok(Image::Tensor(tensor::normalize(t, &mean, &std)?))
        }
    }
}

/// Overwrite a rectangular region of an image with a constant value.
///
/// The value is broadcast from one entry or given per channel. With
/// `inplace` the input buffer is reused and written through; otherwise the
/// samples are copied first and the input allocation is left untouched.
pub fn erase(
    img: Image,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
    value: &[f64],
    inplace: bool,
) -> Result<Image, TransformError> {
    classify(&img)?;
    check_region("erase", image_size(&img), top, left, height, width)?;
    match img {
        Image::Grid(g) => {
            let value = normalize_erase_value(value, g.channels())?;
            let mut g = if inplace { g } else { g.clone() };
            grid::erase(&mut g, top, left, height, width, &value);
            Ok(Image::Grid(g))
        }
        Image::Array(a) => {
            let value = normalize_erase_value(value, a.channels())?;
            let mut a = if inplace { a } else { a.clone() };
            array::erase(&mut a, top, left, height, width, &value);
            Ok(Image::Array(a))
        }
        Image::Tensor(t) => {
            let value = normalize_erase_value(value, t.channels())?;
            let mut t = if inplace { t } else { t.clone() };
            tensor::erase(&mut t, top, left, height, width, &value);
            Ok(Image::Tensor(t))
        }
    }
}

/// Convert an image to a tensor-image with the given layout.
///
/// Pixel-grid samples are scaled from [0, 255] to [0, 1]; float buffers keep
/// their values and only change layout.
pub fn to_tensor(img: &Image, layout: TensorLayout) -> Result<Image, TransformError> {
    classify(img)?;
    match img {
        Image::Grid(g) => Ok(Image::Tensor(grid::to_tensor(g, layout)?)),
        Image::Array(a) => Ok(Image::Tensor(array::to_tensor(a, layout)?)),
        Image::Tensor(t) => Ok(Image::Tensor(tensor::to_tensor(t, layout)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpix_image::{ArrayImage, GridImage, TensorImage};

    const SIZE: ImageSize = ImageSize {
        width: 300,
        height: 256,
    };

    fn grid_image() -> Image {
        Image::Grid(GridImage::from_size_val(SIZE, 3, 128).unwrap())
    }

    fn array_image() -> Image {
        Image::Array(ArrayImage::new(SIZE, 3, vec![0.5; 300 * 256 * 3]).unwrap())
    }

    fn tensor_image() -> Image {
        Image::Tensor(TensorImage::from_size_val(TensorLayout::Chw, 3, SIZE, 0.5).unwrap())
    }

    fn rank4_image() -> Image {
        Image::Array(ArrayImage::from_shape_vec(vec![1, 2, 3, 4], vec![0.0; 24]).unwrap())
    }

    #[test]
    fn affine_keeps_canvas_for_every_kind() -> Result<(), TransformError> {
        let shear = Shear::Seq(vec![-10.0, 10.0]);
        for img in [grid_image(), array_image(), tensor_image()] {
            let out = affine(
                &img,
                45.0,
                &[0.2, 0.2],
                0.5,
                &shear,
                &AffineOptions::default(),
            )?;
            assert_eq!(image_size(&out), SIZE);
            assert_eq!(std::mem::discriminant(&out), std::mem::discriminant(&img));
        }
        Ok(())
    }

    #[test]
    fn rotate_expand_swaps_dimensions_for_every_kind() -> Result<(), TransformError> {
        for img in [grid_image(), array_image(), tensor_image()] {
            let same = rotate(&img, 90.0, &RotateOptions::default())?;
            assert_eq!(image_size(&same), SIZE);

            let options = RotateOptions {
                expand: true,
                ..Default::default()
            };
            let expanded = rotate(&img, 90.0, &options)?;
            assert_eq!(
                image_size(&expanded),
                ImageSize {
                    width: 256,
                    height: 300,
                }
            );
        }
        Ok(())
    }

    #[test]
    fn unsupported_rank_fails_before_parameter_checks() {
        // the invalid size argument must not be reached
        let res = resize(&rank4_image(), SizeSpec::Scalar(0), InterpolationMode::Nearest);
        assert!(matches!(res, Err(TransformError::UnsupportedType(_))));

        let res = affine(
            &rank4_image(),
            0.0,
            &[0.0],
            -1.0,
            &Shear::Scalar(0.0),
            &AffineOptions::default(),
        );
        assert!(matches!(res, Err(TransformError::UnsupportedType(_))));
    }

    #[test]
    fn perspective_identity_keeps_interior_samples() -> Result<(), TransformError> {
        let corners = [
            [0.0, 0.0],
            [SIZE.width as f64, 0.0],
            [SIZE.width as f64, SIZE.height as f64],
            [0.0, SIZE.height as f64],
        ];
        let img = grid_image();
        let Image::Grid(out) = perspective(&img, &corners, &corners, &WarpOptions::default())?
        else {
            panic!()
        };
        assert_eq!(out.size(), SIZE);
        // interior pixels are unaffected by the solve's rounding at the frame
        let mid = (128 * SIZE.width + 150) * 3;
        assert_eq!(&out.as_slice()[mid..mid + 3], &[128, 128, 128]);
        Ok(())
    }

    #[test]
    fn crop_validates_bounds() {
        let img = grid_image();
        assert!(crop(&img, 0, 0, 256, 300).is_ok());
        assert!(matches!(
            crop(&img, 1, 0, 256, 300),
            Err(TransformError::InvalidArgument { name: "crop", .. })
        ));
        assert!(crop(&img, 0, 0, 0, 10).is_err());
    }

    #[test]
    fn center_crop_selects_middle_region() -> Result<(), TransformError> {
        let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let img = Image::Array(ArrayImage::new_gray(
            ImageSize {
                width: 4,
                height: 4,
            },
            data,
        )?);
        let Image::Array(out) = center_crop(&img, SizeSpec::Scalar(2))? else {
            panic!()
        };
        assert_eq!(out.as_slice(), &[5.0, 6.0, 9.0, 10.0]);

        assert!(center_crop(&img, SizeSpec::Scalar(5)).is_err());
        Ok(())
    }

    #[test]
    fn normalize_rejects_grid_images() {
        let res = normalize(
            &grid_image(),
            &[127.5],
            &[127.5],
            TensorLayout::Hwc,
            false,
        );
        assert!(matches!(res, Err(TransformError::UnsupportedType(_))));
    }

    #[test]
    fn normalize_broadcasts_scalar_stats() -> Result<(), TransformError> {
        let img = Image::Tensor(TensorImage::from_size_val(
            TensorLayout::Chw,
            3,
            ImageSize {
                width: 2,
                height: 2,
            },
            255.0,
        )?);
        let Image::Tensor(out) = normalize(&img, &[127.5], &[127.5], TensorLayout::Chw, false)?
        else {
            panic!()
        };
        assert!(out.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-6));
        Ok(())
    }

    #[test]
    fn erase_writes_only_the_region() -> Result<(), TransformError> {
        let img = Image::Array(ArrayImage::new_gray(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )?);
        let Image::Array(out) = erase(img, 0, 1, 1, 2, &[9.0], false)? else {
            panic!()
        };
        assert_eq!(out.as_slice(), &[1.0, 9.0, 9.0, 4.0, 5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn erase_value_must_match_channels() {
        let res = erase(grid_image(), 0, 0, 2, 2, &[1.0, 2.0], false);
        assert!(matches!(
            res,
            Err(TransformError::InvalidArgument { name: "value", .. })
        ));
    }

    #[test]
    fn to_tensor_always_yields_tensor_kind() -> Result<(), TransformError> {
        for img in [grid_image(), array_image(), tensor_image()] {
            let out = to_tensor(&img, TensorLayout::Chw)?;
            assert!(matches!(out, Image::Tensor(_)));
        }
        Ok(())
    }

    #[test]
    fn to_tensor_of_grayscale_array_gains_channel_axis() -> Result<(), TransformError> {
        let img = Image::Array(ArrayImage::new_gray(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0.0; 6],
        )?);
        let Image::Tensor(out) = to_tensor(&img, TensorLayout::Chw)? else {
            panic!()
        };
        assert_eq!(out.channels(), 1);
        assert_eq!(out.height(), 2);
        assert_eq!(out.width(), 3);
        Ok(())
    }

    #[test]
    fn color_adjustments_validate_factors() {
        let img = grid_image();
        assert!(adjust_brightness(&img, -0.1).is_err());
        assert!(adjust_contrast(&img, f64::NAN).is_err());
        assert!(adjust_saturation(&img, -1.0).is_err());
        assert!(adjust_hue(&img, 0.75).is_err());
        assert!(adjust_hue(&img, 0.25).is_ok());
    }

    #[test]
    fn grayscale_channel_count_validated() {
        assert!(to_grayscale(&grid_image(), 1).is_ok());
        assert!(to_grayscale(&grid_image(), 3).is_ok());
        assert!(matches!(
            to_grayscale(&grid_image(), 2),
            Err(TransformError::InvalidArgument {
                name: "num_output_channels",
                ..
            })
        ));
    }
}

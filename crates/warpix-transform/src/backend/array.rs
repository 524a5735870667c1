//! Resampling backend for raw sample buffers (rank 2 or 3, channels last).

use warpix_image::{ArrayImage, ImageSize, TensorImage, TensorLayout};

use super::raster;
use crate::affine::{expanded_extent, rotation_matrix, transform_point, AffineMatrix};
use crate::color;
use crate::error::TransformError;
use crate::interpolation::InterpolationMode;
use crate::padding::{pad_interleaved, Padding, PaddingMode};
use crate::perspective::{self, PerspectiveCoeffs};

/// Rebuild a buffer with the rank of the source: a single-channel result of a
/// rank-2 input stays rank 2.
fn rebuild(
    img: &ArrayImage,
    size: ImageSize,
    channels: usize,
    data: Vec<f32>,
) -> Result<ArrayImage, TransformError> {
    if img.rank() == 2 && channels == 1 {
        Ok(ArrayImage::new_gray(size, data)?)
    } else {
        Ok(ArrayImage::new(size, channels, data)?)
    }
}

pub(crate) fn resize(
    img: &ArrayImage,
    size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<ArrayImage, TransformError> {
    let data = raster::resize(img.as_slice(), img.size(), img.channels(), size, interpolation);
    rebuild(img, size, img.channels(), data)
}

pub(crate) fn pad(
    img: &ArrayImage,
    padding: &Padding,
    fill: [f64; 3],
    mode: PaddingMode,
) -> Result<ArrayImage, TransformError> {
    let fill = raster::fill_values::<f32>(fill, img.channels());
    let data = pad_interleaved(
        img.as_slice(),
        img.size(),
        img.channels(),
        padding,
        mode,
        &fill,
    );
    rebuild(img, padding.padded_size(img.size()), img.channels(), data)
}

pub(crate) fn crop(
    img: &ArrayImage,
    top: usize,
    left: usize,
    out_size: ImageSize,
) -> Result<ArrayImage, TransformError> {
    let data = raster::crop(img.as_slice(), img.size(), img.channels(), top, left, out_size);
    rebuild(img, out_size, img.channels(), data)
}

pub(crate) fn hflip(img: &ArrayImage) -> Result<ArrayImage, TransformError> {
    let data = raster::hflip(img.as_slice(), img.size(), img.channels());
    rebuild(img, img.size(), img.channels(), data)
}

pub(crate) fn vflip(img: &ArrayImage) -> Result<ArrayImage, TransformError> {
    let data = raster::vflip(img.as_slice(), img.size(), img.channels());
    rebuild(img, img.size(), img.channels(), data)
}

pub(crate) fn affine(
    img: &ArrayImage,
    matrix: &AffineMatrix,
    interpolation: InterpolationMode,
    fill: [f64; 3],
) -> Result<ArrayImage, TransformError> {
    let fill = raster::fill_values::<f32>(fill, img.channels());
    let data = raster::warp(
        img.as_slice(),
        img.size(),
        img.channels(),
        img.size(),
        &fill,
        interpolation,
        |x, y| transform_point(x, y, matrix),
    );
    rebuild(img, img.size(), img.channels(), data)
}

pub(crate) fn rotate(
    img: &ArrayImage,
    angle: f64,
    interpolation: InterpolationMode,
    expand: bool,
    center: [f64; 2],
    fill: [f64; 3],
) -> Result<ArrayImage, TransformError> {
    let mut matrix = rotation_matrix(center, angle);
    let out_size = if expand {
        let (out_size, origin) = expanded_extent(img.size(), center, angle);
        matrix[2] += matrix[0] * origin[0] + matrix[1] * origin[1];
        matrix[5] += matrix[3] * origin[0] + matrix[4] * origin[1];
        out_size
    } else {
        img.size()
    };

    let fill = raster::fill_values::<f32>(fill, img.channels());
    let data = raster::warp(
        img.as_slice(),
        img.size(),
        img.channels(),
        out_size,
        &fill,
        interpolation,
        |x, y| transform_point(x, y, &matrix),
    );
    rebuild(img, out_size, img.channels(), data)
}

pub(crate) fn perspective(
    img: &ArrayImage,
    coeffs: &PerspectiveCoeffs,
    interpolation: InterpolationMode,
    fill: [f64; 3],
) -> Result<ArrayImage, TransformError> {
    let fill = raster::fill_values::<f32>(fill, img.channels());
    let data = raster::warp(
        img.as_slice(),
        img.size(),
        img.channels(),
        img.size(),
        &fill,
        interpolation,
        |x, y| perspective::transform_point(x, y, coeffs),
    );
    rebuild(img, img.size(), img.channels(), data)
}

fn map_samples(img: &ArrayImage, f: impl Fn(f32) -> f32) -> Result<ArrayImage, TransformError> {
    let data = img.as_slice().iter().map(|&v| f(v)).collect();
    rebuild(img, img.size(), img.channels(), data)
}

fn map_rgb(
    img: &ArrayImage,
    f: impl Fn(f32, f32, f32) -> (f32, f32, f32),
) -> Result<ArrayImage, TransformError> {
    let mut data = img.as_slice().to_vec();
    for pixel in data.chunks_exact_mut(3) {
        let (r, g, b) = f(pixel[0], pixel[1], pixel[2]);
        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
    }
    rebuild(img, img.size(), img.channels(), data)
}

fn mean_luma(img: &ArrayImage) -> f32 {
    let channels = img.channels();
    let pixels = (img.size().width * img.size().height) as f64;
    let sum: f64 = img
        .as_slice()
        .chunks_exact(channels)
        .map(|pixel| {
            if channels == 1 {
                pixel[0] as f64
            } else {
                color::luma(pixel[0], pixel[1], pixel[2]) as f64
            }
        })
        .sum();
    (sum / pixels) as f32
}

pub(crate) fn adjust_brightness(
    img: &ArrayImage,
    factor: f64,
) -> Result<ArrayImage, TransformError> {
    map_samples(img, |v| v * factor as f32)
}

pub(crate) fn adjust_contrast(img: &ArrayImage, factor: f64) -> Result<ArrayImage, TransformError> {
    super::require_luma_channels("adjust_contrast", img.channels())?;
    let mean = mean_luma(img);
    let factor = factor as f32;
    map_samples(img, |v| v * factor + mean * (1.0 - factor))
}

pub(crate) fn adjust_saturation(
    img: &ArrayImage,
    factor: f64,
) -> Result<ArrayImage, TransformError> {
    super::require_chroma_channels("adjust_saturation", img.channels())?;
    if img.channels() == 1 {
        return Ok(img.clone());
    }
    let factor = factor as f32;
    map_rgb(img, |r, g, b| {
        let gray = color::luma(r, g, b);
        (
            r * factor + gray * (1.0 - factor),
            g * factor + gray * (1.0 - factor),
            b * factor + gray * (1.0 - factor),
        )
    })
}

pub(crate) fn adjust_hue(img: &ArrayImage, factor: f64) -> Result<ArrayImage, TransformError> {
    super::require_chroma_channels("adjust_hue", img.channels())?;
    if img.channels() == 1 {
        return Ok(img.clone());
    }
    let shift = (factor * 360.0) as f32;
    map_rgb(img, |r, g, b| {
        let (h, s, v) = color::rgb_to_hsv(r, g, b);
        color::hsv_to_rgb(h + shift, s, v)
    })
}

pub(crate) fn to_grayscale(
    img: &ArrayImage,
    num_output_channels: usize,
) -> Result<ArrayImage, TransformError> {
    super::require_luma_channels("to_grayscale", img.channels())?;
    let channels = img.channels();
    let mut data = Vec::with_capacity(img.as_slice().len() / channels * num_output_channels);
    for pixel in img.as_slice().chunks_exact(channels) {
        let gray = if channels == 1 {
            pixel[0]
        } else {
            color::luma(pixel[0], pixel[1], pixel[2])
        };
        data.extend(std::iter::repeat(gray).take(num_output_channels));
    }
    if num_output_channels == 1 {
        Ok(ArrayImage::new_gray(img.size(), data)?)
    } else {
        Ok(ArrayImage::new(img.size(), num_output_channels, data)?)
    }
}

pub(crate) fn normalize(
    img: &ArrayImage,
    mean: &[f64],
    std: &[f64],
    layout: TensorLayout,
    to_rgb: bool,
) -> Result<ArrayImage, TransformError> {
    let channels = super::array_channels(img, layout);
    let mut data = img.as_slice().to_vec();

    if to_rgb {
        if channels != 3 {
            return Err(TransformError::invalid(
                "to_rgb",
                format!("requires 3 channels, image has {channels}"),
            ));
        }
        swap_channel_order(&mut data, img, layout);
    }

    let plane = data.len() / channels;
    for (i, value) in data.iter_mut().enumerate() {
        let c = match layout {
            TensorLayout::Hwc => i % channels,
            TensorLayout::Chw => i / plane,
        };
        *value = ((*value as f64 - mean[c]) / std[c]) as f32;
    }

    Ok(ArrayImage::from_shape_vec(img.shape().to_vec(), data)?)
}

/// Reverse the channel order in place (RGB <-> BGR).
fn swap_channel_order(data: &mut [f32], img: &ArrayImage, layout: TensorLayout) {
    match layout {
        TensorLayout::Hwc => {
            for pixel in data.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
        }
        TensorLayout::Chw => {
            let plane = img.as_slice().len() / 3;
            for i in 0..plane {
                data.swap(i, 2 * plane + i);
            }
        }
    }
}

pub(crate) fn erase(
    img: &mut ArrayImage,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
    value: &[f64],
) {
    let channels = img.channels();
    let row_stride = img.size().width * channels;
    let fill: Vec<f32> = value.iter().map(|&v| v as f32).collect();
    let data = img.as_slice_mut();
    for y in top..top + height {
        for x in left..left + width {
            let base = y * row_stride + x * channels;
            data[base..base + channels].copy_from_slice(&fill);
        }
    }
}

pub(crate) fn to_tensor(
    img: &ArrayImage,
    layout: TensorLayout,
) -> Result<TensorImage, TransformError> {
    let (size, channels) = (img.size(), img.channels());
    let mut out = TensorImage::from_size_val(layout, channels, size, 0.0)?;
    for y in 0..size.height {
        for x in 0..size.width {
            for c in 0..channels {
                let sample = img.as_slice()[(y * size.width + x) * channels + c];
                let offset = out.offset(y, x, c);
                out.as_slice_mut()[offset] = sample;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank2_ops_stay_rank2() -> Result<(), TransformError> {
        let img = ArrayImage::new_gray(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;

        let flipped = hflip(&img)?;
        assert_eq!(flipped.rank(), 2);
        assert_eq!(flipped.as_slice(), &[1.0, 0.0, 3.0, 2.0, 5.0, 4.0]);

        let resized = resize(
            &img,
            ImageSize {
                width: 2,
                height: 3,
            },
            InterpolationMode::Nearest,
        )?;
        assert_eq!(resized.rank(), 2);
        Ok(())
    }

    #[test]
    fn normalize_standardizes_range() -> Result<(), TransformError> {
        let img = ArrayImage::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            3,
            vec![0.0, 127.5, 255.0, 255.0, 127.5, 0.0],
        )?;
        let out = normalize(
            &img,
            &[127.5, 127.5, 127.5],
            &[127.5, 127.5, 127.5],
            TensorLayout::Hwc,
            false,
        )?;
        assert_eq!(out.as_slice(), &[-1.0, 0.0, 1.0, 1.0, 0.0, -1.0]);
        Ok(())
    }

    #[test]
    fn normalize_to_rgb_swaps_channel_order() -> Result<(), TransformError> {
        let img = ArrayImage::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            3,
            vec![10.0, 20.0, 30.0],
        )?;
        let out = normalize(
            &img,
            &[0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0],
            TensorLayout::Hwc,
            true,
        )?;
        assert_eq!(out.as_slice(), &[30.0, 20.0, 10.0]);
        Ok(())
    }

    #[test]
    fn to_tensor_keeps_float_values() -> Result<(), TransformError> {
        let img = ArrayImage::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            2,
            vec![1.0, 2.0, 3.0, 4.0],
        )?;
        let tensor = to_tensor(&img, TensorLayout::Chw)?;
        // (H, W, C) -> (C, H, W)
        assert_eq!(tensor.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
        Ok(())
    }

    #[test]
    fn grayscale_of_rank3_single_output_is_rank2() -> Result<(), TransformError> {
        let img = ArrayImage::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            3,
            vec![255.0, 0.0, 0.0],
        )?;
        let gray = to_grayscale(&img, 1)?;
        assert_eq!(gray.rank(), 2);
        assert!((gray.as_slice()[0] - 76.245).abs() < 1e-3);
        Ok(())
    }
}

//! Resampling backend for pixel-grid images (interleaved u8 samples).

use warpix_image::{GridImage, ImageDtype, ImageSize, TensorImage, TensorLayout};

use super::raster;
use crate::affine::{expanded_extent, rotation_matrix, transform_point, AffineMatrix};
use crate::color;
use crate::error::TransformError;
use crate::interpolation::InterpolationMode;
use crate::padding::{pad_interleaved, Padding, PaddingMode};
use crate::perspective::{self, PerspectiveCoeffs};

pub(crate) fn resize(
    img: &GridImage,
    size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<GridImage, TransformError> {
    let data = raster::resize(img.as_slice(), img.size(), img.channels(), size, interpolation);
    Ok(GridImage::new(size, img.channels(), data)?)
}

pub(crate) fn pad(
    img: &GridImage,
    padding: &Padding,
    fill: [f64; 3],
    mode: PaddingMode,
) -> Result<GridImage, TransformError> {
    let fill = raster::fill_values::<u8>(fill, img.channels());
    let data = pad_interleaved(
        img.as_slice(),
        img.size(),
        img.channels(),
        padding,
        mode,
        &fill,
    );
    Ok(GridImage::new(
        padding.padded_size(img.size()),
        img.channels(),
        data,
    )?)
}

pub(crate) fn crop(
    img: &GridImage,
    top: usize,
    left: usize,
    out_size: ImageSize,
) -> Result<GridImage, TransformError> {
    let data = raster::crop(img.as_slice(), img.size(), img.channels(), top, left, out_size);
    Ok(GridImage::new(out_size, img.channels(), data)?)
}

pub(crate) fn hflip(img: &GridImage) -> Result<GridImage, TransformError> {
    let data = raster::hflip(img.as_slice(), img.size(), img.channels());
    Ok(GridImage::new(img.size(), img.channels(), data)?)
}

pub(crate) fn vflip(img: &GridImage) -> Result<GridImage, TransformError> {
    let data = raster::vflip(img.as_slice(), img.size(), img.channels());
    Ok(GridImage::new(img.size(), img.channels(), data)?)
}

pub(crate) fn affine(
    img: &GridImage,
    matrix: &AffineMatrix,
    interpolation: InterpolationMode,
    fill: [f64; 3],
) -> Result<GridImage, TransformError> {
    let fill = raster::fill_values::<u8>(fill, img.channels());
    let data = raster::warp(
        img.as_slice(),
        img.size(),
        img.channels(),
        img.size(),
        &fill,
        interpolation,
        |x, y| transform_point(x, y, matrix),
    );
    Ok(GridImage::new(img.size(), img.channels(), data)?)
}

pub(crate) fn rotate(
    img: &GridImage,
    angle: f64,
    interpolation: InterpolationMode,
    expand: bool,
    center: [f64; 2],
    fill: [f64; 3],
) -> Result<GridImage, TransformError> {
    let mut matrix = rotation_matrix(center, angle);
    let out_size = if expand {
        let (out_size, origin) = expanded_extent(img.size(), center, angle);
        matrix[2] += matrix[0] * origin[0] + matrix[1] * origin[1];
        matrix[5] += matrix[3] * origin[0] + matrix[4] * origin[1];
        out_size
    } else {
        img.size()
    };

    let fill = raster::fill_values::<u8>(fill, img.channels());
    let data = raster::warp(
        img.as_slice(),
        img.size(),
        img.channels(),
        out_size,
        &fill,
        interpolation,
        |x, y| transform_point(x, y, &matrix),
    );
    Ok(GridImage::new(out_size, img.channels(), data)?)
}

pub(crate) fn perspective(
    img: &GridImage,
    coeffs: &PerspectiveCoeffs,
    interpolation: InterpolationMode,
    fill: [f64; 3],
) -> Result<GridImage, TransformError> {
    let fill = raster::fill_values::<u8>(fill, img.channels());
    let data = raster::warp(
        img.as_slice(),
        img.size(),
        img.channels(),
        img.size(),
        &fill,
        interpolation,
        |x, y| perspective::transform_point(x, y, coeffs),
    );
    Ok(GridImage::new(img.size(), img.channels(), data)?)
}

fn map_samples(img: &GridImage, f: impl Fn(f32) -> f32) -> Result<GridImage, TransformError> {
    let data = img
        .as_slice()
        .iter()
        .map(|&v| u8::from_f32(f(v as f32)))
        .collect();
    Ok(GridImage::new(img.size(), img.channels(), data)?)
}

fn map_rgb(
    img: &GridImage,
    f: impl Fn(f32, f32, f32) -> (f32, f32, f32),
) -> Result<GridImage, TransformError> {
    let channels = img.channels();
    let mut data = img.as_slice().to_vec();
    for pixel in data.chunks_exact_mut(channels) {
        let (r, g, b) = f(pixel[0] as f32, pixel[1] as f32, pixel[2] as f32);
        pixel[0] = u8::from_f32(r);
        pixel[1] = u8::from_f32(g);
        pixel[2] = u8::from_f32(b);
    }
    Ok(GridImage::new(img.size(), channels, data)?)
}

fn mean_luma(img: &GridImage) -> f32 {
    let channels = img.channels();
    let pixels = (img.width() * img.height()) as f64;
    let sum: f64 = img
        .as_slice()
        .chunks_exact(channels)
        .map(|pixel| {
            if channels == 1 {
                pixel[0] as f64
            } else {
                color::luma(pixel[0] as f32, pixel[1] as f32, pixel[2] as f32) as f64
            }
        })
        .sum();
    (sum / pixels) as f32
}

pub(crate) fn adjust_brightness(img: &GridImage, factor: f64) -> Result<GridImage, TransformError> {
    map_samples(img, |v| v * factor as f32)
}

pub(crate) fn adjust_contrast(img: &GridImage, factor: f64) -> Result<GridImage, TransformError> {
    super::require_luma_channels("adjust_contrast", img.channels())?;
    let mean = mean_luma(img);
    let factor = factor as f32;
    map_samples(img, |v| v * factor + mean * (1.0 - factor))
}

pub(crate) fn adjust_saturation(img: &GridImage, factor: f64) -> Result<GridImage, TransformError> {
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

pub(crate) fn adjust_hue(img: &GridImage, factor: f64) -> Result<GridImage, TransformError> {
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
    img: &GridImage,
    num_output_channels: usize,
) -> Result<GridImage, TransformError> {
    super::require_luma_channels("to_grayscale", img.channels())?;
    let channels = img.channels();
    let mut data = Vec::with_capacity(img.width() * img.height() * num_output_channels);
    for pixel in img.as_slice().chunks_exact(channels) {
        let gray = if channels == 1 {
            pixel[0]
        } else {
            u8::from_f32(color::luma(
                pixel[0] as f32,
                pixel[1] as f32,
                pixel[2] as f32,
            ))
        };
        data.extend(std::iter::repeat(gray).take(num_output_channels));
    }
    Ok(GridImage::new(img.size(), num_output_channels, data)?)
}

pub(crate) fn erase(
    img: &mut GridImage,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
    value: &[f64],
) {
    let channels = img.channels();
    let row_stride = img.width() * channels;
    let fill: Vec<u8> = value.iter().map(|&v| u8::from_f32(v as f32)).collect();
    let data = img.as_slice_mut();
    for y in top..top + height {
        for x in left..left + width {
            let base = y * row_stride + x * channels;
            data[base..base + channels].copy_from_slice(&fill);
        }
    }
}

pub(crate) fn to_tensor(
    img: &GridImage,
    layout: TensorLayout,
) -> Result<TensorImage, TransformError> {
    let (size, channels) = (img.size(), img.channels());
    let mut out = TensorImage::from_size_val(layout, channels, size, 0.0)?;
    for y in 0..size.height {
        for x in 0..size.width {
            for c in 0..channels {
                let sample = img.as_slice()[(y * size.width + x) * channels + c];
                let offset = out.offset(y, x, c);
                out.as_slice_mut()[offset] = sample as f32 / 255.0;
            }
        }
    }
    Ok(out)
}

//! Resampling backend for tensor-images (channels-first or channels-last
//! float buffers).
//!
//! Geometric parameters arrive in this backend's own convention: the affine
//! matrix is derived about a center expressed as an offset from the image
//! midpoint, so the kernels re-anchor it to absolute pixel coordinates before
//! resampling.

use rayon::prelude::*;
use warpix_image::{ImageSize, TensorImage, TensorLayout};

use crate::affine::{expanded_extent, rotation_matrix, transform_point, AffineMatrix};
use crate::color;
use crate::error::TransformError;
use crate::interpolation::{interpolate_pixel, InterpolationMode, Sample2d, COORD_TOL};
use crate::padding::{Padding, PaddingMode};
use crate::perspective::{self, PerspectiveCoeffs};

struct TensorView<'a> {
    data: &'a [f32],
    size: ImageSize,
    channels: usize,
    layout: TensorLayout,
}

impl Sample2d for TensorView<'_> {
    fn extent(&self) -> (usize, usize) {
        (self.size.height, self.size.width)
    }

    fn at(&self, y: usize, x: usize, c: usize) -> f32 {
        let offset = match self.layout {
            TensorLayout::Chw => (c * self.size.height + y) * self.size.width + x,
            TensorLayout::Hwc => (y * self.size.width + x) * self.channels + c,
        };
        self.data[offset]
    }
}

fn fill_value(fill: [f64; 3], c: usize) -> f32 {
    fill[c.min(2)] as f32
}

/// Re-anchor a matrix derived in the midpoint-offset frame to absolute pixel
/// coordinates.
fn offset_to_absolute(m: &AffineMatrix, size: ImageSize) -> AffineMatrix {
    let mx = 0.5 * size.width as f64;
    let my = 0.5 * size.height as f64;
    let mut out = *m;
    out[2] = m[0] * (-mx) + m[1] * (-my) + m[2] + mx;
    out[5] = m[3] * (-mx) + m[4] * (-my) + m[5] + my;
    out
}

/// Resample a tensor through an inverse coordinate map in absolute pixel
/// coordinates.
fn warp(
    img: &TensorImage,
    out_size: ImageSize,
    fill: [f64; 3],
    interpolation: InterpolationMode,
    map: impl Fn(f64, f64) -> (f64, f64) + Sync,
) -> Result<TensorImage, TransformError> {
    let channels = img.channels();
    let view = TensorView {
        data: img.as_slice(),
        size: img.size(),
        channels,
        layout: img.layout(),
    };
    let (w_f, h_f) = (img.width() as f64, img.height() as f64);

    let mut data = vec![0f32; channels * out_size.width * out_size.height];
    match img.layout() {
        TensorLayout::Chw => {
            data.par_chunks_exact_mut(out_size.width)
                .enumerate()
                .for_each(|(idx, row)| {
                    let c = idx / out_size.height;
                    let y = idx % out_size.height;
                    for (x, sample) in row.iter_mut().enumerate() {
                        let (u, v) = map(x as f64, y as f64);
                        *sample = if u > -COORD_TOL
                            && u < w_f + COORD_TOL
                            && v > -COORD_TOL
                            && v < h_f + COORD_TOL
                        {
                            interpolate_pixel(&view, u as f32, v as f32, c, interpolation)
                        } else {
                            fill_value(fill, c)
                        };
                    }
                });
        }
        TensorLayout::Hwc => {
            data.par_chunks_exact_mut(out_size.width * channels)
                .enumerate()
                .for_each(|(y, row)| {
                    row.chunks_exact_mut(channels)
                        .enumerate()
                        .for_each(|(x, pixel)| {
                            let (u, v) = map(x as f64, y as f64);
                            if u > -COORD_TOL
                                && u < w_f + COORD_TOL
                                && v > -COORD_TOL
                                && v < h_f + COORD_TOL
                            {
                                for (c, sample) in pixel.iter_mut().enumerate() {
                                    *sample = interpolate_pixel(
                                        &view,
                                        u as f32,
                                        v as f32,
                                        c,
                                        interpolation,
                                    );
                                }
                            } else {
                                for (c, sample) in pixel.iter_mut().enumerate() {
                                    *sample = fill_value(fill, c);
                                }
                            }
                        });
                });
        }
    }

    Ok(TensorImage::new(img.layout(), channels, out_size, data)?)
}

/// Build a tensor of the same layout by sampling a function per position.
fn remap(
    img: &TensorImage,
    out_size: ImageSize,
    channels: usize,
    f: impl Fn(usize, usize, usize) -> f32,
) -> Result<TensorImage, TransformError> {
    let mut out = TensorImage::from_size_val(img.layout(), channels, out_size, 0.0)?;
    for y in 0..out_size.height {
        for x in 0..out_size.width {
            for c in 0..channels {
                let offset = out.offset(y, x, c);
                out.as_slice_mut()[offset] = f(y, x, c);
            }
        }
    }
    Ok(out)
}

pub(crate) fn resize(
    img: &TensorImage,
    size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<TensorImage, TransformError> {
    let scale_x = if size.width > 1 {
        (img.width() - 1) as f64 / (size.width - 1) as f64
    } else {
        0.0
    };
    let scale_y = if size.height > 1 {
        (img.height() - 1) as f64 / (size.height - 1) as f64
    } else {
        0.0
    };
    warp(img, size, [0.0; 3], interpolation, |x, y| {
        (x * scale_x, y * scale_y)
    })
}

pub(crate) fn pad(
    img: &TensorImage,
    padding: &Padding,
    fill: [f64; 3],
    mode: PaddingMode,
) -> Result<TensorImage, TransformError> {
    let size = img.size();
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, padding.padded_size(size), img.channels(), |y, x, c| {
        let src_y = y as isize - padding.top as isize;
        let src_x = x as isize - padding.left as isize;
        let inside = src_y >= 0
            && (src_y as usize) < size.height
            && src_x >= 0
            && (src_x as usize) < size.width;
        if inside {
            at(src_y as usize, src_x as usize, c)
        } else if mode == PaddingMode::Constant {
            fill_value(fill, c)
        } else {
            at(
                mode.map_index(src_y, size.height),
                mode.map_index(src_x, size.width),
                c,
            )
        }
    })
}

pub(crate) fn crop(
    img: &TensorImage,
    top: usize,
    left: usize,
    out_size: ImageSize,
) -> Result<TensorImage, TransformError> {
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, out_size, img.channels(), |y, x, c| {
        at(top + y, left + x, c)
    })
}

pub(crate) fn hflip(img: &TensorImage) -> Result<TensorImage, TransformError> {
    let width = img.width();
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, img.size(), img.channels(), |y, x, c| {
        at(y, width - 1 - x, c)
    })
}

pub(crate) fn vflip(img: &TensorImage) -> Result<TensorImage, TransformError> {
    let height = img.height();
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, img.size(), img.channels(), |y, x, c| {
        at(height - 1 - y, x, c)
    })
}

pub(crate) fn affine(
    img: &TensorImage,
    matrix: &AffineMatrix,
    interpolation: InterpolationMode,
    fill: [f64; 3],
) -> Result<TensorImage, TransformError> {
    let matrix = offset_to_absolute(matrix, img.size());
    warp(img, img.size(), fill, interpolation, |x, y| {
        transform_point(x, y, &matrix)
    })
}

pub(crate) fn rotate(
    img: &TensorImage,
    angle: f64,
    interpolation: InterpolationMode,
    expand: bool,
    center_offset: [f64; 2],
    fill: [f64; 3],
) -> Result<TensorImage, TransformError> {
    let center = [
        center_offset[0] + 0.5 * img.width() as f64,
        center_offset[1] + 0.5 * img.height() as f64,
    ];
    let mut matrix = rotation_matrix(center, angle);
    let out_size = if expand {
        let (out_size, origin) = expanded_extent(img.size(), center, angle);
        matrix[2] += matrix[0] * origin[0] + matrix[1] * origin[1];
        matrix[5] += matrix[3] * origin[0] + matrix[4] * origin[1];
        out_size
    } else {
        img.size()
    };

    warp(img, out_size, fill, interpolation, |x, y| {
        transform_point(x, y, &matrix)
    })
}

pub(crate) fn perspective(
    img: &TensorImage,
    coeffs: &PerspectiveCoeffs,
    interpolation: InterpolationMode,
    fill: [f64; 3],
) -> Result<TensorImage, TransformError> {
    warp(img, img.size(), fill, interpolation, |x, y| {
        perspective::transform_point(x, y, coeffs)
    })
}

fn map_samples(img: &TensorImage, f: impl Fn(f32) -> f32) -> Result<TensorImage, TransformError> {
    let data = img.as_slice().iter().map(|&v| f(v)).collect();
    Ok(TensorImage::new(
        img.layout(),
        img.channels(),
        img.size(),
        data,
    )?)
}

fn mean_luma(img: &TensorImage) -> f32 {
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    let pixels = (img.width() * img.height()) as f64;
    let mut sum = 0.0f64;
    for y in 0..img.height() {
        for x in 0..img.width() {
            sum += if img.channels() == 1 {
                at(y, x, 0) as f64
            } else {
                color::luma(at(y, x, 0), at(y, x, 1), at(y, x, 2)) as f64
            };
        }
    }
    (sum / pixels) as f32
}

pub(crate) fn adjust_brightness(
    img: &TensorImage,
    factor: f64,
) -> Result<TensorImage, TransformError> {
    map_samples(img, |v| v * factor as f32)
}

pub(crate) fn adjust_contrast(
    img: &TensorImage,
    factor: f64,
) -> Result<TensorImage, TransformError> {
    super::require_luma_channels("adjust_contrast", img.channels())?;
    let mean = mean_luma(img);
    let factor = factor as f32;
    map_samples(img, |v| v * factor + mean * (1.0 - factor))
}

pub(crate) fn adjust_saturation(
    img: &TensorImage,
    factor: f64,
) -> Result<TensorImage, TransformError> {
    super::require_chroma_channels("adjust_saturation", img.channels())?;
    if img.channels() == 1 {
        return Ok(img.clone());
    }
    let factor = factor as f32;
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, img.size(), img.channels(), |y, x, c| {
        let gray = color::luma(at(y, x, 0), at(y, x, 1), at(y, x, 2));
        at(y, x, c) * factor + gray * (1.0 - factor)
    })
}

pub(crate) fn adjust_hue(img: &TensorImage, factor: f64) -> Result<TensorImage, TransformError> {
    super::require_chroma_channels("adjust_hue", img.channels())?;
    if img.channels() == 1 {
        return Ok(img.clone());
    }
    let shift = (factor * 360.0) as f32;
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, img.size(), img.channels(), |y, x, c| {
        let (h, s, v) = color::rgb_to_hsv(at(y, x, 0), at(y, x, 1), at(y, x, 2));
        let (r, g, b) = color::hsv_to_rgb(h + shift, s, v);
        match c {
            0 => r,
            1 => g,
            _ => b,
        }
    })
}

pub(crate) fn to_grayscale(
    img: &TensorImage,
    num_output_channels: usize,
) -> Result<TensorImage, TransformError> {
    super::require_luma_channels("to_grayscale", img.channels())?;
    let channels = img.channels();
    let at = |y: usize, x: usize, c: usize| img.as_slice()[img.offset(y, x, c)];
    remap(img, img.size(), num_output_channels, |y, x, _| {
        if channels == 1 {
            at(y, x, 0)
        } else {
            color::luma(at(y, x, 0), at(y, x, 1), at(y, x, 2))
        }
    })
}

pub(crate) fn normalize(
    img: &TensorImage,
    mean: &[f64],
    std: &[f64],
) -> Result<TensorImage, TransformError> {
    let channels = img.channels();
    let plane = img.width() * img.height();
    let data = img
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let c = match img.layout() {
                TensorLayout::Chw => i / plane,
                TensorLayout::Hwc => i % channels,
            };
            ((v as f64 - mean[c]) / std[c]) as f32
        })
        .collect();
    Ok(TensorImage::new(img.layout(), channels, img.size(), data)?)
}

pub(crate) fn erase(
    img: &mut TensorImage,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
    value: &[f64],
) {
    for y in top..top + height {
        for x in left..left + width {
            for (c, &v) in value.iter().enumerate() {
                let offset = img.offset(y, x, c);
                img.as_slice_mut()[offset] = v as f32;
            }
        }
    }
}

pub(crate) fn to_tensor(
    img: &TensorImage,
    layout: TensorLayout,
) -> Result<TensorImage, TransformError> {
    if img.layout() == layout {
        return Ok(img.clone());
    }
    let mut out = TensorImage::from_size_val(layout, img.channels(), img.size(), 0.0)?;
    for y in 0..img.height() {
        for x in 0..img.width() {
            for c in 0..img.channels() {
                let sample = img.as_slice()[img.offset(y, x, c)];
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

    fn planes_2x2() -> TensorImage {
        // two channels, each a 2x2 plane
        TensorImage::new(
            TensorLayout::Chw,
            2,
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 13.0],
        )
        .unwrap()
    }

    #[test]
    fn hflip_swaps_columns_per_plane() -> Result<(), TransformError> {
        let flipped = hflip(&planes_2x2())?;
        assert_eq!(
            flipped.as_slice(),
            &[1.0, 0.0, 3.0, 2.0, 11.0, 10.0, 13.0, 12.0]
        );
        Ok(())
    }

    #[test]
    fn vflip_swaps_rows_per_plane() -> Result<(), TransformError> {
        let flipped = vflip(&planes_2x2())?;
        assert_eq!(
            flipped.as_slice(),
            &[2.0, 3.0, 0.0, 1.0, 12.0, 13.0, 10.0, 11.0]
        );
        Ok(())
    }

    #[test]
    fn crop_reads_through_layout() -> Result<(), TransformError> {
        let cropped = crop(
            &planes_2x2(),
            1,
            0,
            ImageSize {
                width: 2,
                height: 1,
            },
        )?;
        assert_eq!(cropped.as_slice(), &[2.0, 3.0, 12.0, 13.0]);
        Ok(())
    }

    #[test]
    fn rotate_quarter_turn_matches_raster_geometry() -> Result<(), TransformError> {
        let img = TensorImage::new(
            TensorLayout::Chw,
            1,
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0],
        )?;
        // center offset anchoring the rotation at the sample centroid
        let rotated = rotate(
            &img,
            90.0,
            InterpolationMode::Nearest,
            false,
            [-0.5, -0.5],
            [0.0; 3],
        )?;
        assert_eq!(rotated.as_slice(), &[1.0, 3.0, 0.0, 2.0]);
        Ok(())
    }

    #[test]
    fn rotate_with_expand_swaps_canvas() -> Result<(), TransformError> {
        let img = TensorImage::from_size_val(
            TensorLayout::Chw,
            3,
            ImageSize {
                width: 300,
                height: 256,
            },
            0.5,
        )?;
        let rotated = rotate(
            &img,
            90.0,
            InterpolationMode::Nearest,
            true,
            [0.0, 0.0],
            [0.0; 3],
        )?;
        assert_eq!(rotated.width(), 256);
        assert_eq!(rotated.height(), 300);
        Ok(())
    }

    #[test]
    fn layout_conversion_roundtrip() -> Result<(), TransformError> {
        let img = planes_2x2();
        let hwc = to_tensor(&img, TensorLayout::Hwc)?;
        assert_eq!(
            hwc.as_slice(),
            &[0.0, 10.0, 1.0, 11.0, 2.0, 12.0, 3.0, 13.0]
        );
        let back = to_tensor(&hwc, TensorLayout::Chw)?;
        assert_eq!(back.as_slice(), img.as_slice());
        Ok(())
    }

    #[test]
    fn normalize_uses_per_channel_stats() -> Result<(), TransformError> {
        let img = planes_2x2();
        let out = normalize(&img, &[1.0, 11.0], &[2.0, 2.0])?;
        assert_eq!(
            out.as_slice(),
            &[-0.5, 0.0, 0.5, 1.0, -0.5, 0.0, 0.5, 1.0]
        );
        Ok(())
    }

    #[test]
    fn erase_writes_per_channel_values() -> Result<(), TransformError> {
        let mut img = planes_2x2();
        erase(&mut img, 0, 1, 1, 1, &[7.0, 8.0]);
        assert_eq!(
            img.as_slice(),
            &[0.0, 7.0, 2.0, 3.0, 10.0, 8.0, 12.0, 13.0]
        );
        Ok(())
    }
}

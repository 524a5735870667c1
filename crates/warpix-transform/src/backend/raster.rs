//! Shared pixel loops for the interleaved row-major raster backends.

use rayon::prelude::*;
use warpix_image::{ImageDtype, ImageSize};

use crate::interpolation::{interpolate_pixel, InterpolationMode, Sample2d, COORD_TOL};

/// Borrowed view of an interleaved (H, W, C) raster.
struct RasterView<'a, T> {
    data: &'a [T],
    size: ImageSize,
    channels: usize,
}

impl<T: ImageDtype> Sample2d for RasterView<'_, T> {
    fn extent(&self) -> (usize, usize) {
        (self.size.height, self.size.width)
    }

    fn at(&self, y: usize, x: usize, c: usize) -> f32 {
        self.data[(y * self.size.width + x) * self.channels + c].into()
    }
}

/// Convert a normalized fill triple into one sample per channel.
pub(crate) fn fill_values<T: ImageDtype>(fill: [f64; 3], channels: usize) -> Vec<T> {
    (0..channels)
        .map(|c| T::from_f32(fill[c.min(2)] as f32))
        .collect()
}

/// Flip an interleaved raster horizontally.
pub(crate) fn hflip<T: ImageDtype>(data: &[T], size: ImageSize, channels: usize) -> Vec<T> {
    let mut out = data.to_vec();
    out.par_chunks_exact_mut(size.width * channels)
        .for_each(|row| {
            let mut i = 0;
            let mut j = size.width - 1;
            while i < j {
                for c in 0..channels {
                    row.swap(i * channels + c, j * channels + c);
                }
                i += 1;
                j -= 1;
            }
        });
    out
}

/// Flip an interleaved raster vertically.
pub(crate) fn vflip<T: ImageDtype>(data: &[T], size: ImageSize, channels: usize) -> Vec<T> {
    let stride = size.width * channels;
    let mut out = vec![T::default(); data.len()];
    out.par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_y = size.height - 1 - y;
            row.copy_from_slice(&data[src_y * stride..(src_y + 1) * stride]);
        });
    out
}

/// Copy a rectangular region out of an interleaved raster.
///
/// The region must lie inside the raster; the dispatcher validates bounds.
pub(crate) fn crop<T: ImageDtype>(
    data: &[T],
    size: ImageSize,
    channels: usize,
    top: usize,
    left: usize,
    out_size: ImageSize,
) -> Vec<T> {
    let src_stride = size.width * channels;
    let dst_stride = out_size.width * channels;
    let mut out = vec![T::default(); out_size.width * out_size.height * channels];
    out.par_chunks_exact_mut(dst_stride)
        .enumerate()
        .for_each(|(i, dst_row)| {
            let offset = (top + i) * src_stride + left * channels;
            dst_row.copy_from_slice(&data[offset..offset + dst_stride]);
        });
    out
}

/// Resample an interleaved raster through an inverse coordinate map.
///
/// For every destination pixel the map yields the source position to pull
/// from; positions outside the source raster produce the fill color.
pub(crate) fn warp<T: ImageDtype>(
    data: &[T],
    size: ImageSize,
    channels: usize,
    out_size: ImageSize,
    fill: &[T],
    interpolation: InterpolationMode,
    map: impl Fn(f64, f64) -> (f64, f64) + Sync,
) -> Vec<T> {
    let view = RasterView {
        data,
        size,
        channels,
    };
    let (w_f, h_f) = (size.width as f64, size.height as f64);

    let mut out = vec![T::default(); out_size.width * out_size.height * channels];
    out.par_chunks_exact_mut(out_size.width * channels)
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
                            *sample = T::from_f32(interpolate_pixel(
                                &view,
                                u as f32,
                                v as f32,
                                c,
                                interpolation,
                            ));
                        }
                    } else {
                        pixel.copy_from_slice(fill);
                    }
                });
        });
    out
}

/// Resize an interleaved raster with an axis-aligned scale map.
pub(crate) fn resize<T: ImageDtype>(
    data: &[T],
    size: ImageSize,
    channels: usize,
    out_size: ImageSize,
    interpolation: InterpolationMode,
) -> Vec<T> {
    let scale_x = if out_size.width > 1 {
        (size.width - 1) as f64 / (out_size.width - 1) as f64
    } else {
        0.0
    };
    let scale_y = if out_size.height > 1 {
        (size.height - 1) as f64 / (out_size.height - 1) as f64
    } else {
        0.0
    };

    let fill = vec![T::default(); channels];
    warp(data, size, channels, out_size, &fill, interpolation, |x, y| {
        (x * scale_x, y * scale_y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE_2X3: ImageSize = ImageSize {
        width: 2,
        height: 3,
    };

    #[test]
    fn hflip_swaps_columns() {
        let data = [0u8, 1, 2, 3, 4, 5];
        assert_eq!(hflip(&data, SIZE_2X3, 1), vec![1, 0, 3, 2, 5, 4]);
    }

    #[test]
    fn vflip_swaps_rows() {
        let data = [0u8, 1, 2, 3, 4, 5];
        assert_eq!(vflip(&data, SIZE_2X3, 1), vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn crop_copies_region() {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let data: Vec<u8> = (0..16).collect();
        let out = crop(
            &data,
            size,
            1,
            1,
            1,
            ImageSize {
                width: 2,
                height: 2,
            },
        );
        assert_eq!(out, vec![5, 6, 9, 10]);
    }

    #[test]
    fn identity_warp_preserves_data() {
        let data: Vec<f32> = (0..12).map(|x| x as f32).collect();
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let out = warp(
            &data,
            size,
            1,
            size,
            &[0.0],
            InterpolationMode::Nearest,
            |x, y| (x, y),
        );
        assert_eq!(out, data);
    }

    #[test]
    fn out_of_bounds_positions_take_fill() {
        let data = [1.0f32; 4];
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let out = warp(
            &data,
            size,
            1,
            size,
            &[7.0],
            InterpolationMode::Nearest,
            |x, y| (x + 10.0, y),
        );
        assert_eq!(out, vec![7.0; 4]);
    }

    #[test]
    fn resize_to_same_size_is_identity() {
        let data: Vec<u8> = (0..12).collect();
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let out = resize(&data, size, 1, size, InterpolationMode::Bilinear);
        assert_eq!(out, data);
    }

    #[test]
    fn resize_nearest_upsamples_by_repetition() {
        let data = [0u8, 1, 2, 3];
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let out = resize(
            &data,
            size,
            1,
            ImageSize {
                width: 4,
                height: 2,
            },
            InterpolationMode::Nearest,
        );
        assert_eq!(out, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }
}

//! Spatial padding modes and the shared border-fill routine.

use warpix_image::ImageSize;

/// A border type for the pad operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    /// Fill the border with a constant value.
    ///
    /// Example: ...d c b a | v v v v...
    Constant,

    /// Repeat the outermost sample into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Edge,

    /// Mirror at the boundary without repeating the edge sample.
    ///
    /// Padding [1, 2, 3, 4] with 2 elements on both sides gives
    /// [3, 2, 1, 2, 3, 4, 3, 2].
    Reflect,

    /// Mirror at the boundary, repeating the edge sample.
    ///
    /// Padding [1, 2, 3, 4] with 2 elements on both sides gives
    /// [2, 1, 1, 2, 3, 4, 4, 3].
    Symmetric,
}

impl PaddingMode {
    #[inline]
    fn mirror(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i - 1;
            } else {
                i = 2 * len - i - 1;
            }
        }
        i as usize
    }

    #[inline]
    fn mirror_open(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Map an out-of-range coordinate to a valid index within `[0, len)`.
    ///
    /// `Constant` is handled by the caller and returns 0 here.
    #[inline]
    pub(crate) fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Constant => 0,
            PaddingMode::Edge => i.clamp(0, len as isize - 1) as usize,
            PaddingMode::Reflect => Self::mirror_open(i, len),
            PaddingMode::Symmetric => Self::mirror(i, len),
        }
    }
}

/// Per-side padding widths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// Padding on the left side.
    pub left: usize,
    /// Padding on the top side.
    pub top: usize,
    /// Padding on the right side.
    pub right: usize,
    /// Padding on the bottom side.
    pub bottom: usize,
}

impl Padding {
    /// Size of an image after applying this padding.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Pad an interleaved row-major raster, returning the grown buffer.
///
/// `fill` holds one value per channel and is only consulted for
/// [`PaddingMode::Constant`].
pub(crate) fn pad_interleaved<T: Copy>(
    src: &[T],
    size: ImageSize,
    channels: usize,
    padding: &Padding,
    mode: PaddingMode,
    fill: &[T],
) -> Vec<T> {
    let new_size = padding.padded_size(size);
    let mut out = Vec::with_capacity(new_size.width * new_size.height * channels);

    for y in 0..new_size.height {
        let src_y = y as isize - padding.top as isize;
        let row_inside = src_y >= 0 && (src_y as usize) < size.height;
        for x in 0..new_size.width {
            let src_x = x as isize - padding.left as isize;
            let col_inside = src_x >= 0 && (src_x as usize) < size.width;
            if row_inside && col_inside {
                let base = (src_y as usize * size.width + src_x as usize) * channels;
                out.extend_from_slice(&src[base..base + channels]);
            } else if mode == PaddingMode::Constant {
                out.extend_from_slice(fill);
            } else {
                let sy = mode.map_index(src_y, size.height);
                let sx = mode.map_index(src_x, size.width);
                let base = (sy * size.width + sx) * channels;
                out.extend_from_slice(&src[base..base + channels]);
            }
        }
    }
    out
}

use warpix_image::ImageSize;

/// Axis order a backend uses when reading (width, height) off an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AxisOrder {
    /// Width first, height second.
    WidthHeight,
    /// Height first, width second.
    HeightWidth,
}

/// How a backend expects the center parameter of a geometric transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CenterMode {
    /// An absolute pixel coordinate, origin at the top-left corner.
    Absolute,
    /// An offset from the image midpoint; an absent center is the zero
    /// offset.
    MidpointOffset,
}

/// Coordinate convention of a resampling backend.
///
/// The same logical center parameter must be re-derived per backend rather
/// than reused: tensor backends read their dimensions in reverse axis order
/// and take the center relative to the image midpoint, while the raster
/// backends take an absolute coordinate. Resolving the convention here keeps
/// the matrix builder itself backend-agnostic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordConvention {
    pub axes: AxisOrder,
    pub center: CenterMode,
}

/// Convention of the pixel-grid backend.
pub(crate) const GRID: CoordConvention = CoordConvention {
    axes: AxisOrder::WidthHeight,
    center: CenterMode::Absolute,
};

/// Convention of the sample-buffer backend.
pub(crate) const ARRAY: CoordConvention = CoordConvention {
    axes: AxisOrder::WidthHeight,
    center: CenterMode::Absolute,
};

/// Convention of the tensor backend.
pub(crate) const TENSOR: CoordConvention = CoordConvention {
    axes: AxisOrder::HeightWidth,
    center: CenterMode::MidpointOffset,
};

impl CoordConvention {
    /// Resolve the caller's center argument into this backend's frame.
    ///
    /// The default center is the un-offset geometric midpoint
    /// (width * 0.5, height * 0.5), so a 90-degree rotation lands on the same
    /// pixels for every backend instead of drifting by half a pixel.
    pub(crate) fn resolve_center(&self, center: Option<[f64; 2]>, size: ImageSize) -> [f64; 2] {
        let (first, second) = match self.axes {
            AxisOrder::WidthHeight => (size.width as f64, size.height as f64),
            AxisOrder::HeightWidth => (size.height as f64, size.width as f64),
        };
        match self.center {
            CenterMode::Absolute => center.unwrap_or([first * 0.5, second * 0.5]),
            CenterMode::MidpointOffset => match center {
                Some(c) => [c[0] - first * 0.5, c[1] - second * 0.5],
                None => [0.0, 0.0],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ImageSize = ImageSize {
        width: 300,
        height: 256,
    };

    #[test]
    fn default_center_is_unoffset_midpoint() {
        assert_eq!(GRID.resolve_center(None, SIZE), [150.0, 128.0]);
        assert_eq!(ARRAY.resolve_center(None, SIZE), [150.0, 128.0]);
    }

    #[test]
    fn explicit_center_passes_through_absolute() {
        assert_eq!(GRID.resolve_center(Some([10.0, 20.0]), SIZE), [10.0, 20.0]);
    }

    #[test]
    fn tensor_center_is_midpoint_offset_with_reversed_axes() {
        assert_eq!(TENSOR.resolve_center(None, SIZE), [0.0, 0.0]);
        // the offset subtracts (height * 0.5, width * 0.5)
        assert_eq!(
            TENSOR.resolve_center(Some([128.0, 150.0]), SIZE),
            [0.0, 0.0]
        );
    }
}

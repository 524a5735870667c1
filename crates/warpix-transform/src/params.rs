use warpix_image::ImageSize;

use crate::error::TransformError;
use crate::interpolation::InterpolationMode;
use crate::padding::Padding;

/// Shear argument accepted by the affine operation.
///
/// A bare scalar shears the x-axis only; a one-element sequence broadcasts to
/// both axes; a two-element sequence gives (x, y) independently.
#[derive(Debug, Clone, PartialEq)]
pub enum Shear {
    /// Single shear angle in degrees, applied to the x-axis.
    Scalar(f64),
    /// A sequence of one or two shear angles in degrees.
    Seq(Vec<f64>),
}

impl From<f64> for Shear {
    fn from(value: f64) -> Self {
        Shear::Scalar(value)
    }
}

impl From<[f64; 2]> for Shear {
    fn from(value: [f64; 2]) -> Self {
        Shear::Seq(value.to_vec())
    }
}

impl From<Vec<f64>> for Shear {
    fn from(value: Vec<f64>) -> Self {
        Shear::Seq(value)
    }
}

/// Fill value for regions outside the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// One value broadcast to every channel.
    Scalar(f64),
    /// Explicit per-channel values.
    Rgb([f64; 3]),
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Scalar(0.0)
    }
}

impl From<f64> for Fill {
    fn from(value: f64) -> Self {
        Fill::Scalar(value)
    }
}

impl From<[f64; 3]> for Fill {
    fn from(value: [f64; 3]) -> Self {
        Fill::Rgb(value)
    }
}

/// Target size argument for the resize and center-crop operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSpec {
    /// For resize: scale the shorter edge to this length, keeping the aspect
    /// ratio. For center-crop: a square of this side length.
    Scalar(usize),
    /// Explicit (height, width).
    Hw(usize, usize),
}

/// Options for the affine operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineOptions {
    /// Interpolation mode used for resampling.
    pub interpolation: InterpolationMode,
    /// Fill value for the area outside the transformed image.
    pub fill: Fill,
    /// Center of rotation in pixel coordinates, origin at the top-left
    /// corner. `None` selects the center of the image.
    pub center: Option<Vec<f64>>,
}

impl Default for AffineOptions {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMode::Nearest,
            fill: Fill::default(),
            center: None,
        }
    }
}

/// Options for the rotate operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateOptions {
    /// Interpolation mode used for resampling.
    pub interpolation: InterpolationMode,
    /// Grow the output canvas to hold the whole rotated image. Assumes
    /// rotation about the center and no translation.
    pub expand: bool,
    /// Center of rotation in pixel coordinates, origin at the top-left
    /// corner. `None` selects the center of the image.
    pub center: Option<Vec<f64>>,
    /// Fill value for the area outside the rotated image.
    pub fill: Fill,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMode::Nearest,
            expand: false,
            center: None,
            fill: Fill::default(),
        }
    }
}

/// Options for the perspective operation.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpOptions {
    /// Interpolation mode used for resampling.
    pub interpolation: InterpolationMode,
    /// Fill value for the area outside the transformed image.
    pub fill: Fill,
}

impl Default for WarpOptions {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMode::Nearest,
            fill: Fill::default(),
        }
    }
}

/// Normalize a padding argument into per-side widths.
///
/// One value pads all four sides, two values pad (left/right, top/bottom),
/// four values pad (left, top, right, bottom) independently.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] for any other length and for
/// negative values.
pub fn normalize_padding(padding: &[i64]) -> Result<Padding, TransformError> {
    let side = |value: i64| -> Result<usize, TransformError> {
        usize::try_from(value)
            .map_err(|_| TransformError::invalid("padding", format!("negative value {value}")))
    };
    match *padding {
        [all] => {
            let all = side(all)?;
            Ok(Padding {
                left: all,
                top: all,
                right: all,
                bottom: all,
            })
        }
        [horizontal, vertical] => Ok(Padding {
            left: side(horizontal)?,
            top: side(vertical)?,
            right: side(horizontal)?,
            bottom: side(vertical)?,
        }),
        [left, top, right, bottom] => Ok(Padding {
            left: side(left)?,
            top: side(top)?,
            right: side(right)?,
            bottom: side(bottom)?,
        }),
        _ => Err(TransformError::invalid(
            "padding",
            format!("expected 1, 2 or 4 values, got {}", padding.len()),
        )),
    }
}

/// Normalize a shear argument into an (x, y) degree pair.
pub fn normalize_shear(shear: &Shear) -> Result<[f64; 2], TransformError> {
    match shear {
        Shear::Scalar(s) => Ok([*s, 0.0]),
        Shear::Seq(seq) => match *seq.as_slice() {
            [s] => Ok([s, s]),
            [sx, sy] => Ok([sx, sy]),
            _ => Err(TransformError::invalid(
                "shear",
                format!("expected 1 or 2 values, got {}", seq.len()),
            )),
        },
    }
}

/// Normalize a translation argument, which must hold exactly two values.
pub fn normalize_translate(translate: &[f64]) -> Result<[f64; 2], TransformError> {
    match *translate {
        [tx, ty] => Ok([tx, ty]),
        _ => Err(TransformError::invalid(
            "translate",
            format!("expected exactly 2 values, got {}", translate.len()),
        )),
    }
}

/// Validate that a scale factor is strictly positive.
///
/// A zero or negative scale is geometrically degenerate and would make the
/// affine block non-invertible.
pub fn normalize_scale(scale: f64) -> Result<f64, TransformError> {
    if scale > 0.0 && scale.is_finite() {
        Ok(scale)
    } else {
        Err(TransformError::invalid(
            "scale",
            format!("must be strictly positive, got {scale}"),
        ))
    }
}

/// Normalize an optional center argument, which must hold exactly two values
/// when present.
pub fn normalize_center(center: Option<&[f64]>) -> Result<Option<[f64; 2]>, TransformError> {
    match center {
        None => Ok(None),
        Some([cx, cy]) => Ok(Some([*cx, *cy])),
        Some(other) => Err(TransformError::invalid(
            "center",
            format!("expected exactly 2 values, got {}", other.len()),
        )),
    }
}

/// Broadcast a fill argument to a per-channel triple.
pub fn normalize_fill(fill: Fill) -> [f64; 3] {
    match fill {
        Fill::Scalar(v) => [v, v, v],
        Fill::Rgb(rgb) => rgb,
    }
}

/// Resolve a resize size argument against the current image size.
///
/// A scalar scales the shorter edge to the given length, preserving the
/// aspect ratio; an explicit (height, width) passes through.
pub fn resize_size(spec: SizeSpec, current: ImageSize) -> Result<ImageSize, TransformError> {
    match spec {
        SizeSpec::Scalar(0) | SizeSpec::Hw(0, _) | SizeSpec::Hw(_, 0) => Err(
            TransformError::invalid("size", "dimensions must be non-zero"),
        ),
        SizeSpec::Scalar(short) => {
            let (w, h) = (current.width as f64, current.height as f64);
            if current.width < current.height {
                Ok(ImageSize {
                    width: short,
                    height: (short as f64 * h / w) as usize,
                })
            } else {
                Ok(ImageSize {
                    width: (short as f64 * w / h) as usize,
                    height: short,
                })
            }
        }
        SizeSpec::Hw(height, width) => Ok(ImageSize { width, height }),
    }
}

/// Resolve a center-crop size argument: a scalar selects a square box.
pub fn crop_size(spec: SizeSpec) -> Result<ImageSize, TransformError> {
    match spec {
        SizeSpec::Scalar(0) | SizeSpec::Hw(0, _) | SizeSpec::Hw(_, 0) => Err(
            TransformError::invalid("output_size", "dimensions must be non-zero"),
        ),
        SizeSpec::Scalar(side) => Ok(ImageSize {
            width: side,
            height: side,
        }),
        SizeSpec::Hw(height, width) => Ok(ImageSize { width, height }),
    }
}

/// Validate a color adjustment factor, which must be non-negative.
pub fn normalize_factor(name: &'static str, factor: f64) -> Result<f64, TransformError> {
    if factor >= 0.0 && factor.is_finite() {
        Ok(factor)
    } else {
        Err(TransformError::invalid(
            name,
            format!("must be non-negative, got {factor}"),
        ))
    }
}

/// Validate a hue shift factor, which must lie in [-0.5, 0.5].
pub fn normalize_hue_factor(factor: f64) -> Result<f64, TransformError> {
    if (-0.5..=0.5).contains(&factor) {
        Ok(factor)
    } else {
        Err(TransformError::invalid(
            "hue_factor",
            format!("must lie in [-0.5, 0.5], got {factor}"),
        ))
    }
}

/// Broadcast an erase value to one entry per channel.
pub fn normalize_erase_value(value: &[f64], channels: usize) -> Result<Vec<f64>, TransformError> {
    match value.len() {
        1 => Ok(vec![value[0]; channels]),
        n if n == channels => Ok(value.to_vec()),
        n => Err(TransformError::invalid(
            "value",
            format!("expected 1 or {channels} values, got {n}"),
        )),
    }
}

/// Broadcast and validate per-channel mean and standard deviation values.
///
/// Scalars broadcast to every channel; otherwise the length must match the
/// channel count. Zero standard deviations are rejected.
pub fn normalize_mean_std(
    mean: &[f64],
    std: &[f64],
    channels: usize,
) -> Result<(Vec<f64>, Vec<f64>), TransformError> {
    let broadcast = |name: &'static str, values: &[f64]| -> Result<Vec<f64>, TransformError> {
        match values.len() {
            1 => Ok(vec![values[0]; channels]),
            n if n == channels => Ok(values.to_vec()),
            n => Err(TransformError::invalid(
                name,
                format!("expected 1 or {channels} values, got {n}"),
            )),
        }
    };
    let mean = broadcast("mean", mean)?;
    let std = broadcast("std", std)?;
    if std.iter().any(|&s| s == 0.0) {
        return Err(TransformError::invalid("std", "contains a zero entry"));
    }
    Ok((mean, std))
}

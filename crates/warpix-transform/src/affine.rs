use warpix_image::ImageSize;

use crate::error::TransformError;

/// A 6-coefficient affine transformation `[a, b, c, d, e, f]`.
///
/// The coefficients always encode the *inverse* mapping from a destination
/// pixel to the source pixel to sample:
///
/// ```text
/// src_x = a * dst_x + b * dst_y + c
/// src_y = d * dst_x + e * dst_y + f
/// ```
///
/// Backends resample destination-driven, pulling a source position for every
/// destination pixel, so the forward map is never materialized.
pub type AffineMatrix = [f64; 6];

/// Shear angles at which cos() vanishes make the block non-invertible.
const SHEAR_EPS: f64 = 1e-9;

/// Derive the inverse affine matrix for a rotation-scale-shear transform
/// about a center point.
///
/// The forward transform is `T * C * RotateScaleShear * C^-1` with `C` the
/// center translation and `T` the extra translation; the returned matrix is
/// its inverse `C * RSS^-1 * C^-1 * T^-1`, composed in a single pass.
///
/// # Arguments
///
/// * `center` - Center of the transform in the backend's coordinate frame.
/// * `angle` - Rotation angle in degrees, clockwise.
/// * `translate` - Post-rotation translation in pixels.
/// * `scale` - Uniform scale factor, strictly positive.
/// * `shear` - Shear angles in degrees for the x and y axes.
///
/// # Errors
///
/// Returns [`TransformError::SingularTransform`] when either shear angle sits
/// at +/-90 degrees, where the shear block degenerates.
///
/// # Example
///
/// ```
/// use warpix_transform::affine::affine_matrix;
///
/// let m = affine_matrix([8.0, 4.5], 0.0, [0.0, 0.0], 1.0, [0.0, 0.0]).unwrap();
/// assert_eq!(m, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// ```
pub fn affine_matrix(
    center: [f64; 2],
    angle: f64,
    translate: [f64; 2],
    scale: f64,
    shear: [f64; 2],
) -> Result<AffineMatrix, TransformError> {
    let rot = angle.to_radians();
    let sx = shear[0].to_radians();
    let sy = shear[1].to_radians();

    if sx.cos().abs() < SHEAR_EPS {
        return Err(TransformError::SingularTransform(shear[0]));
    }
    if sy.cos().abs() < SHEAR_EPS {
        return Err(TransformError::SingularTransform(shear[1]));
    }

    // Rotation and shear without scaling. det([[a, b], [c, d]]) == 1 since
    // both the rotation and the shear sub-matrices have unit determinant.
    let a = (rot - sy).cos() / sy.cos();
    let b = -(rot - sy).cos() * sx.tan() / sy.cos() - rot.sin();
    let c = (rot - sy).sin() / sy.cos();
    let d = -(rot - sy).sin() * sx.tan() / sy.cos() + rot.cos();

    let [cx, cy] = center;
    let [tx, ty] = translate;

    // Adjugate inverse of the unit-determinant block, scale folded in.
    let mut matrix = [
        d / scale,
        -b / scale,
        0.0,
        -c / scale,
        a / scale,
        0.0,
    ];

    // RSS^-1 * C^-1 * T^-1
    matrix[2] += matrix[0] * (-cx - tx) + matrix[1] * (-cy - ty);
    matrix[5] += matrix[3] * (-cx - tx) + matrix[4] * (-cy - ty);
    // C * RSS^-1 * C^-1 * T^-1
    matrix[2] += cx;
    matrix[5] += cy;

    Ok(matrix)
}

/// Inverse matrix for a counter-clockwise rotation about a center point.
///
/// Rotation has no shear, so unlike [`affine_matrix`] this can never fail.
pub fn rotation_matrix(center: [f64; 2], angle: f64) -> AffineMatrix {
    let (sin, cos) = angle.to_radians().sin_cos();
    let [cx, cy] = center;

    let mut matrix = [cos, -sin, 0.0, sin, cos, 0.0];
    matrix[2] = cx - matrix[0] * cx - matrix[1] * cy;
    matrix[5] = cy - matrix[3] * cx - matrix[4] * cy;
    matrix
}

/// Apply an affine map to a point.
pub(crate) fn transform_point(x: f64, y: f64, m: &AffineMatrix) -> (f64, f64) {
    (
        m[0] * x + m[1] * y + m[2],
        m[3] * x + m[4] * y + m[5],
    )
}

/// Output canvas of a rotation with `expand`: the bounding box of the
/// forward-rotated image corners.
///
/// Returns the expanded size together with the bounding box origin, which the
/// caller folds into the inverse matrix to re-frame the output.
pub(crate) fn expanded_extent(
    size: ImageSize,
    center: [f64; 2],
    angle: f64,
) -> (ImageSize, [f64; 2]) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let [cx, cy] = center;
    let (w, h) = (size.width as f64, size.height as f64);

    let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (x, y) in corners {
        // forward counter-clockwise rotation about the center
        let qx = cx + (x - cx) * cos + (y - cy) * sin;
        let qy = cy - (x - cx) * sin + (y - cy) * cos;
        x_min = x_min.min(qx);
        x_max = x_max.max(qx);
        y_min = y_min.min(qy);
        y_max = y_max.max(qy);
    }

    let expanded = ImageSize {
        width: (x_max - x_min).round() as usize,
        height: (y_max - y_min).round() as usize,
    };
    (expanded, [x_min, y_min])
}

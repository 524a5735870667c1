use faer::prelude::SpSolverLstsq;

/// The 8 coefficients `[a, b, c, d, e, f, g, h]` of a projective transform.
///
/// For a destination pixel (x, y) the source position is:
///
/// ```text
/// src_x = (a*x + b*y + c) / (g*x + h*y + 1)
/// src_y = (d*x + e*y + f) / (g*x + h*y + 1)
/// ```
pub type PerspectiveCoeffs = [f64; 8];

/// Solve the projective transform coefficients from four point
/// correspondences.
///
/// Both slices hold corners in clockwise order: top-left, top-right,
/// bottom-right, bottom-left. The ordering is a contract of the caller and is
/// not validated. Each correspondence contributes two rows to an 8x8 linear
/// system which is solved by QR least squares, so a near-degenerate
/// configuration (collinear points) yields a best-effort result instead of
/// failing.
///
/// # Arguments
///
/// * `start_points` - Corners of the source quadrilateral.
/// * `end_points` - Corners of the destination quadrilateral.
///
/// # Example
///
/// ```
/// use warpix_transform::perspective::perspective_coeffs;
///
/// let corners = [[0.0, 0.0], [33.0, 0.0], [33.0, 25.0], [0.0, 25.0]];
/// let coeffs = perspective_coeffs(&corners, &corners);
/// assert!((coeffs[0] - 1.0).abs() < 1e-9);
/// assert!(coeffs[2].abs() < 1e-9);
/// ```
pub fn perspective_coeffs(
    start_points: &[[f64; 2]; 4],
    end_points: &[[f64; 2]; 4],
) -> PerspectiveCoeffs {
    let mut mat_a = faer::Mat::<f64>::zeros(8, 8);
    let mut mat_b = faer::Mat::<f64>::zeros(8, 1);

    for (i, (end, start)) in end_points.iter().zip(start_points.iter()).enumerate() {
        unsafe {
            mat_a.write_unchecked(2 * i, 0, end[0]);
            mat_a.write_unchecked(2 * i, 1, end[1]);
            mat_a.write_unchecked(2 * i, 2, 1.0);
            mat_a.write_unchecked(2 * i, 6, -start[0] * end[0]);
            mat_a.write_unchecked(2 * i, 7, -start[0] * end[1]);

            mat_a.write_unchecked(2 * i + 1, 3, end[0]);
            mat_a.write_unchecked(2 * i + 1, 4, end[1]);
            mat_a.write_unchecked(2 * i + 1, 5, 1.0);
            mat_a.write_unchecked(2 * i + 1, 6, -start[1] * end[0]);
            mat_a.write_unchecked(2 * i + 1, 7, -start[1] * end[1]);

            mat_b.write_unchecked(2 * i, 0, start[0]);
            mat_b.write_unchecked(2 * i + 1, 0, start[1]);
        }
    }

    let solution = mat_a.qr().solve_lstsq(mat_b);
    let coeffs = solution.col(0);

    [
        coeffs[0], coeffs[1], coeffs[2], coeffs[3], coeffs[4], coeffs[5], coeffs[6], coeffs[7],
    ]
}

/// Apply a projective map to a point.
pub(crate) fn transform_point(x: f64, y: f64, coeffs: &PerspectiveCoeffs) -> (f64, f64) {
    let w = coeffs[6] * x + coeffs[7] * y + 1.0;
    (
        (coeffs[0] * x + coeffs[1] * y + coeffs[2]) / w,
        (coeffs[3] * x + coeffs[4] * y + coeffs[5]) / w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CORNERS: [[f64; 2]; 4] = [[0.0, 0.0], [33.0, 0.0], [33.0, 25.0], [0.0, 25.0]];

    #[test]
    fn identical_points_solve_to_identity() {
        let coeffs = perspective_coeffs(&CORNERS, &CORNERS);
        let expected = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        for (got, want) in coeffs.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn shifted_end_points_solve_to_inverse_translation() {
        let shifted = CORNERS.map(|[x, y]| [x + 1.0, y + 1.0]);
        let coeffs = perspective_coeffs(&CORNERS, &shifted);
        let expected = [1.0, 0.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0];
        for (got, want) in coeffs.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn solved_map_pulls_end_points_back_to_start_points() {
        let end = [[3.0, 2.0], [32.0, 3.0], [30.0, 24.0], [2.0, 25.0]];
        let coeffs = perspective_coeffs(&CORNERS, &end);
        for (start, end) in CORNERS.iter().zip(end.iter()) {
            let (x, y) = transform_point(end[0], end[1], &coeffs);
            assert_relative_eq!(x, start[0], epsilon = 1e-6);
            assert_relative_eq!(y, start[1], epsilon = 1e-6);
        }
    }
}

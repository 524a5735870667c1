//! Shared color conversion helpers for the adjustment operations.

/// ITU-R 601 luma weights.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Luma of an RGB triple: Y = 0.299 * R + 0.587 * G + 0.114 * B.
pub(crate) fn luma(r: f32, g: f32, b: f32) -> f32 {
    RW * r + GW * g + BW * b
}

/// Convert an RGB triple to HSV.
///
/// The hue is in degrees [0, 360), saturation in [0, 1] and value keeps the
/// input scale, so the conversion works for both [0, 255] and [0, 1] data.
pub(crate) fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

/// Convert an HSV triple back to RGB. The hue wraps cyclically.
pub(crate) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = v - c;
    (r1 + m, g1 + m, b1 + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_white_is_full_scale() {
        assert!((luma(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
    }

    #[test]
    fn primary_hues() {
        let (h, s, v) = rgb_to_hsv(255.0, 0.0, 0.0);
        assert_eq!((h, s, v), (0.0, 1.0, 255.0));

        let (h, _, _) = rgb_to_hsv(0.0, 255.0, 0.0);
        assert_eq!(h, 120.0);

        let (h, _, _) = rgb_to_hsv(0.0, 0.0, 255.0);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn gray_has_zero_saturation() {
        let (h, s, v) = rgb_to_hsv(42.0, 42.0, 42.0);
        assert_eq!((h, s), (0.0, 0.0));
        assert_eq!(v, 42.0);
        assert_eq!(hsv_to_rgb(h, s, v), (42.0, 42.0, 42.0));
    }

    #[test]
    fn hsv_roundtrip() {
        for (r, g, b) in [
            (10.0, 200.0, 30.0),
            (255.0, 128.0, 0.0),
            (0.25, 0.5, 0.75),
        ] {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (rr, gg, bb) = hsv_to_rgb(h, s, v);
            assert!((r - rr).abs() < 1e-3, "r {r} vs {rr}");
            assert!((g - gg).abs() < 1e-3, "g {g} vs {gg}");
            assert!((b - bb).abs() < 1e-3, "b {b} vs {bb}");
        }
    }

    #[test]
    fn half_turn_of_red_is_cyan() {
        let (h, s, v) = rgb_to_hsv(255.0, 0.0, 0.0);
        let (r, g, b) = hsv_to_rgb(h + 180.0, s, v);
        assert_eq!((r, g, b), (0.0, 255.0, 255.0));
    }
}

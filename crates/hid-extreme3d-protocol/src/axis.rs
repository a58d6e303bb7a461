//! Axis normalization arithmetic.
//!
//! Bipolar axes map their raw range onto [-1.0, 1.0] with exact endpoints:
//! raw 0 gives exactly -1.0 and raw max gives exactly +1.0 (the scaled
//! numerator `raw * 2` is exact in an f64 and the division by max rounds to
//! the exact endpoint there). The slider is the one-sided variant of this
//! hardware family and maps onto [0.0, 1.0]; the two-sided slider seen on
//! some revisions is not implemented.

#![deny(static_mut_refs)]

/// Full-scale raw value of the stick X and Y axes (10-bit).
pub const STICK_AXIS_MAX: u16 = 1023;

/// Full-scale raw value of the twist axis (8-bit).
pub const TWIST_MAX: u8 = 255;

/// Full-scale raw value of the slider (8-bit).
pub const SLIDER_MAX: u8 = 255;

fn normalize_bipolar(raw: u32, max: u32) -> f64 {
    f64::from(raw) * 2.0 / f64::from(max) - 1.0
}

/// Normalize a raw stick axis value (0..=1023) to [-1.0, 1.0].
pub fn normalize_stick_axis(raw: u16) -> f64 {
    normalize_bipolar(u32::from(raw), u32::from(STICK_AXIS_MAX))
}

/// Normalize a raw twist value (0..=255) to [-1.0, 1.0].
pub fn normalize_twist(raw: u8) -> f64 {
    normalize_bipolar(u32::from(raw), u32::from(TWIST_MAX))
}

/// Normalize a raw slider value (0..=255) to [0.0, 1.0].
pub fn normalize_slider(raw: u8) -> f64 {
    f64::from(raw) / f64::from(SLIDER_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stick_axis_endpoints_are_exact() {
        assert_eq!(normalize_stick_axis(0), -1.0);
        assert_eq!(normalize_stick_axis(STICK_AXIS_MAX), 1.0);
    }

    #[test]
    fn twist_endpoints_are_exact() {
        assert_eq!(normalize_twist(0), -1.0);
        assert_eq!(normalize_twist(TWIST_MAX), 1.0);
    }

    #[test]
    fn slider_endpoints_are_exact() {
        assert_eq!(normalize_slider(0), 0.0);
        assert_eq!(normalize_slider(SLIDER_MAX), 1.0);
    }

    #[test]
    fn stick_axis_is_monotonic() {
        let mut last = normalize_stick_axis(0);
        for raw in 1..=STICK_AXIS_MAX {
            let v = normalize_stick_axis(raw);
            assert!(v > last, "raw {raw} must normalize above raw {}", raw - 1);
            last = v;
        }
    }

    #[test]
    fn slider_midpoint_matches_capture() {
        // 0x80 on the wire reads back as ~0.502, not 0.5: 128/255.
        let v = normalize_slider(0x80);
        assert!((v - 128.0 / 255.0).abs() < f64::EPSILON);
    }
}

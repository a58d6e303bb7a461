//! Property-based tests for the Extreme 3D Pro protocol crate.
//!
//! Uses proptest with 500 cases to verify invariants on:
//! - decode totality, purity, and declared field widths
//! - encode/decode round-trips over the full legal range of every field
//! - axis normalization bounds and exact endpoints
//! - hat table totality and out-of-table rejection
//! - button bit-scan ordering and 1-based numbering

use flight_stick_hid_extreme3d_protocol::{
    HAT_CENTERED, HatVector, INPUT_REPORT_LEN, ProtocolError, RawReport, decode_input_report,
    encode_input_report, normalize_slider, normalize_stick_axis, normalize_twist, parse_input,
    pressed_buttons,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    // ── Decoder totality and purity ──────────────────────────────────────────

    /// Every 7-byte buffer decodes, and decoding twice gives identical fields.
    #[test]
    fn prop_decode_total_and_pure(report in proptest::array::uniform7(0u8..=255u8)) {
        let first = decode_input_report(&report);
        let second = decode_input_report(&report);
        prop_assert!(first.is_ok(), "7-byte buffers must always decode");
        prop_assert_eq!(first, second, "decode must be referentially transparent");
    }

    /// Decoded fields never overflow their declared bit widths.
    #[test]
    fn prop_fields_stay_in_declared_widths(report in proptest::array::uniform7(0u8..=255u8)) {
        let raw = decode_input_report(&report).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(raw.x <= 1023, "x is a 10-bit field");
        prop_assert!(raw.y <= 1023, "y is a 10-bit field");
        prop_assert!(raw.hat <= 15, "hat is a 4-bit field");
    }

    /// Any length other than exactly 7 bytes is a contract violation.
    #[test]
    fn prop_wrong_length_rejected(len in 0usize..=32usize) {
        let buf = vec![0u8; len];
        let result = decode_input_report(&buf);
        if len == INPUT_REPORT_LEN {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result,
                Err(ProtocolError::InvalidReportLength { expected: 7, actual: len })
            );
        }
    }

    // ── Round-trip bit extraction ────────────────────────────────────────────

    /// Chosen field values survive an encode/decode round-trip exactly.
    #[test]
    fn prop_encode_decode_round_trip(
        x in 0u16..=1023u16,
        y in 0u16..=1023u16,
        hat in 0u8..=15u8,
        twist in 0u8..=255u8,
        buttons in 0u16..=0xFFFFu16,
        slider in 0u8..=255u8,
    ) {
        let raw = RawReport { x, y, hat, twist, buttons, slider };
        let wire = encode_input_report(&raw);
        let decoded = decode_input_report(&wire)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, raw, "every field must round-trip through the wire form");
    }

    // ── Axis normalization ───────────────────────────────────────────────────

    /// Stick normalization stays inside the closed interval [-1, 1].
    #[test]
    fn prop_stick_axis_in_range(raw in 0u16..=1023u16) {
        let v = normalize_stick_axis(raw);
        prop_assert!((-1.0..=1.0).contains(&v), "raw {} normalized to {}", raw, v);
    }

    /// Twist normalization stays inside the closed interval [-1, 1].
    #[test]
    fn prop_twist_in_range(raw in 0u8..=255u8) {
        let v = normalize_twist(raw);
        prop_assert!((-1.0..=1.0).contains(&v), "raw {} normalized to {}", raw, v);
    }

    /// Slider normalization stays inside the closed interval [0, 1].
    #[test]
    fn prop_slider_in_range(raw in 0u8..=255u8) {
        let v = normalize_slider(raw);
        prop_assert!((0.0..=1.0).contains(&v), "raw {} normalized to {}", raw, v);
    }

    // ── Hat table ────────────────────────────────────────────────────────────

    /// Every defined code maps to a vector with components in {-1, 0, 1};
    /// only the centered code maps to the origin.
    #[test]
    fn prop_hat_defined_codes_map_to_unit_steps(code in 0u8..=HAT_CENTERED) {
        let v = HatVector::from_code(code).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!((-1..=1).contains(&v.x));
        prop_assert!((-1..=1).contains(&v.y));
        prop_assert_eq!(v.is_centered(), code == HAT_CENTERED);
    }

    /// Codes 9-15 always fail, never silently clamp to centered.
    #[test]
    fn prop_hat_corrupt_codes_rejected(code in 9u8..=15u8) {
        prop_assert_eq!(
            HatVector::from_code(code),
            Err(ProtocolError::InvalidHatCode(code))
        );
    }

    /// A corrupt hat code fails full-report normalization too.
    #[test]
    fn prop_corrupt_hat_fails_parse(
        hat in 9u8..=15u8,
        x in 0u16..=1023u16,
        buttons in 0u16..=0xFFFFu16,
    ) {
        let wire = encode_input_report(&RawReport { x, hat, buttons, ..RawReport::default() });
        prop_assert_eq!(parse_input(&wire), Err(ProtocolError::InvalidHatCode(hat)));
    }

    // ── Button scan ──────────────────────────────────────────────────────────

    /// The scan is ascending, 1-based, and lists exactly the set bits.
    #[test]
    fn prop_button_scan_matches_mask(mask in 0u16..=0xFFFFu16) {
        let numbers: Vec<u8> = pressed_buttons(mask).collect();
        prop_assert_eq!(numbers.len(), mask.count_ones() as usize);
        for pair in numbers.windows(2) {
            prop_assert!(pair[0] < pair[1], "scan must be strictly ascending");
        }
        for n in &numbers {
            prop_assert!((1..=16).contains(n), "button numbers are 1-based");
            prop_assert_ne!(mask & (1u16 << (n - 1)), 0, "button {} bit must be set", n);
        }
    }
}

// ── Fixed boundary cases ─────────────────────────────────────────────────────

/// Raw zero and raw full-scale must hit the interval endpoints exactly.
#[test]
fn test_normalization_endpoints_exact() {
    assert_eq!(normalize_stick_axis(0), -1.0);
    assert_eq!(normalize_stick_axis(1023), 1.0);
    assert_eq!(normalize_twist(0), -1.0);
    assert_eq!(normalize_twist(255), 1.0);
    assert_eq!(normalize_slider(0), 0.0);
    assert_eq!(normalize_slider(255), 1.0);
}

/// The documented button scan vectors.
#[test]
fn test_button_scan_documented_vectors() {
    assert_eq!(pressed_buttons(0x0000).count(), 0);
    assert_eq!(pressed_buttons(0x0001).collect::<Vec<_>>(), vec![1]);
    assert_eq!(pressed_buttons(0x8001).collect::<Vec<_>>(), vec![1, 16]);
    assert_eq!(
        pressed_buttons(0xFFFF).collect::<Vec<_>>(),
        (1..=16).collect::<Vec<u8>>()
    );
}

//! Logitech Extreme 3D Pro HID protocol: input report decoding and
//! normalization.
//!
//! This crate is intentionally I/O-free. It provides pure functions and
//! types that can be tested without hardware: the bit-field extraction
//! from the stick's 7-byte input report, the hat-direction lookup, the
//! axis normalization arithmetic, and the button bit scan.

#![deny(static_mut_refs)]

pub mod axis;
pub mod buttons;
pub mod hat;
pub mod ids;
pub mod input;
pub mod report;

pub use axis::{
    SLIDER_MAX, STICK_AXIS_MAX, TWIST_MAX, normalize_slider, normalize_stick_axis, normalize_twist,
};
pub use buttons::{PressedButtons, pressed_buttons};
pub use hat::{HAT_CENTERED, HatVector};
pub use ids::{EXTREME_3D_PRO_PRODUCT_ID, LOGITECH_VENDOR_ID};
pub use input::{StickInput, parse_input};
pub use report::{BitField, INPUT_REPORT_LEN, RawReport, decode_input_report, encode_input_report};

use thiserror::Error;

/// Errors produced while decoding an input report.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The transport handed over a buffer that is not exactly one report.
    #[error("invalid input report length: expected {expected} bytes, got {actual}")]
    InvalidReportLength { expected: usize, actual: usize },

    /// Hat codes 9-15 are reachable from a corrupted report and are
    /// rejected rather than silently treated as centered.
    #[error("hat code 0x{0:X} is outside the defined range 0-8")]
    InvalidHatCode(u8),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

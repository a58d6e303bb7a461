//! Normalized input state derived from a raw report.

#![deny(static_mut_refs)]

use std::fmt;

use crate::axis::{normalize_slider, normalize_stick_axis, normalize_twist};
use crate::buttons::{PressedButtons, pressed_buttons};
use crate::hat::HatVector;
use crate::report::{RawReport, decode_input_report};
use crate::ProtocolResult;

/// One normalized joystick sample.
///
/// Stick and twist are in [-1.0, 1.0], slider in [0.0, 1.0], the hat is a
/// discrete direction vector, and buttons keep their wire bitmask (use
/// [`StickInput::pressed_buttons`] for 1-based numbers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickInput {
    pub stick: (f64, f64),
    pub hat: HatVector,
    pub twist: f64,
    pub slider: f64,
    pub buttons: u16,
}

impl StickInput {
    /// Normalize a decoded raw report.
    ///
    /// # Errors
    ///
    /// `InvalidHatCode` if the report carries an out-of-table hat code.
    pub fn from_raw(raw: &RawReport) -> ProtocolResult<Self> {
        Ok(Self {
            stick: (normalize_stick_axis(raw.x), normalize_stick_axis(raw.y)),
            hat: HatVector::from_code(raw.hat)?,
            twist: normalize_twist(raw.twist),
            slider: normalize_slider(raw.slider),
            buttons: raw.buttons,
        })
    }

    /// Ascending 1-based numbers of the pressed buttons.
    pub fn pressed_buttons(&self) -> PressedButtons {
        pressed_buttons(self.buttons)
    }
}

impl fmt::Display for StickInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stick: ({:.4}, {:.4}), hat: {}, buttons: {:?}, twist: {:.4}, slider: {:.4}",
            self.stick.0,
            self.stick.1,
            self.hat,
            self.pressed_buttons().collect::<Vec<_>>(),
            self.twist,
            self.slider,
        )
    }
}

/// Decode and normalize one 7-byte input report.
///
/// # Errors
///
/// `InvalidReportLength` for a buffer that is not one report;
/// `InvalidHatCode` for hat codes 9-15.
pub fn parse_input(report: &[u8]) -> ProtocolResult<StickInput> {
    StickInput::from_raw(&decode_input_report(report)?)
}

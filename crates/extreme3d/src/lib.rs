//! Normalized Extreme 3D Pro joystick state over a HID transport.
//!
//! [`Extreme3d`] owns exactly one snapshot: the most recently decoded
//! input report. The snapshot is replaced wholesale on every successful
//! poll and never mutated field by field, so an observer can never see a
//! half-updated state. There is no history; a new report supersedes the
//! old one entirely.
//!
//! Drivers for this stick traditionally hide hardware polls behind
//! ordinary property reads. Here the side effect is visible at the call
//! site instead: [`Extreme3d::update`] polls, the `&self` accessors only
//! read, and [`Extreme3d::sample`] does both in one call for consumers
//! that want per-access freshness.

#![deny(static_mut_refs)]

pub mod device;

pub use device::{Extreme3d, OpenOptions};

use flight_stick_hid_extreme3d_protocol::ProtocolError;
use openstick_hid_common::TransportError;
use thiserror::Error;

/// Errors raised by the device layer.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The transport could not be opened, or the mandatory initial
    /// blocking read produced no valid report. Fatal to construction.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

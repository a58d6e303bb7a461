//! Common HID utilities for OpenStick device crates.
//!
//! Protocol crates are I/O-free; this crate owns everything that touches
//! a device handle: metadata, the transport trait, the hidapi-backed
//! transport, and a scriptable mock for tests.

pub mod device_info;
pub mod transport;

pub use device_info::HidDeviceInfo;
pub use transport::{DeviceSelector, HidTransport, HidapiTransport, mock};

use thiserror::Error;

/// Errors raised at the transport seam.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no matching HID device: {0}")]
    DeviceNotFound(String),

    #[error("failed to open HID device: {0}")]
    OpenFailed(String),

    #[error("failed to read input report: {0}")]
    ReadFailed(String),

    #[error("device disconnected")]
    Disconnected,
}

pub type TransportResult<T> = Result<T, TransportError>;

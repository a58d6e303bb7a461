//! The Extreme 3D Pro device handle and its update semantics.

#![deny(static_mut_refs)]

use std::time::Duration;

use flight_stick_hid_extreme3d_protocol::{
    EXTREME_3D_PRO_PRODUCT_ID, HatVector, INPUT_REPORT_LEN, LOGITECH_VENDOR_ID, RawReport,
    StickInput, decode_input_report,
};
use hidapi::HidApi;
use openstick_hid_common::{DeviceSelector, HidDeviceInfo, HidTransport, HidapiTransport};
use tracing::{debug, trace};

use crate::{DeviceError, DeviceResult};

/// How to find the stick and how long the construction-time blocking read
/// may wait for its first report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    vendor_id: u16,
    product_id: u16,
    serial: Option<String>,
    path: Option<String>,
    init_timeout: Duration,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            vendor_id: LOGITECH_VENDOR_ID,
            product_id: EXTREME_3D_PRO_PRODUCT_ID,
            serial: None,
            path: None,
            init_timeout: Duration::from_secs(5),
        }
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vendor_id(mut self, vendor_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self
    }

    pub fn product_id(mut self, product_id: u16) -> Self {
        self.product_id = product_id;
        self
    }

    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Bound the construction-time blocking read. The hardware streams
    /// reports continuously, so expiry means the device is effectively
    /// absent.
    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = timeout;
        self
    }

    fn selector(&self) -> DeviceSelector {
        let mut selector = DeviceSelector::new(self.vendor_id, self.product_id);
        if let Some(serial) = &self.serial {
            selector = selector.with_serial(serial.clone());
        }
        if let Some(path) = &self.path {
            selector = selector.with_path(path.clone());
        }
        selector
    }
}

/// An opened Extreme 3D Pro holding the most recent input snapshot.
pub struct Extreme3d {
    transport: Box<dyn HidTransport>,
    raw: RawReport,
    input: StickInput,
}

impl Extreme3d {
    /// Open the stick and block until it delivers its first report.
    ///
    /// # Errors
    ///
    /// `DeviceUnavailable` when the transport cannot be opened or no valid
    /// report arrives within the configured timeout.
    pub fn open(api: &HidApi, options: OpenOptions) -> DeviceResult<Self> {
        let transport = HidapiTransport::open(api, &options.selector())
            .map_err(|e| DeviceError::DeviceUnavailable(e.to_string()))?;
        Self::from_transport(Box::new(transport), options.init_timeout)
    }

    /// Layer the state machine over an already-open transport.
    ///
    /// Performs the mandatory blocking initial read so every accessor has
    /// a valid snapshot behind it.
    ///
    /// # Errors
    ///
    /// `DeviceUnavailable` when the initial read errors, times out, or
    /// yields a buffer that does not decode.
    pub fn from_transport(
        mut transport: Box<dyn HidTransport>,
        init_timeout: Duration,
    ) -> DeviceResult<Self> {
        let timeout_ms = i32::try_from(init_timeout.as_millis()).unwrap_or(i32::MAX);

        let mut buf = [0u8; INPUT_REPORT_LEN];
        let n = transport
            .read_report(&mut buf, timeout_ms)
            .map_err(|e| DeviceError::DeviceUnavailable(e.to_string()))?;
        if n == 0 {
            return Err(DeviceError::DeviceUnavailable(format!(
                "no input report within {init_timeout:?}"
            )));
        }

        let raw = decode_input_report(&buf[..n])
            .map_err(|e| DeviceError::DeviceUnavailable(e.to_string()))?;
        let input = StickInput::from_raw(&raw)
            .map_err(|e| DeviceError::DeviceUnavailable(e.to_string()))?;

        debug!(device = %transport.device_info().label(), "initial report received");
        Ok(Self {
            transport,
            raw,
            input,
        })
    }

    /// Poll for a new report without blocking.
    ///
    /// `Ok(true)`: a fresh report arrived and the snapshot was replaced as
    /// a whole. `Ok(false)`: nothing new; the snapshot is untouched. No
    /// new data is the normal idle condition, not an error.
    ///
    /// # Errors
    ///
    /// `Transport` when the read fails, `Protocol` when the transport
    /// hands over a buffer that is not one valid report. The held
    /// snapshot survives either failure.
    pub fn update(&mut self) -> DeviceResult<bool> {
        let mut buf = [0u8; INPUT_REPORT_LEN];
        let n = self.transport.read_report(&mut buf, 0)?;
        if n == 0 {
            return Ok(false);
        }

        let raw = decode_input_report(&buf[..n])?;
        let input = StickInput::from_raw(&raw)?;
        self.raw = raw;
        self.input = input;
        trace!(?raw, "snapshot replaced");
        Ok(true)
    }

    /// Poll once, then return the (possibly unchanged) snapshot as one
    /// consistent value.
    ///
    /// # Errors
    ///
    /// As [`Extreme3d::update`].
    pub fn sample(&mut self) -> DeviceResult<StickInput> {
        self.update()?;
        Ok(self.input)
    }

    /// The whole normalized snapshot.
    pub fn input(&self) -> StickInput {
        self.input
    }

    /// The snapshot in native hardware units.
    pub fn raw_report(&self) -> RawReport {
        self.raw
    }

    /// Stick X, in [-1.0, 1.0].
    pub fn x(&self) -> f64 {
        self.input.stick.0
    }

    /// Stick Y, in [-1.0, 1.0].
    pub fn y(&self) -> f64 {
        self.input.stick.1
    }

    /// Both stick axes.
    pub fn stick(&self) -> (f64, f64) {
        self.input.stick
    }

    /// Hat direction vector.
    pub fn hat(&self) -> HatVector {
        self.input.hat
    }

    /// Twist, in [-1.0, 1.0].
    pub fn twist(&self) -> f64 {
        self.input.twist
    }

    /// Slider, in [0.0, 1.0].
    pub fn slider(&self) -> f64 {
        self.input.slider
    }

    /// Raw button bitmask.
    pub fn buttons(&self) -> u16 {
        self.input.buttons
    }

    /// Ascending 1-based numbers of the pressed buttons.
    pub fn pressed_buttons(&self) -> Vec<u8> {
        self.input.pressed_buttons().collect()
    }

    /// One-line human-readable rendering of the snapshot.
    pub fn summary(&self) -> String {
        self.input.to_string()
    }

    pub fn device_info(&self) -> &HidDeviceInfo {
        self.transport.device_info()
    }
}

//! The transport trait, its hidapi-backed implementation, and a mock.

use std::ffi::CString;

use hidapi::HidApi;
use tracing::debug;

use crate::{HidDeviceInfo, TransportError, TransportResult};

/// A source of fixed-length input reports.
///
/// Read semantics follow hidapi: a negative timeout blocks until a report
/// arrives, zero polls and returns immediately, positive waits up to that
/// many milliseconds. `Ok(0)` means no report was available within the
/// timeout; it is the normal idle condition, not an error.
pub trait HidTransport: Send {
    fn read_report(&mut self, buf: &mut [u8], timeout_ms: i32) -> TransportResult<usize>;

    fn device_info(&self) -> &HidDeviceInfo;
}

/// How to pick the device to open.
///
/// A platform path wins over a serial number, which wins over the plain
/// VID/PID pair (first matching device).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSelector {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial: Option<String>,
    pub path: Option<String>,
}

impl DeviceSelector {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            serial: None,
            path: None,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn describe(&self) -> String {
        match (&self.path, &self.serial) {
            (Some(path), _) => path.clone(),
            (None, Some(serial)) => {
                format!(
                    "{:04x}:{:04x} serial {serial}",
                    self.vendor_id, self.product_id
                )
            }
            (None, None) => format!("{:04x}:{:04x}", self.vendor_id, self.product_id),
        }
    }
}

/// Production transport over a hidapi device handle.
pub struct HidapiTransport {
    device: hidapi::HidDevice,
    info: HidDeviceInfo,
}

impl HidapiTransport {
    /// Open the device named by `selector`.
    ///
    /// # Errors
    ///
    /// `OpenFailed` when hidapi rejects the open; `DeviceNotFound` when a
    /// path selector cannot be represented on this platform.
    pub fn open(api: &HidApi, selector: &DeviceSelector) -> TransportResult<Self> {
        let device = match (&selector.path, &selector.serial) {
            (Some(path), _) => {
                let cpath = CString::new(path.as_str()).map_err(|e| {
                    TransportError::DeviceNotFound(format!("{}: {e}", selector.describe()))
                })?;
                api.open_path(&cpath)
            }
            (None, Some(serial)) => api.open_serial(selector.vendor_id, selector.product_id, serial),
            (None, None) => api.open(selector.vendor_id, selector.product_id),
        }
        .map_err(|e| TransportError::OpenFailed(format!("{}: {e}", selector.describe())))?;

        let info = HidDeviceInfo {
            vendor_id: selector.vendor_id,
            product_id: selector.product_id,
            serial_number: device.get_serial_number_string().ok().flatten(),
            product: device.get_product_string().ok().flatten(),
            path: selector.path.clone(),
        };

        debug!(device = %info.label(), "opened HID transport");
        Ok(Self { device, info })
    }
}

impl HidTransport for HidapiTransport {
    fn read_report(&mut self, buf: &mut [u8], timeout_ms: i32) -> TransportResult<usize> {
        self.device
            .read_timeout(buf, timeout_ms)
            .map_err(|e| TransportError::ReadFailed(e.to_string()))
    }

    fn device_info(&self) -> &HidDeviceInfo {
        &self.info
    }
}

pub mod mock {
    //! A scriptable transport for tests: reports are queued through a
    //! [`MockHandle`] and handed out one per read, regardless of the
    //! requested timeout. The handle shares state with the transport, so
    //! a test can keep scripting after the transport has been boxed and
    //! moved into a device.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::HidTransport;
    use crate::{HidDeviceInfo, TransportError, TransportResult};

    struct Shared {
        reads: Mutex<VecDeque<Vec<u8>>>,
        connected: Mutex<bool>,
    }

    pub struct MockTransport {
        info: HidDeviceInfo,
        shared: Arc<Shared>,
    }

    /// Scripting side of a [`MockTransport`].
    #[derive(Clone)]
    pub struct MockHandle {
        shared: Arc<Shared>,
    }

    impl MockTransport {
        pub fn new(vendor_id: u16, product_id: u16) -> Self {
            Self {
                info: HidDeviceInfo::new(vendor_id, product_id),
                shared: Arc::new(Shared {
                    reads: Mutex::new(VecDeque::new()),
                    connected: Mutex::new(true),
                }),
            }
        }

        pub fn handle(&self) -> MockHandle {
            MockHandle {
                shared: Arc::clone(&self.shared),
            }
        }

        /// Queue one report to be returned by a future read.
        pub fn queue_report(&self, data: impl Into<Vec<u8>>) {
            self.handle().queue_report(data);
        }

        /// Make every subsequent read fail with `Disconnected`.
        pub fn disconnect(&self) {
            self.handle().disconnect();
        }
    }

    impl MockHandle {
        pub fn queue_report(&self, data: impl Into<Vec<u8>>) {
            let mut reads = self.shared.reads.lock().unwrap_or_else(|e| e.into_inner());
            reads.push_back(data.into());
        }

        pub fn disconnect(&self) {
            let mut connected = self
                .shared
                .connected
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            *connected = false;
        }

        pub fn queued(&self) -> usize {
            let reads = self.shared.reads.lock().unwrap_or_else(|e| e.into_inner());
            reads.len()
        }
    }

    impl HidTransport for MockTransport {
        fn read_report(&mut self, buf: &mut [u8], _timeout_ms: i32) -> TransportResult<usize> {
            let connected = *self
                .shared
                .connected
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            if !connected {
                return Err(TransportError::Disconnected);
            }
            let mut reads = self.shared.reads.lock().unwrap_or_else(|e| e.into_inner());
            match reads.pop_front() {
                Some(data) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    Ok(n)
                }
                None => Ok(0),
            }
        }

        fn device_info(&self) -> &HidDeviceInfo {
            &self.info
        }
    }
}

//! Enum wrappers for scanner device dispatch.
//!
//! Native `async fn` in traits (RPITIT, Edition 2024) is not object-safe, so
//! `Box<dyn HidConnector>` is not an option. The enums in this module provide
//! concrete type dispatch instead. Because the types are concrete, the
//! compiler can also prove that the read loop future is `Send`, which the
//! [`ScannerService`](crate::ScannerService) needs to spawn it on Tokio.
//!
//! # Examples
//!
//! ```
//! use hidscan_hardware::devices::AnyHidConnector;
//! use hidscan_hardware::mock::MockHid;
//!
//! let (scanner, _handle) = MockHid::new();
//! let any_scanner = AnyHidConnector::from(scanner);
//!
//! // Can now be used polymorphically through the HidConnector trait
//! ```

use crate::hidraw::{HidrawConnector, HidrawReader};
use crate::mock::{MockHid, MockHidReader};
use crate::traits::{HidConnector, HidReader};
use crate::{DeviceInfo, Result};

/// Enum wrapper for scanner connector dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyHidConnector {
    /// Linux raw HID device node.
    Hidraw(HidrawConnector),

    /// Mock scanner for development and testing.
    Mock(MockHid),
}

impl HidConnector for AnyHidConnector {
    type Reader = AnyHidReader;

    async fn open(&mut self, path: &str) -> Result<AnyHidReader> {
        match self {
            Self::Hidraw(device) => device.open(path).await.map(AnyHidReader::Hidraw),
            Self::Mock(device) => device.open(path).await.map(AnyHidReader::Mock),
        }
    }

    fn info(&self) -> DeviceInfo {
        match self {
            Self::Hidraw(device) => device.info(),
            Self::Mock(device) => device.info(),
        }
    }
}

impl From<HidrawConnector> for AnyHidConnector {
    fn from(device: HidrawConnector) -> Self {
        Self::Hidraw(device)
    }
}

impl From<MockHid> for AnyHidConnector {
    fn from(device: MockHid) -> Self {
        Self::Mock(device)
    }
}

/// Enum wrapper for open scanner handles.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyHidReader {
    /// Handle on a raw HID device node.
    Hidraw(HidrawReader),

    /// Handle on a mock scanner.
    Mock(MockHidReader),
}

impl HidReader for AnyHidReader {
    async fn read_byte(&mut self) -> Result<u8> {
        match self {
            Self::Hidraw(reader) => reader.read_byte().await,
            Self::Mock(reader) => reader.read_byte().await,
        }
    }
}

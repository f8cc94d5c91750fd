//! Scanner device trait definitions.
//!
//! A scanner device is split in two: a [`HidConnector`] that knows how to
//! acquire a handle for a device path, and the [`HidReader`] handle it
//! returns. The connection manager owns both and is the only component that
//! reads from or drops a handle.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::DeviceInfo;

/// Byte-oriented handle to an open scanner device.
///
/// # Object Safety and Dynamic Dispatch
///
/// **NOTE**: This trait is NOT object-safe because `async fn` methods return
/// `impl Future`. Use generic type parameters, or the enum wrapper from the
/// [`devices`](crate::devices) module when a concrete type is needed (for
/// example to spawn the read loop on Tokio).
///
/// # Examples
///
/// ```no_run
/// use hidscan_hardware::traits::HidReader;
/// use hidscan_hardware::Result;
///
/// async fn read_report<R: HidReader>(reader: &mut R) -> Result<[u8; 8]> {
///     let mut report = [0u8; 8];
///     for byte in report.iter_mut() {
///         *byte = reader.read_byte().await?;
///     }
///     Ok(report)
/// }
/// ```
pub trait HidReader: Send + Sync {
    /// Read exactly one byte.
    ///
    /// Waits until a byte is available.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::ReadFailed` on an I/O failure and
    /// `HardwareError::Disconnected` when the device reports end of stream.
    async fn read_byte(&mut self) -> Result<u8>;
}

/// Acquires handles for a scanner device path.
///
/// # Examples
///
/// ```no_run
/// use hidscan_hardware::traits::{HidConnector, HidReader};
/// use hidscan_hardware::Result;
///
/// async fn first_byte<C: HidConnector>(connector: &mut C) -> Result<u8> {
///     let mut reader = connector.open("/dev/hidraw0").await?;
///     reader.read_byte().await
/// }
/// ```
pub trait HidConnector: Send + Sync {
    /// Handle type produced by a successful open.
    type Reader: HidReader;

    /// Open the device at `path` for raw binary reading.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::OpenFailed` when the handle cannot be acquired
    /// (missing node, permissions, device busy).
    async fn open(&mut self, path: &str) -> Result<Self::Reader>;

    /// Describe the device type behind this connector.
    fn info(&self) -> DeviceInfo;
}

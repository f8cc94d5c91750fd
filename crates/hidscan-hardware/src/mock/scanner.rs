//! Mock HID scanner for testing and development.
//!
//! This module provides a simulated raw HID device that can be fed bytes and
//! failures programmatically, so that the connection manager and the scanner
//! service can be exercised without physical hardware.

use crate::{
    HardwareError, Result,
    traits::{HidConnector, HidReader},
    types::DeviceInfo,
};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};
use tokio::sync::{Mutex, mpsc};

/// Something the mock device delivers to its current reader.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MockInput {
    /// Raw bytes, read back one at a time.
    Bytes(Vec<u8>),

    /// A read failure with the given message.
    Fail(String),
}

/// State shared between the connector, its readers and the handle.
#[derive(Debug)]
struct Shared {
    input_rx: Mutex<mpsc::UnboundedReceiver<MockInput>>,
    open_failures: AtomicUsize,
    unplugged: AtomicBool,
    opened_paths: std::sync::Mutex<Vec<String>>,
}

impl Shared {
    fn record_open(&self, path: &str) {
        self.opened_paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }

    /// Consume one pending injected open failure, if any.
    fn take_open_failure(&self) -> bool {
        self.open_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Mock scanner connector.
///
/// Every reader opened from the same `MockHid` drains the same input queue,
/// so bytes sent after a reconnect reach the new reader. Bytes a dropped
/// reader had already taken from the queue are lost, as they would be on a
/// real device.
///
/// # Examples
///
/// ```
/// use hidscan_hardware::mock::MockHid;
/// use hidscan_hardware::traits::{HidConnector, HidReader};
///
/// #[tokio::main]
/// async fn main() -> hidscan_hardware::Result<()> {
///     let (mut connector, handle) = MockHid::new();
///     handle.send_bytes([0x02, 0x0f, 0x28]);
///
///     let mut reader = connector.open("/dev/hidraw0").await?;
///     assert_eq!(reader.read_byte().await?, 0x02);
///     assert_eq!(reader.read_byte().await?, 0x0f);
///     assert_eq!(reader.read_byte().await?, 0x28);
///     assert_eq!(handle.opened_paths(), vec!["/dev/hidraw0".to_string()]);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockHid {
    shared: Arc<Shared>,
    name: String,
}

impl MockHid {
    /// Create a new mock scanner with the default name.
    ///
    /// Returns the connector together with a handle used to drive it.
    pub fn new() -> (Self, MockHidHandle) {
        Self::with_name("Mock HID Scanner")
    }

    /// Create a new mock scanner with a custom name.
    pub fn with_name(name: impl Into<String>) -> (Self, MockHidHandle) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();

        let shared = Arc::new(Shared {
            input_rx: Mutex::new(input_rx),
            open_failures: AtomicUsize::new(0),
            unplugged: AtomicBool::new(false),
            opened_paths: std::sync::Mutex::new(Vec::new()),
        });

        let connector = Self {
            shared: Arc::clone(&shared),
            name: name.into(),
        };

        let handle = MockHidHandle { input_tx, shared };

        (connector, handle)
    }
}

impl HidConnector for MockHid {
    type Reader = MockHidReader;

    async fn open(&mut self, path: &str) -> Result<MockHidReader> {
        self.shared.record_open(path);

        if self.shared.unplugged.load(Ordering::SeqCst) {
            return Err(HardwareError::open_failed(
                path,
                io::Error::new(io::ErrorKind::NotFound, "No such device"),
            ));
        }

        if self.shared.take_open_failure() {
            return Err(HardwareError::open_failed(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
            ));
        }

        Ok(MockHidReader {
            shared: Arc::clone(&self.shared),
            pending: VecDeque::new(),
            path: path.to_string(),
        })
    }

    fn info(&self) -> DeviceInfo {
        DeviceInfo::new(self.name.clone(), "Mock HID Scanner v1.0").with_firmware_version("1.0.0")
    }
}

/// Reader handle produced by [`MockHid`].
#[derive(Debug)]
pub struct MockHidReader {
    shared: Arc<Shared>,
    pending: VecDeque<u8>,
    path: String,
}

impl HidReader for MockHidReader {
    async fn read_byte(&mut self) -> Result<u8> {
        loop {
            if let Some(byte) = self.pending.pop_front() {
                return Ok(byte);
            }

            let next = self.shared.input_rx.lock().await.recv().await;
            match next {
                Some(MockInput::Bytes(bytes)) => self.pending.extend(bytes),
                Some(MockInput::Fail(message)) => return Err(HardwareError::read_failed(message)),
                None => return Err(HardwareError::disconnected(&self.path)),
            }
        }
    }
}

/// Handle for driving a [`MockHid`].
///
/// Cloneable; all clones control the same device.
#[derive(Debug, Clone)]
pub struct MockHidHandle {
    input_tx: mpsc::UnboundedSender<MockInput>,
    shared: Arc<Shared>,
}

impl MockHidHandle {
    /// Queue raw bytes for the current (or next) reader.
    pub fn send_bytes(&self, bytes: impl Into<Vec<u8>>) {
        // The receiver lives in `Shared`, which this handle keeps alive.
        let _ = self.input_tx.send(MockInput::Bytes(bytes.into()));
    }

    /// Make the read after all previously queued bytes fail.
    pub fn fail_next_read(&self, message: impl Into<String>) {
        let _ = self.input_tx.send(MockInput::Fail(message.into()));
    }

    /// Make the next `count` open attempts fail.
    pub fn fail_next_opens(&self, count: usize) {
        self.shared.open_failures.store(count, Ordering::SeqCst);
    }

    /// Simulate pulling the cable: the pending read fails once queued bytes
    /// are drained, and every open fails until [`plug`](Self::plug).
    pub fn unplug(&self) {
        self.shared.unplugged.store(true, Ordering::SeqCst);
        self.fail_next_read("device unplugged");
    }

    /// Make the device available again.
    pub fn plug(&self) {
        self.shared.unplugged.store(false, Ordering::SeqCst);
    }

    /// Paths passed to every open attempt so far, successful or not.
    pub fn opened_paths(&self) -> Vec<String> {
        self.shared
            .opened_paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of open attempts so far.
    pub fn open_count(&self) -> usize {
        self.shared
            .opened_paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_read_bytes_across_chunks() {
        let (mut connector, handle) = MockHid::new();
        let mut reader = connector.open("/dev/hidraw0").await.unwrap();

        handle.send_bytes(vec![0x04, 0x05]);
        handle.send_bytes([0x28]);

        assert_eq!(reader.read_byte().await.unwrap(), 0x04);
        assert_eq!(reader.read_byte().await.unwrap(), 0x05);
        assert_eq!(reader.read_byte().await.unwrap(), 0x28);
    }

    #[tokio::test]
    async fn test_mock_read_waits_for_input() {
        let (mut connector, handle) = MockHid::new();
        let mut reader = connector.open("/dev/hidraw0").await.unwrap();

        tokio::spawn(async move {
            tokio::task::yield_now().await;
            handle.send_bytes([0x1e]);
        });

        assert_eq!(reader.read_byte().await.unwrap(), 0x1e);
    }

    #[tokio::test]
    async fn test_mock_fail_next_read() {
        let (mut connector, handle) = MockHid::new();
        let mut reader = connector.open("/dev/hidraw0").await.unwrap();

        handle.send_bytes([0x04]);
        handle.fail_next_read("Input/output error");

        assert_eq!(reader.read_byte().await.unwrap(), 0x04);
        match reader.read_byte().await {
            Err(HardwareError::ReadFailed { message }) => {
                assert_eq!(message, "Input/output error");
            }
            other => panic!("Expected ReadFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mock_new_reader_continues_queue() {
        let (mut connector, handle) = MockHid::new();
        let mut first = connector.open("/dev/hidraw0").await.unwrap();

        handle.fail_next_read("gone");
        handle.send_bytes([0x07]);

        assert!(first.read_byte().await.is_err());
        drop(first);

        let mut second = connector.open("/dev/hidraw0").await.unwrap();
        assert_eq!(second.read_byte().await.unwrap(), 0x07);
    }

    #[tokio::test]
    async fn test_mock_fail_next_opens() {
        let (mut connector, handle) = MockHid::new();
        handle.fail_next_opens(2);

        assert!(matches!(
            connector.open("/dev/hidraw0").await,
            Err(HardwareError::OpenFailed { .. })
        ));
        assert!(connector.open("/dev/hidraw0").await.is_err());
        assert!(connector.open("/dev/hidraw0").await.is_ok());
        assert_eq!(handle.open_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_unplug_and_plug() {
        let (mut connector, handle) = MockHid::new();
        let mut reader = connector.open("/dev/hidraw0").await.unwrap();

        handle.unplug();
        assert!(reader.read_byte().await.is_err());
        assert!(connector.open("/dev/hidraw0").await.is_err());

        handle.plug();
        assert!(connector.open("/dev/hidraw0").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_records_paths() {
        let (mut connector, handle) = MockHid::new();

        connector.open("/dev/hidraw3").await.unwrap();
        connector.open("/dev/hidraw4").await.unwrap();

        assert_eq!(
            handle.opened_paths(),
            vec!["/dev/hidraw3".to_string(), "/dev/hidraw4".to_string()]
        );
    }

    #[test]
    fn test_mock_info() {
        let (connector, _handle) = MockHid::with_name("Bench Scanner");

        let info = connector.info();
        assert_eq!(info.name, "Bench Scanner");
        assert_eq!(info.model, "Mock HID Scanner v1.0");
        assert_eq!(info.firmware_version, Some("1.0.0".to_string()));
    }
}

//! Scanner device access for hidscan.
//!
//! This crate connects a HID barcode scanner in keyboard mode to the frame
//! decoder from `hidscan-protocol`, and reports the result through two narrow
//! capabilities supplied by the host application.
//!
//! # Design Philosophy
//!
//! - **Async-first**: device I/O uses native `async fn` in traits
//!   (Rust 1.90 + Edition 2024 RPITIT) on the Tokio runtime.
//! - **Enum dispatch**: the device traits are not object-safe, so concrete
//!   devices are wrapped in the enums from [`devices`].
//! - **Cancellable**: every blocking wait is raced against a
//!   `CancellationToken`; stopping the service never hangs on a quiet device.
//! - **Self-healing**: open and read failures become health transitions and
//!   retries, never errors surfaced to the host.
//!
//! # Components
//!
//! - [`HidConnector`] / [`HidReader`]: acquire a handle, read one byte.
//! - [`HidrawConnector`]: Linux `/dev/hidrawN` nodes.
//! - [`mock::MockHid`]: scripted device for tests.
//! - [`ConnectionManager`]: connection state machine with fixed-interval
//!   reconnects and deduplicated health reporting.
//! - [`ScannerService`]: background task tying the above to the decoder.
//! - [`EventSink`] / [`StatusSink`]: where barcodes and health go.
//!
//! # Example
//!
//! ```
//! use hidscan_core::{HealthStatus, ScannerConfig};
//! use hidscan_hardware::ScannerService;
//! use hidscan_hardware::mock::MockHid;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> hidscan_hardware::Result<()> {
//!     let (scanner, handle) = MockHid::new();
//!     let (event_tx, mut event_rx) = mpsc::unbounded_channel();
//!     let (status_tx, mut status_rx) = mpsc::unbounded_channel();
//!
//!     let config = ScannerConfig::default();
//!     let mut service = ScannerService::new(scanner, &config, event_tx, status_tx)?;
//!     service.start();
//!
//!     // Shift + 'l', then Enter
//!     handle.send_bytes([0x02, 0x0f, 0x28]);
//!
//!     let event = event_rx.recv().await.unwrap();
//!     assert_eq!(event.barcode(), Some("L"));
//!     assert_eq!(status_rx.recv().await, Some(HealthStatus::Warning));
//!     assert_eq!(status_rx.recv().await, Some(HealthStatus::Ok));
//!
//!     service.stop().await;
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod devices;
pub mod error;
pub mod hidraw;
pub mod mock;
pub mod service;
pub mod sink;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use connection::ConnectionManager;
pub use devices::{AnyHidConnector, AnyHidReader};
pub use error::{HardwareError, Result};
pub use hidraw::{HidrawConnector, HidrawReader};
pub use service::ScannerService;
pub use sink::{EventSink, StatusSink};
pub use traits::{HidConnector, HidReader};
pub use types::{ConnectionState, DeviceInfo};

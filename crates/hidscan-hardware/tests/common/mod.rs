//! Shared fixtures for scanner service integration tests.

#![allow(dead_code)]

use hidscan_core::{BarcodeEvent, HealthStatus, ScannerConfig};
use hidscan_hardware::ScannerService;
use hidscan_hardware::mock::{MockHid, MockHidHandle};
use std::sync::Once;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Raw capture of the barcode `LS01` (67 bytes, delimiter included).
pub const LS01_CAPTURE: &[u8] = &[
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x0f, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x16, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x27, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1e, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x28,
];

pub type ChannelService =
    ScannerService<mpsc::UnboundedSender<BarcodeEvent>, mpsc::UnboundedSender<HealthStatus>>;

pub struct Harness {
    pub service: ChannelService,
    pub device: MockHidHandle,
    pub events: mpsc::UnboundedReceiver<BarcodeEvent>,
    pub statuses: mpsc::UnboundedReceiver<HealthStatus>,
}

static TRACING: Once = Once::new();

/// Route service logs to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a stopped service on a mock device.
pub fn harness(config: &ScannerConfig) -> Harness {
    init_tracing();

    let (connector, device) = MockHid::new();
    let (event_tx, events) = mpsc::unbounded_channel();
    let (status_tx, statuses) = mpsc::unbounded_channel();

    let service = ScannerService::new(connector, config, event_tx, status_tx)
        .expect("valid test configuration");

    Harness {
        service,
        device,
        events,
        statuses,
    }
}

/// Everything currently queued on a receiver.
pub fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}

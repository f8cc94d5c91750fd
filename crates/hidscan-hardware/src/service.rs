//! Barcode scanner service.
//!
//! The `ScannerService` runs the whole pipeline on a single background task:
//!
//! ```text
//! ┌──────────────┐  bytes  ┌──────────────┐ frames ┌───────────┐
//! │ Connection   │────────►│ FrameDecoder │───────►│ EventSink │
//! │ Manager      │         └──────────────┘        └───────────┘
//! │              │ health                          ┌────────────┐
//! │              │────────────────────────────────►│ StatusSink │
//! └──────────────┘                                 └────────────┘
//! ```
//!
//! Device failures never escape the task. A failed open is retried after the
//! configured interval; a failed read drops the handle, discards the partial
//! frame and goes straight back to opening the device.
//!
//! # Examples
//!
//! ```no_run
//! use hidscan_core::ScannerConfig;
//! use hidscan_hardware::{HidrawConnector, ScannerService};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> hidscan_hardware::Result<()> {
//!     let config = ScannerConfig::new("/dev/hidraw0");
//!     let (event_tx, mut event_rx) = mpsc::unbounded_channel();
//!     let (status_tx, _status_rx) = mpsc::unbounded_channel();
//!
//!     let mut service = ScannerService::new(HidrawConnector::new(), &config, event_tx, status_tx)?;
//!     service.start();
//!
//!     if let Some(event) = event_rx.recv().await {
//!         println!("Scanned: {:?}", event.barcode());
//!     }
//!
//!     service.stop().await;
//!     Ok(())
//! }
//! ```

use crate::connection::ConnectionManager;
use crate::devices::AnyHidConnector;
use crate::error::Result;
use crate::sink::{EventSink, StatusSink};
use hidscan_core::{BarcodeEvent, ConfigSource, EmptyFramePolicy};
use hidscan_protocol::FrameDecoder;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

type Manager<S> = ConnectionManager<Arc<S>>;

/// Reads a scanner device and reports decoded barcodes.
///
/// # Lifecycle
///
/// 1. Create the service with a connector, configuration and sinks
/// 2. Call `start()` to spawn the background task
/// 3. Barcodes and health changes arrive at the sinks
/// 4. Call `stop().await` to cancel the task and release the device
///
/// A stopped service can be started again.
pub struct ScannerService<E, S>
where
    E: EventSink + 'static,
    S: StatusSink + 'static,
{
    /// Present while the service is idle; moved into the task while running.
    manager: Option<Manager<S>>,

    event_sink: Arc<E>,
    empty_frames: EmptyFramePolicy,
    running: Option<Running<S>>,
}

struct Running<S: StatusSink + 'static> {
    cancel: CancellationToken,
    task: JoinHandle<Manager<S>>,
}

impl<E, S> ScannerService<E, S>
where
    E: EventSink + 'static,
    S: StatusSink + 'static,
{
    /// Create a stopped service. The device is not touched until `start()`.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::Config` if the configuration fails validation.
    pub fn new(
        connector: impl Into<AnyHidConnector>,
        config: &impl ConfigSource,
        event_sink: E,
        status_sink: S,
    ) -> Result<Self> {
        config.validate()?;

        let manager = ConnectionManager::new(
            connector.into(),
            config.device(),
            config.reconnect_interval(),
            Arc::new(status_sink),
        );

        Ok(Self {
            manager: Some(manager),
            event_sink: Arc::new(event_sink),
            empty_frames: config.empty_frame_policy(),
            running: None,
        })
    }

    /// Spawn the background task. Returns immediately.
    ///
    /// Must be called from within a Tokio runtime. Calling it while the
    /// service is running only logs a warning.
    pub fn start(&mut self) {
        if self.running.is_some() {
            warn!("Scanner service already running");
            return;
        }

        let Some(manager) = self.manager.take() else {
            error!("Scanner service cannot start: device state was lost");
            return;
        };

        info!(device = %manager.device_path(), "Starting scanner service");

        let cancel = CancellationToken::new();
        let task = tokio::spawn(Self::run(
            manager,
            Arc::clone(&self.event_sink),
            self.empty_frames,
            cancel.clone(),
        ));

        self.running = Some(Running { cancel, task });
    }

    /// Cancel the background task and wait for it to release the device.
    ///
    /// Safe to call before `start()` and more than once.
    pub async fn stop(&mut self) {
        let Some(Running { cancel, task }) = self.running.take() else {
            debug!("Scanner service not running");
            return;
        };

        cancel.cancel();

        match task.await {
            Ok(manager) => {
                info!(device = %manager.device_path(), "Scanner service stopped");
                self.manager = Some(manager);
            }
            Err(e) => error!(error = %e, "Scanner task terminated abnormally"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.task.is_finished())
    }

    async fn run(
        mut manager: Manager<S>,
        events: Arc<E>,
        empty_frames: EmptyFramePolicy,
        cancel: CancellationToken,
    ) -> Manager<S> {
        let mut decoder = FrameDecoder::new();

        'session: loop {
            if manager.open(&cancel).await.is_err() {
                break;
            }

            loop {
                match manager.read_byte(&cancel).await {
                    Ok(byte) => {
                        if let Some(text) = decoder.feed(byte) {
                            Self::dispatch(events.as_ref(), empty_frames, text);
                        }
                    }
                    Err(e) if e.is_cancelled() => break 'session,
                    Err(e) => {
                        // No backoff here: only failed opens wait.
                        debug!(error = %e, "Reopening scanner after read failure");
                        // A frame cut by the failure must not merge with the
                        // first frame after reconnecting.
                        decoder.reset();
                        continue 'session;
                    }
                }
            }
        }

        manager.close();
        manager
    }

    fn dispatch(events: &E, empty_frames: EmptyFramePolicy, text: String) {
        let event = BarcodeEvent::from_decoded(text);

        if event.is_empty() && empty_frames == EmptyFramePolicy::Suppress {
            debug!("Empty frame suppressed");
            return;
        }

        debug!(barcode = ?event.barcode(), "Barcode decoded");
        events.emit(event);
    }
}

impl<E, S> std::fmt::Debug for ScannerService<E, S>
where
    E: EventSink + 'static,
    S: StatusSink + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerService")
            .field("empty_frames", &self.empty_frames)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

//! Outbound capabilities of the scanner.
//!
//! The service reports decoded barcodes through an [`EventSink`] and health
//! transitions through a [`StatusSink`]. Both are called from the scanner's
//! background task and must return promptly.

use hidscan_core::{BarcodeEvent, HealthStatus};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

/// Receives one event per completed barcode frame.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BarcodeEvent);
}

/// Receives health status changes.
pub trait StatusSink: Send + Sync {
    fn status_changed(&self, status: HealthStatus);
}

impl EventSink for mpsc::UnboundedSender<BarcodeEvent> {
    fn emit(&self, event: BarcodeEvent) {
        if self.send(event).is_err() {
            trace!("Barcode event dropped: receiver closed");
        }
    }
}

impl StatusSink for mpsc::UnboundedSender<HealthStatus> {
    fn status_changed(&self, status: HealthStatus) {
        if self.send(status).is_err() {
            trace!(%status, "Health status dropped: receiver closed");
        }
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: BarcodeEvent) {
        (**self).emit(event);
    }
}

impl<T: StatusSink + ?Sized> StatusSink for Arc<T> {
    fn status_changed(&self, status: HealthStatus) {
        (**self).status_changed(status);
    }
}

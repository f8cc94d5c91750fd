//! Device connection lifecycle.
//!
//! [`ConnectionManager`] owns the connector, the open handle and the
//! [`ConnectionState`]. It retries failed opens on a fixed interval, forever,
//! and reports every health change to a [`StatusSink`]. Both waits it performs
//! (the device read and the reconnect delay) are raced against a
//! [`CancellationToken`], so a stop request is honored promptly.
//!
//! ```text
//!            open()                       read_byte() error
//! Connecting ───────► Connected ─────────────────────────► Failed(reason)
//!   ▲    │ error                                                │
//!   │    ▼                                                      │
//!   └─ Failed(reason) ◄── sleep(reconnect_interval) ◄───────────┘ (next open())
//! ```

use crate::devices::AnyHidConnector;
use crate::error::{HardwareError, Result};
use crate::sink::StatusSink;
use crate::traits::{HidConnector, HidReader};
use crate::types::ConnectionState;
use hidscan_core::HealthStatus;
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Owns a scanner device handle and its connection state.
pub struct ConnectionManager<S, C = AnyHidConnector>
where
    C: HidConnector,
{
    connector: C,
    reader: Option<C::Reader>,
    device_path: String,
    reconnect_interval: Duration,
    state: ConnectionState,
    last_health: Option<HealthStatus>,
    status_sink: S,
}

impl<S, C> ConnectionManager<S, C>
where
    S: StatusSink,
    C: HidConnector,
{
    /// Create a manager in the `Disconnected` state. No I/O is performed.
    pub fn new(
        connector: C,
        device_path: impl Into<String>,
        reconnect_interval: Duration,
        status_sink: S,
    ) -> Self {
        Self {
            connector,
            reader: None,
            device_path: device_path.into(),
            reconnect_interval,
            state: ConnectionState::Disconnected,
            last_health: None,
            status_sink,
        }
    }

    /// Open the device, retrying until it succeeds.
    ///
    /// Any handle already held is dropped first. Each failed attempt moves the
    /// state to `Failed` and waits `reconnect_interval` before the next one.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::Cancelled` if `cancel` fires; open failures are
    /// never returned.
    pub async fn open(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.reader = None;

        loop {
            if cancel.is_cancelled() {
                return Err(HardwareError::Cancelled);
            }

            self.set_state(ConnectionState::Connecting);
            debug!(device = %self.device_path, "Opening scanner device");

            let attempt = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(HardwareError::Cancelled),
                result = self.connector.open(&self.device_path) => result,
            };

            match attempt {
                Ok(reader) => {
                    self.reader = Some(reader);
                    self.set_state(ConnectionState::Connected);
                    info!(
                        device = %self.device_path,
                        name = %self.connector.info().name,
                        "Scanner connected"
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        device = %self.device_path,
                        error = %e,
                        retry_in = ?self.reconnect_interval,
                        "Failed to open scanner device"
                    );
                    self.set_state(ConnectionState::Failed(e.to_string()));

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(HardwareError::Cancelled),
                        _ = tokio::time::sleep(self.reconnect_interval) => {}
                    }
                }
            }
        }
    }

    /// Read one byte from the open handle.
    ///
    /// # Errors
    ///
    /// - `HardwareError::NotConnected` if no handle is open.
    /// - `HardwareError::Cancelled` if `cancel` fires; the handle is kept.
    /// - `HardwareError::ReadFailed` for any device failure, including end of
    ///   stream. The handle is dropped and the state becomes `Failed`.
    pub async fn read_byte(&mut self, cancel: &CancellationToken) -> Result<u8> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(HardwareError::NotConnected);
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(HardwareError::Cancelled),
            result = reader.read_byte() => result,
        };

        match result {
            Ok(byte) => Ok(byte),
            Err(e) => {
                let message = match e {
                    HardwareError::ReadFailed { message } => message,
                    other => other.to_string(),
                };
                warn!(device = %self.device_path, error = %message, "Scanner read failed");

                self.reader = None;
                self.set_state(ConnectionState::Failed(message.clone()));
                Err(HardwareError::read_failed(message))
            }
        }
    }

    /// Drop the handle, if any. Idempotent.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            info!(device = %self.device_path, "Scanner closed");
        }
        self.set_state(ConnectionState::Disconnected);
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Last health status reported to the sink.
    pub fn health(&self) -> Option<HealthStatus> {
        self.last_health
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    pub fn is_connected(&self) -> bool {
        self.reader.is_some() && self.state.is_connected()
    }

    fn set_state(&mut self, state: ConnectionState) {
        if let Some(health) = state.health()
            && self.last_health != Some(health)
        {
            self.last_health = Some(health);
            debug!(device = %self.device_path, %health, "Health changed");
            self.status_sink.status_changed(health);
        }
        self.state = state;
    }
}

impl<S, C> fmt::Debug for ConnectionManager<S, C>
where
    C: HidConnector,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("device_path", &self.device_path)
            .field("reconnect_interval", &self.reconnect_interval)
            .field("state", &self.state)
            .field("last_health", &self.last_health)
            .finish_non_exhaustive()
    }
}

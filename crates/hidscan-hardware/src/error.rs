//! Error types for scanner device operations.
//!
//! None of these errors escape [`ScannerService`](crate::ScannerService):
//! open and read failures are turned into health transitions and retries.
//! They are public so that device implementations and the connection
//! manager can be driven directly.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while opening or reading a scanner device.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// The device handle could not be acquired.
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An established handle stopped producing bytes.
    #[error("Read failed: {message}")]
    ReadFailed { message: String },

    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// A read was attempted without an open handle.
    #[error("Device not connected")]
    NotConnected,

    /// The operation was interrupted by a stop request.
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] hidscan_core::Error),
}

impl HardwareError {
    /// Create a new open failure.
    pub fn open_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::OpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a new read failure.
    pub fn read_failed(message: impl Into<String>) -> Self {
        Self::ReadFailed {
            message: message.into(),
        }
    }

    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Whether this error was caused by a stop request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

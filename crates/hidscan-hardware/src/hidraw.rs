//! Linux `hidraw` scanner device.
//!
//! A barcode scanner in HID keyboard mode shows up as `/dev/hidrawN`. Each
//! scan produces a stream of fixed-size input reports; the raw bytes are
//! consumed one at a time by the frame decoder.
//!
//! The node is opened with `O_NONBLOCK` and polled through Tokio's reactor,
//! so a pending read holds no thread: dropping the read future abandons it,
//! and dropping the [`HidrawReader`] closes the descriptor.

use crate::error::{HardwareError, Result};
use crate::traits::{HidConnector, HidReader};
use crate::types::DeviceInfo;
use std::fs::File;
use std::io::{self, Read};
use tokio::fs::OpenOptions;
use tokio::io::unix::AsyncFd;

/// Largest input report read in one go. hidraw returns one whole report per
/// read, truncated to the buffer size; scanner reports are 8 bytes.
const REPORT_BUFFER_LEN: usize = 64;

/// Opens raw HID device nodes read-only.
#[derive(Debug, Clone, Default)]
pub struct HidrawConnector;

impl HidrawConnector {
    pub fn new() -> Self {
        Self
    }
}

impl HidConnector for HidrawConnector {
    type Reader = HidrawReader;

    async fn open(&mut self, path: &str) -> Result<HidrawReader> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .await
            .map_err(|e| HardwareError::open_failed(path, e))?
            .into_std()
            .await;

        // Fails for nodes the reactor cannot poll, such as regular files.
        let fd = AsyncFd::new(file).map_err(|e| HardwareError::open_failed(path, e))?;

        Ok(HidrawReader {
            fd,
            report: [0; REPORT_BUFFER_LEN],
            len: 0,
            pos: 0,
            path: path.to_string(),
        })
    }

    fn info(&self) -> DeviceInfo {
        DeviceInfo::new("hidraw", "Linux raw HID")
    }
}

/// Open handle to a raw HID device node.
#[derive(Debug)]
pub struct HidrawReader {
    fd: AsyncFd<File>,

    /// Last report read; bytes `pos..len` are still unconsumed.
    report: [u8; REPORT_BUFFER_LEN],
    len: usize,
    pos: usize,

    path: String,
}

impl HidrawReader {
    /// Path this handle was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Read the next report into the buffer, waiting until one is available.
    async fn fill(&mut self) -> Result<()> {
        loop {
            let mut guard = self
                .fd
                .readable()
                .await
                .map_err(|e| HardwareError::read_failed(e.to_string()))?;

            let report = &mut self.report;
            match guard.try_io(|inner| inner.get_ref().read(report)) {
                Ok(Ok(0)) => return Err(HardwareError::disconnected(&self.path)),
                Ok(Ok(n)) => {
                    self.len = n;
                    self.pos = 0;
                    return Ok(());
                }
                Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Ok(Err(e)) => return Err(HardwareError::read_failed(e.to_string())),
                Err(_would_block) => continue,
            }
        }
    }
}

impl HidReader for HidrawReader {
    async fn read_byte(&mut self) -> Result<u8> {
        if self.pos == self.len {
            self.fill().await?;
        }

        let byte = self.report[self.pos];
        self.pos += 1;
        Ok(byte)
    }
}

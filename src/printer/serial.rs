//! # Serial Printer Transport
//!
//! Raw serial communication with the thermal printer over a TTY device
//! (typically `/dev/ttyAMA0` or a USB-serial adapter).
//!
//! ## TTY Configuration
//!
//! The device is opened write-only and switched to raw mode so binary
//! command data passes through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR,
//!   IGNCR, ICRNL and XON/XOFF flow control all disabled
//! - **No output processing**: OPOST off (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, no canonical mode**
//!
//! Disabling XON/XOFF matters: 0x11 (DC1) and 0x13 (DC3) occur freely
//! in raster data.
//!
//! ## Chunked Writes
//!
//! The printer has a small receive buffer and no hardware flow control
//! at the baud rates these units ship with. Large blocks (a full image
//! is ~30 KB) are written in chunks with a short delay between them so
//! the print head keeps up.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::thread;
use std::time::Duration;

use super::{Printer, Raster, escpos};
use crate::error::TiradaError;

/// Default printer baud rate
pub const DEFAULT_BAUD_RATE: u32 = 19200;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 1024;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 5;

/// # Serial Printer
///
/// Owns the TTY handle and implements the [`Printer`] capability by
/// compiling each operation to ESC/POS bytes and streaming them out.
pub struct SerialPrinter {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl SerialPrinter {
    /// Open and configure the printer TTY.
    ///
    /// ## Errors
    ///
    /// Returns [`TiradaError::Printer`] if the device cannot be opened,
    /// the baud rate is unsupported, or TTY configuration fails.
    pub fn open<P: AsRef<Path>>(device: P, baud_rate: u32) -> Result<Self, TiradaError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            TiradaError::Printer(format!("Failed to open {}: {e}", path.display()))
        })?;

        configure_tty(file.as_raw_fd(), baud_rate)?;

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Write command data to the printer, chunking large blocks.
    fn write_all(&mut self, data: &[u8]) -> Result<(), TiradaError> {
        for chunk in data.chunks(self.chunk_size) {
            self.file
                .write_all(chunk)
                .map_err(|e| TiradaError::Printer(format!("Write failed: {e}")))?;

            if data.len() > self.chunk_size && !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }

        self.file
            .flush()
            .map_err(|e| TiradaError::Printer(format!("Flush failed: {e}")))
    }
}

impl Printer for SerialPrinter {
    fn print_image(&mut self, png: &[u8]) -> Result<(), TiradaError> {
        let raster = Raster::decode_png(png)?;
        self.write_all(&escpos::bit_image_column(&raster))
    }

    fn print_text(&mut self, line: &str) -> Result<(), TiradaError> {
        self.write_all(&escpos::text(line))
    }

    fn reset(&mut self) -> Result<(), TiradaError> {
        let mut data = escpos::hardware_reset();
        data.extend_from_slice(&escpos::init());
        self.write_all(&data)
    }
}

/// Map a numeric baud rate to its termios speed constant.
fn baud_constant(baud_rate: u32) -> Option<libc::speed_t> {
    match baud_rate {
        9600 => Some(libc::B9600),
        19200 => Some(libc::B19200),
        38400 => Some(libc::B38400),
        57600 => Some(libc::B57600),
        115_200 => Some(libc::B115200),
        _ => None,
    }
}

/// Configure a file descriptor for raw serial output at the given baud
/// rate.
fn configure_tty(fd: i32, baud_rate: u32) -> Result<(), TiradaError> {
    use std::mem::MaybeUninit;

    let speed = baud_constant(baud_rate).ok_or_else(|| {
        TiradaError::Printer(format!("Unsupported baud rate: {baud_rate}"))
    })?;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(TiradaError::Printer(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    // Input flags: disable all processing, including XON/XOFF flow
    // control (0x11/0x13 appear in binary raster data)
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    // Output flags: disable post-processing
    termios.c_oflag &= !libc::OPOST;

    // Local flags: disable echo, canonical mode, signals
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // Control flags: 8-bit characters, no parity
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    unsafe {
        libc::cfsetispeed(&mut termios, speed);
        libc::cfsetospeed(&mut termios, speed);
    }

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(TiradaError::Printer(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baud_constants() {
        assert_eq!(baud_constant(19200), Some(libc::B19200));
        assert_eq!(baud_constant(115_200), Some(libc::B115200));
        assert!(baud_constant(12345).is_none());
    }

    #[test]
    fn test_open_missing_device_fails() {
        assert!(matches!(
            SerialPrinter::open("/nonexistent/ttyAMA9", DEFAULT_BAUD_RATE),
            Err(TiradaError::Printer(_))
        ));
    }
}

//! # HT16K33 Seven-Segment Backpack
//!
//! Driver for the Holtek HT16K33 LED controller behind the common
//! 4-digit 0.56" seven-segment I2C backpack.
//!
//! ## Protocol
//!
//! The controller is command-driven over I2C:
//!
//! | Command | Bytes | Effect |
//! |---------|-------|--------|
//! | System setup | `0x21` | Turn the internal oscillator on |
//! | Display setup | `0x81` | Display on, blinking off |
//! | Brightness | `0xE0 \| n` | Duty cycle, n = 0..=15 |
//! | RAM write | `0x00` + 16 bytes | Full framebuffer update |
//!
//! ## Framebuffer Layout
//!
//! Display RAM is 16 bytes; each digit uses the low byte of one 16-bit
//! row. On the 4-digit backpack the rows are interleaved with the colon:
//!
//! ```text
//! offset:  0     2     4     6     8
//! glyph:  [d0]  [d1]  [::]  [d2]  [d3]
//! ```
//!
//! Segment bits within a digit byte (bit 7 is the decimal point):
//!
//! ```text
//!   ─0─
//!  5   1
//!   ─6─
//!  4   2
//!   ─3─
//! ```

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use std::path::Path;

use super::SevenSegment;
use crate::error::TiradaError;

/// Oscillator on
const CMD_SYSTEM_SETUP: u8 = 0x21;

/// Display on, no blink
const CMD_DISPLAY_ON: u8 = 0x81;

/// Brightness command base (low nibble is the duty cycle)
const CMD_BRIGHTNESS: u8 = 0xE0;

/// Framebuffer byte offsets of the four digit positions (offset 4 is
/// the colon row, unused here).
const DIGIT_OFFSETS: [usize; 4] = [0, 2, 6, 8];

/// Segment patterns for decimal digits 0..=9.
const DIGIT_SEGMENTS: [u8; 10] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F,
];

/// # HT16K33 Display
///
/// Owns the I2C handle and a local 16-byte framebuffer. Mutations are
/// buffered; [`commit`](SevenSegment::commit) writes the whole buffer
/// in one bus transaction.
pub struct Ht16k33Display {
    device: LinuxI2CDevice,
    buffer: [u8; 16],
}

impl Ht16k33Display {
    /// Open the display at `address` on the given I2C bus device and
    /// initialize it (oscillator on, display on, full brightness,
    /// blank framebuffer).
    pub fn open<P: AsRef<Path>>(bus: P, address: u16) -> Result<Self, TiradaError> {
        let device = LinuxI2CDevice::new(bus.as_ref(), address).map_err(|e| {
            TiradaError::Display(format!(
                "Failed to open {} at 0x{address:02x}: {e}",
                bus.as_ref().display()
            ))
        })?;

        let mut display = Self {
            device,
            buffer: [0; 16],
        };
        display.command(CMD_SYSTEM_SETUP)?;
        display.command(CMD_DISPLAY_ON)?;
        display.command(CMD_BRIGHTNESS | 0x0F)?;
        display.commit()?;
        Ok(display)
    }

    fn command(&mut self, command: u8) -> Result<(), TiradaError> {
        self.device
            .smbus_write_byte(command)
            .map_err(|e| TiradaError::Display(format!("Command 0x{command:02x} failed: {e}")))
    }
}

impl SevenSegment for Ht16k33Display {
    fn clear(&mut self) {
        self.buffer = [0; 16];
    }

    fn set_digit(&mut self, position: u8, digit: u8) {
        let (Some(offset), Some(segments)) = (
            DIGIT_OFFSETS.get(position as usize),
            DIGIT_SEGMENTS.get(digit as usize),
        ) else {
            return;
        };
        self.buffer[*offset] = *segments;
    }

    fn commit(&mut self) -> Result<(), TiradaError> {
        // RAM write: register address 0x00, then the full framebuffer.
        let mut payload = [0u8; 17];
        payload[1..].copy_from_slice(&self.buffer);
        self.device
            .write(&payload)
            .map_err(|e| TiradaError::Display(format!("Framebuffer write failed: {e}")))
    }
}

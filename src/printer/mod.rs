//! # Printer Capability
//!
//! The narrow interface the daemon prints through, plus the pieces that
//! implement it for a real serial ESC/POS printer:
//!
//! - [`Printer`]: the capability trait (`print_image`, `print_text`,
//!   `reset`)
//! - [`escpos`]: ESC/POS command builders (pure, byte-exact)
//! - [`serial`]: raw-TTY serial transport and [`SerialPrinter`]
//! - [`Raster`]: stored PNG decoded to the 1-bit form the column
//!   bit-image command wants
//!
//! Print formatting (what to print) lives in [`crate::format`]; this
//! module only knows how to get bytes onto paper.

pub mod escpos;
pub mod serial;

pub use serial::SerialPrinter;

use crate::error::TiradaError;
use crate::format::PrintOp;

/// Printer capability.
pub trait Printer {
    /// Print a raster image from encoded PNG bytes, unmodified (the
    /// store holds pre-sized, pre-quantized illustrations).
    fn print_image(&mut self, png: &[u8]) -> Result<(), TiradaError>;

    /// Print one line of text followed by a line feed. An empty line
    /// feeds blank paper.
    fn print_text(&mut self, line: &str) -> Result<(), TiradaError>;

    /// Reset the printer to its power-on state.
    fn reset(&mut self) -> Result<(), TiradaError>;
}

/// Replay a formatted print sequence against a printer.
pub fn print_ops(printer: &mut impl Printer, ops: &[PrintOp]) -> Result<(), TiradaError> {
    for op in ops {
        match op {
            PrintOp::Image(png) => printer.print_image(png)?,
            PrintOp::Text(line) => printer.print_text(line)?,
        }
    }
    Ok(())
}

/// A decoded 1-bit image, bit-packed row-major (bit 7 = leftmost pixel
/// of the byte, 1 = black), the orientation [`escpos::bit_image_column`]
/// reads from.
pub struct Raster {
    /// Width in dots
    pub width: u32,
    /// Height in dots
    pub height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Decode PNG bytes and threshold to 1-bit.
    ///
    /// The stored illustrations are already grayscale-quantized by the
    /// conversion pipeline; a fixed 50% threshold is all that is left
    /// to do here.
    pub fn decode_png(png: &[u8]) -> Result<Self, TiradaError> {
        let decoded = image::load_from_memory(png)
            .map_err(|e| TiradaError::Image(format!("PNG decode failed: {e}")))?
            .to_luma8();

        let (width, height) = decoded.dimensions();
        let bytes_per_row = (width as usize).div_ceil(8);
        let mut data = vec![0u8; bytes_per_row * height as usize];

        for (x, y, pixel) in decoded.enumerate_pixels() {
            if pixel.0[0] < 128 {
                data[y as usize * bytes_per_row + x as usize / 8] |= 0x80 >> (x % 8);
            }
        }

        Ok(Self {
            width,
            height,
            bytes_per_row,
            data,
        })
    }

    /// Whether the dot at (x, y) is black. Out-of-range coordinates are
    /// white, which is what the band padding at the bottom of an image
    /// wants.
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.bytes_per_row + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard_png(size: u32) -> Vec<u8> {
        let img = image::GrayImage::from_fn(size, size, |x, y| {
            image::Luma([if (x + y) % 2 == 0 { 0u8 } else { 255u8 }])
        });
        let mut png = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageFormat::Png,
        )
        .unwrap();
        png
    }

    #[test]
    fn test_decode_png_thresholds() {
        let raster = Raster::decode_png(&checkerboard_png(4)).unwrap();
        assert_eq!((raster.width, raster.height), (4, 4));
        assert!(raster.is_black(0, 0));
        assert!(!raster.is_black(1, 0));
        assert!(raster.is_black(2, 0));
        assert!(!raster.is_black(0, 1));
    }

    #[test]
    fn test_out_of_range_is_white() {
        let raster = Raster::decode_png(&checkerboard_png(4)).unwrap();
        assert!(!raster.is_black(4, 0));
        assert!(!raster.is_black(0, 100));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            Raster::decode_png(b"not a png"),
            Err(TiradaError::Image(_))
        ));
    }
}

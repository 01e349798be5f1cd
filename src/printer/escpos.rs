//! # ESC/POS Protocol Commands
//!
//! Command builders for ESC/POS serial thermal printers (Epson-style
//! command set, as spoken by the common 58mm/384-dot units).
//!
//! ## Byte Order
//!
//! Multi-byte integers are **little-endian**: a `u16` count of 0x0180
//! is sent as `[0x80, 0x01]`.
//!
//! ## Graphics
//!
//! Images use the column-oriented bit image command (`ESC * m`), with
//! density m = 33 (24-dot double density). Data is column-major: for
//! each 24-row band, each column contributes 3 bytes, MSB = topmost
//! dot. Line spacing is tightened to 16 motion units around the bands
//! so consecutive bands butt together without white gaps.

use super::Raster;

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - command prefix byte
pub const ESC: u8 = 0x1B;

/// LF (Line Feed) - print line buffer and advance one line
pub const LF: u8 = 0x0A;

/// NUL - parameter terminator for a few legacy commands
pub const NUL: u8 = 0x00;

/// Column bit image density: 24-dot double density
const BIT_IMAGE_DENSITY: u8 = 33;

/// Rows consumed per column bit image band
const BAND_ROWS: u32 = 24;

/// Line spacing (motion units) used between image bands
const BAND_SPACING: u8 = 16;

// ============================================================================
// PRINTER CONTROL
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the line buffer and resets formatting to power-on defaults.
///
/// ```
/// assert_eq!(tirada::printer::escpos::init(), vec![0x1B, 0x40]);
/// ```
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Hardware Reset (ESC ? LF NUL)
///
/// Full hardware reset, as issued once at daemon startup so a print
/// interrupted by a previous crash cannot leave stale state in the
/// line buffer.
pub fn hardware_reset() -> Vec<u8> {
    vec![ESC, b'?', LF, NUL]
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets line spacing to `n` vertical motion units.
pub fn set_line_spacing(units: u8) -> Vec<u8> {
    vec![ESC, b'3', units]
}

/// # Reset Line Spacing (ESC 2)
///
/// Restores the default line spacing (~1/6 inch).
pub fn reset_line_spacing() -> Vec<u8> {
    vec![ESC, b'2']
}

// ============================================================================
// TEXT
// ============================================================================

/// # Print Text Line
///
/// One line of text followed by LF. Descriptions are transliterated to
/// ASCII by the database conversion step; anything outside the printable
/// ASCII range that slips through is replaced with `?` rather than
/// letting a stray high byte be interpreted as a control sequence.
pub fn text(line: &str) -> Vec<u8> {
    let mut data: Vec<u8> = line
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect();
    data.push(LF);
    data
}

// ============================================================================
// GRAPHICS
// ============================================================================

/// # Column Bit Image (ESC * 33 nL nH data)
///
/// Emits the full print sequence for a raster image in 24-row bands:
///
/// ```text
/// ESC 3 16                    tighten line spacing
/// for each band of 24 rows:
///     ESC * 33 nL nH          n = width in dots, little-endian
///     3 bytes per column      MSB = topmost dot of the band
///     LF                      advance to the next band
/// ESC 2                       restore default spacing
/// ```
///
/// The final band is padded with white below the image edge.
pub fn bit_image_column(raster: &Raster) -> Vec<u8> {
    let mut data = set_line_spacing(BAND_SPACING);

    let [width_lo, width_hi] = (raster.width as u16).to_le_bytes();
    let bands = raster.height.div_ceil(BAND_ROWS);

    for band in 0..bands {
        let top = band * BAND_ROWS;
        data.extend_from_slice(&[ESC, b'*', BIT_IMAGE_DENSITY, width_lo, width_hi]);

        for x in 0..raster.width {
            for byte_row in 0..3 {
                let mut byte = 0u8;
                for bit in 0..8 {
                    if raster.is_black(x, top + byte_row * 8 + bit) {
                        byte |= 0x80 >> bit;
                    }
                }
                data.push(byte);
            }
        }
        data.push(LF);
    }

    data.extend_from_slice(&reset_line_spacing());
    data
}

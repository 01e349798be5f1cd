//! # Seven-Segment Display
//!
//! The two-digit selection readout. The [`SevenSegment`] trait is the
//! narrow capability the daemon writes through; [`ht16k33`] provides the
//! real I2C backpack driver, tests provide a recording fake.
//!
//! Rendering is buffer-then-commit: `clear` and `set_digit` mutate a
//! local framebuffer, `commit` pushes it over the bus in one write, so
//! the glass never shows a half-updated value.

pub mod ht16k33;

pub use ht16k33::Ht16k33Display;

use crate::error::TiradaError;

/// Digit position of the tens digit on the 4-digit backpack (the two
/// leftmost positions are unused by this appliance).
pub const TENS_POSITION: u8 = 2;

/// Digit position of the ones digit.
pub const ONES_POSITION: u8 = 3;

/// Seven-segment display capability.
pub trait SevenSegment {
    /// Blank the framebuffer.
    fn clear(&mut self);

    /// Set one digit position (0..=3) to a decimal digit (0..=9).
    fn set_digit(&mut self, position: u8, digit: u8);

    /// Push the framebuffer to the hardware.
    fn commit(&mut self) -> Result<(), TiradaError>;
}

/// Project a selection value onto (tens, ones) digits.
///
/// The tens digit is suppressed below 10 so the display shows `7`, not
/// `07`. Values come from the ring counter, whose domain is 0..=16, so
/// the tens digit is only ever absent or 1.
pub fn digits(value: u8) -> (Option<u8>, u8) {
    let tens = value / 10;
    (if tens > 0 { Some(tens) } else { None }, value % 10)
}

/// Render a selection value: clear, set digits, commit.
///
/// Called synchronously after every successful counter transition and
/// never batched, so the readout tracks each detent of the knob.
pub fn render(display: &mut impl SevenSegment, value: u8) -> Result<(), TiradaError> {
    display.clear();

    let (tens, ones) = digits(value);
    if let Some(tens) = tens {
        display.set_digit(TENS_POSITION, tens);
    }
    display.set_digit(ONES_POSITION, ones);

    display.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeDisplay {
        cleared: usize,
        digits: Vec<(u8, u8)>,
        commits: usize,
    }

    impl SevenSegment for FakeDisplay {
        fn clear(&mut self) {
            self.cleared += 1;
            self.digits.clear();
        }

        fn set_digit(&mut self, position: u8, digit: u8) {
            self.digits.push((position, digit));
        }

        fn commit(&mut self) -> Result<(), TiradaError> {
            self.commits += 1;
            Ok(())
        }
    }

    #[test]
    fn test_digits_single() {
        assert_eq!(digits(7), (None, 7));
    }

    #[test]
    fn test_digits_ten() {
        assert_eq!(digits(10), (Some(1), 0));
    }

    #[test]
    fn test_digits_sixteen() {
        assert_eq!(digits(16), (Some(1), 6));
    }

    #[test]
    fn test_render_single_digit_sets_only_ones() {
        let mut display = FakeDisplay::default();
        render(&mut display, 7).unwrap();
        assert_eq!(display.digits, vec![(ONES_POSITION, 7)]);
        assert_eq!(display.cleared, 1);
        assert_eq!(display.commits, 1);
    }

    #[test]
    fn test_render_two_digits() {
        let mut display = FakeDisplay::default();
        render(&mut display, 10).unwrap();
        assert_eq!(display.digits, vec![(TENS_POSITION, 1), (ONES_POSITION, 0)]);
    }
}

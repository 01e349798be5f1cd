//! # Selection Counter
//!
//! The bounded ring counter behind the category knob. The counter wraps
//! modulo 17 over the nominal range 0..=16, with one twist: 14 is a
//! forbidden resting value. A transition whose candidate lands on 14
//! bounces past it — to 15 going up, to 13 going down — so 14 is only
//! ever a transient candidate, never an observable state.
//!
//! The asymmetric bounce targets are intentional appliance behavior
//! (they match the physical category layout), not an off-by-one. Do not
//! normalize this to a clean 16-position ring.

/// Number of positions in the ring (values 0..=16).
pub const MODULUS: u8 = 17;

/// The value the counter must never rest on.
pub const FORBIDDEN: u8 = 14;

/// Where an increment lands when its candidate hits [`FORBIDDEN`].
pub const BOUNCE_UP: u8 = 15;

/// Where a decrement lands when its candidate hits [`FORBIDDEN`].
pub const BOUNCE_DOWN: u8 = 13;

/// # Ring Counter
///
/// Owns the current selection value. All mutation goes through
/// [`increment`](Self::increment) and [`decrement`](Self::decrement);
/// the daemon keeps exactly one instance, on one task, so reads never
/// interleave with a mutation mid-transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingCounter {
    value: u8,
}

impl Default for RingCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl RingCounter {
    /// Create a counter at the initial selection, 0.
    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Current selection value, always in 0..=16 and never 14.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Advance one position clockwise, wrapping 16 -> 0 and bouncing
    /// off the forbidden value to [`BOUNCE_UP`].
    pub fn increment(&mut self) {
        let candidate = (self.value + 1) % MODULUS;
        self.value = if candidate == FORBIDDEN {
            BOUNCE_UP
        } else {
            candidate
        };
    }

    /// Advance one position counter-clockwise, wrapping 0 -> 16 and
    /// bouncing off the forbidden value to [`BOUNCE_DOWN`].
    pub fn decrement(&mut self) {
        let candidate = (self.value + MODULUS - 1) % MODULUS;
        self.value = if candidate == FORBIDDEN {
            BOUNCE_DOWN
        } else {
            candidate
        };
    }
}

//! # Tirada - Random Card Printer Appliance
//!
//! Tirada drives a small physical appliance: turn a knob to pick a
//! category on a seven-segment display, press a button, and a thermal
//! printer spits out a random card (illustration plus word-wrapped
//! description) from that category.
//!
//! ## How a Press Becomes Paper
//!
//! ```text
//! knob ──> counter ──> display
//! button ──> store lookup ──> format ──> print worker ──> printer
//! ```
//!
//! The [`daemon`] module owns the control loop; everything it touches is
//! behind a narrow capability trait so the loop can be tested without
//! hardware:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`counter`] | Bounded selection ring with a forbidden resting value |
//! | [`display`] | Seven-segment capability + HT16K33 I2C driver |
//! | [`store`] | Card lookup capability + SQLite implementation |
//! | [`format`] | Card → ordered printer operations |
//! | [`wrap`] | 32-column greedy word wrap |
//! | [`printer`] | Printer capability, ESC/POS builders, serial transport |
//! | [`input`] | Device events from exclusively-grabbed evdev streams |
//! | [`daemon`] | Event dispatcher and lifecycle management |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```no_run
//! use tirada::{daemon, input::EvdevSource, store::SqliteStore};
//! use tirada::display::Ht16k33Display;
//! use tirada::printer::{Printer, SerialPrinter};
//!
//! # async fn example() -> Result<(), tirada::TiradaError> {
//! let store = SqliteStore::open("cards.db")?;
//! let knob = EvdevSource::open("/dev/input/event0")?;
//! let button = EvdevSource::open("/dev/input/event1")?;
//! let display = Ht16k33Display::open("/dev/i2c-1", 0x70)?;
//! let mut printer = SerialPrinter::open("/dev/ttyAMA0", 19200)?;
//!
//! printer.reset()?;
//! daemon::run(knob, button, store, display, printer).await?;
//! # Ok(())
//! # }
//! ```

pub mod card;
pub mod counter;
pub mod daemon;
pub mod display;
pub mod error;
pub mod format;
pub mod input;
pub mod printer;
pub mod store;
pub mod wrap;

// Re-exports for convenience
pub use card::Card;
pub use counter::RingCounter;
pub use error::TiradaError;

//! # Card Records
//!
//! The immutable card record the daemon reads from the store. Records are
//! produced and pre-processed (image downscaling, text transliteration)
//! by an out-of-band conversion step; at runtime they are read-only.

/// A printable card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Unique key in the store
    pub id: i64,

    /// Display name (used only for logging; the printout carries the
    /// illustration and description)
    pub name: String,

    /// Free text, may contain explicit line breaks
    pub description: String,

    /// Selection bucket, 0..=16. Multiple cards may share a value.
    pub value: u8,

    /// Pre-processed PNG, monochrome/low-color, at most 384 px wide
    pub illustration: Vec<u8>,
}

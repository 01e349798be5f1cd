//! # Print Formatting
//!
//! Turns a selected [`Card`] into the ordered sequence of printer
//! operations that make up one printout. The sequence is a small
//! inspectable IR between the selection workflow and the printer
//! capability: tests assert on ops, the daemon replays them against
//! whatever [`Printer`](crate::printer::Printer) it was wired with.
//!
//! ## Printout Layout
//!
//! ```text
//! ┌────────────────────────────────┐
//! │         illustration           │  1 image op (stored PNG, as-is)
//! ├────────────────────────────────┤
//! │ description, wrapped to 32     │  1 text op per wrapped line
//! │ columns, explicit breaks kept  │
//! ├────────────────────────────────┤
//! │                                │
//! │                                │  3 blank text ops for tear-off
//! │                                │
//! └────────────────────────────────┘
//! ```

use crate::card::Card;
use crate::wrap::{LINE_WIDTH, word_wrap};

/// Blank lines emitted after the description so the printout clears the
/// tear bar.
pub const TEAR_OFF_LINES: usize = 3;

/// One printer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOp {
    /// Print a raster image from encoded PNG bytes.
    Image(Vec<u8>),

    /// Print one line of text, terminated by a line feed. At most
    /// [`LINE_WIDTH`] characters; may be empty (blank feed line).
    Text(String),
}

/// Format a card into its print sequence.
pub fn format_card(card: &Card) -> Vec<PrintOp> {
    let mut ops = Vec::new();

    ops.push(PrintOp::Image(card.illustration.clone()));

    for line in word_wrap(&card.description, LINE_WIDTH) {
        ops.push(PrintOp::Text(line));
    }

    for _ in 0..TEAR_OFF_LINES {
        ops.push(PrintOp::Text(String::new()));
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(description: &str) -> Card {
        Card {
            id: 1,
            name: "Test Card".to_string(),
            description: description.to_string(),
            value: 3,
            illustration: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn test_image_comes_first() {
        let card = card("text");
        let ops = format_card(&card);
        assert_eq!(ops[0], PrintOp::Image(card.illustration.clone()));
    }

    #[test]
    fn test_ends_with_tear_off_blanks() {
        let ops = format_card(&card("text"));
        let tail = &ops[ops.len() - TEAR_OFF_LINES..];
        assert!(tail.iter().all(|op| *op == PrintOp::Text(String::new())));
    }

    #[test]
    fn test_description_is_wrapped() {
        let ops = format_card(&card(
            "Whenever this creature attacks, draw a card and lose one life",
        ));
        let lines: Vec<&str> = ops
            .iter()
            .filter_map(|op| match op {
                PrintOp::Text(line) => Some(line.as_str()),
                PrintOp::Image(_) => None,
            })
            .collect();
        assert!(lines.len() > 1 + TEAR_OFF_LINES);
        assert!(lines.iter().all(|line| line.chars().count() <= LINE_WIDTH));
    }

    #[test]
    fn test_explicit_breaks_survive() {
        let ops = format_card(&card("Flying\nHaste"));
        assert_eq!(
            ops,
            vec![
                PrintOp::Image(vec![0x89, b'P', b'N', b'G']),
                PrintOp::Text("Flying".to_string()),
                PrintOp::Text("Haste".to_string()),
                PrintOp::Text(String::new()),
                PrintOp::Text(String::new()),
                PrintOp::Text(String::new()),
            ]
        );
    }
}

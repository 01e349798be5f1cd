//! # Word Wrapping
//!
//! Greedy word wrap for the 32-column text area of the thermal printer.
//!
//! ## Rules
//!
//! - Explicit line breaks in the source always produce a break in the
//!   output (paragraph structure is preserved, including empty lines).
//! - Within a source line, words are packed greedily: a word moves to
//!   the next line when it no longer fits, with no hyphenation.
//! - A single word longer than the line width is hard-split so that no
//!   emitted line ever exceeds the width.
//!
//! Wrapping is idempotent: feeding the joined output back through
//! produces the same lines, since every emitted line already fits.

/// Printable columns per line on the 58mm ESC/POS printer (Font A).
pub const LINE_WIDTH: usize = 32;

/// Wrap `text` to `width` columns, preserving explicit line breaks.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Wrap a single break-free line to `width` columns.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            // Oversized word: flush the current line, then hard-split.
            if current_len > 0 {
                wrapped.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == width {
                    wrapped.push(piece);
                } else {
                    // Tail shorter than the width starts the next line
                    // so following words can pack after it.
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
            continue;
        }

        if current_len == 0 {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            wrapped.push(std::mem::take(&mut current));
            current = word.to_string();
            current_len = word_len;
        }
    }

    if current_len > 0 {
        wrapped.push(current);
    }

    if wrapped.is_empty() {
        wrapped.push(String::new());
    }

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_line_passes_through() {
        assert_eq!(word_wrap("hello world", LINE_WIDTH), vec!["hello world"]);
    }

    #[test]
    fn test_greedy_packing() {
        let wrapped = word_wrap("one two three four five six seven eight nine", 16);
        assert_eq!(wrapped, vec!["one two three", "four five six", "seven eight nine"]);
    }

    #[test]
    fn test_no_line_exceeds_width() {
        let text = "Flying creatures with reach can block this creature as though it had no evasion at all";
        for line in word_wrap(text, LINE_WIDTH) {
            assert!(line.chars().count() <= LINE_WIDTH, "{line:?}");
        }
    }

    #[test]
    fn test_explicit_breaks_preserved() {
        let wrapped = word_wrap("First paragraph.\n\nSecond paragraph.", LINE_WIDTH);
        assert_eq!(wrapped, vec!["First paragraph.", "", "Second paragraph."]);
    }

    #[test]
    fn test_unbreakable_word_is_hard_split() {
        let long: String = "x".repeat(50);
        let wrapped = word_wrap(&long, LINE_WIDTH);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(line.chars().count() <= LINE_WIDTH);
        }
        // No character lost or duplicated across the rewrap.
        assert_eq!(wrapped.concat(), long);
    }

    #[test]
    fn test_hard_split_tail_packs_following_words() {
        let wrapped = word_wrap(&format!("{} end", "y".repeat(40)), LINE_WIDTH);
        assert_eq!(wrapped, vec!["y".repeat(32), format!("{} end", "y".repeat(8))]);
    }

    #[test]
    fn test_idempotent() {
        let text = "A long enough description that will definitely need wrapping\nwith an explicit break in it";
        let once = word_wrap(text, LINE_WIDTH);
        let twice = word_wrap(&once.join("\n"), LINE_WIDTH);
        assert_eq!(once, twice);
    }
}

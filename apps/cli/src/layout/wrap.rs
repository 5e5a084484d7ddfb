//! Greedy Word Wrapper — splits a single-line string into width-bounded lines.
//!
//! # Wrapping rules
//! - Words are delimited by single spaces; repeated/leading/trailing spaces
//!   produce empty-string words that are preserved, not normalized.
//! - A word that does not fit on its own line is broken between characters.
//! - A single character wider than the available width is force-emitted as its
//!   own line. This is the one documented exception to the width invariant.

use crate::layout::measure::TextMeasurer;

/// Wraps `text` so that no line extends past `avail_width` pixels at `size_px`.
///
/// Words longer than `avail_width` are broken between characters. Returns lines
/// in vertical reading order. An input that reduces to nothing (empty string,
/// spaces only) may return no lines — callers normalize.
///
/// Degenerate case: `avail_width <= 0` returns the entire text as one line.
pub fn wrap_single_line<M: TextMeasurer>(
    text: &str,
    measurer: &M,
    size_px: u32,
    avail_width: f32,
) -> Vec<String> {
    if avail_width <= 0.0 {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measurer.line_width(&candidate, size_px) <= avail_width {
            current = candidate;
            continue;
        }

        // Candidate doesn't fit — flush the accumulated line first.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measurer.line_width(word, size_px) <= avail_width {
            current = word.to_string();
        } else {
            // The word alone is too wide: break it between characters.
            current = break_word(word, measurer, size_px, avail_width, &mut lines);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits an oversized word into character chunks that fit `avail_width`.
///
/// Completed chunks are flushed into `lines`; the final partial chunk is
/// returned so it can keep accumulating subsequent words. A single character
/// that doesn't fit is emitted as its own line rather than looping forever.
fn break_word<M: TextMeasurer>(
    word: &str,
    measurer: &M,
    size_px: u32,
    avail_width: f32,
    lines: &mut Vec<String>,
) -> String {
    let mut chunk = String::new();
    for ch in word.chars() {
        let mut test = chunk.clone();
        test.push(ch);
        if measurer.line_width(&test, size_px) <= avail_width {
            chunk = test;
        } else if chunk.is_empty() {
            // Single char wider than the line: force it through.
            lines.push(ch.to_string());
        } else {
            lines.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        }
    }
    chunk
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::VMetrics;

    /// Deterministic measurer: every char advances `em` × size pixels.
    struct FixedAdvance {
        em: f32,
    }

    impl TextMeasurer for FixedAdvance {
        fn line_width(&self, text: &str, size_px: u32) -> f32 {
            text.chars().count() as f32 * self.em * size_px as f32
        }

        fn v_metrics(&self, size_px: u32) -> VMetrics {
            VMetrics {
                ascent: size_px as f32 * 0.8,
                descent: size_px as f32 * 0.2,
            }
        }
    }

    fn make_measurer() -> FixedAdvance {
        FixedAdvance { em: 0.5 }
    }

    // At size 10 a char is 5 px wide, so avail 50.0 fits 10 chars per line.

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_single_line("Hello", &make_measurer(), 10, 50.0);
        assert_eq!(lines, vec!["Hello"]);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let lines = wrap_single_line("aaaa bbbb cccc", &make_measurer(), 10, 50.0);
        // "aaaa bbbb" is 9 chars (fits), adding " cccc" makes 14 (doesn't).
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_every_line_within_width() {
        let m = make_measurer();
        let text = "the quick brown fox jumps over the lazy dog";
        for line in wrap_single_line(text, &m, 10, 50.0) {
            assert!(
                m.line_width(&line, 10) <= 50.0,
                "line '{line}' exceeds available width"
            );
        }
    }

    #[test]
    fn test_oversized_word_broken_between_chars() {
        let m = make_measurer();
        let word = "x".repeat(25);
        let lines = wrap_single_line(&word, &m, 10, 50.0);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_broken_word_tail_keeps_accumulating() {
        // After char-splitting, the trailing chunk becomes the current line and
        // the next word joins it.
        let m = make_measurer();
        let lines = wrap_single_line("xxxxxxxxxxxx ab", &m, 10, 50.0);
        assert_eq!(lines, vec!["xxxxxxxxxx", "xx ab"]);
    }

    #[test]
    fn test_single_char_wider_than_width_forced() {
        // avail 4.0 < one 5 px char: each char becomes its own line.
        let lines = wrap_single_line("abc", &make_measurer(), 10, 4.0);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_degenerate_width_returns_whole_text() {
        let lines = wrap_single_line("some text here", &make_measurer(), 10, 0.0);
        assert_eq!(lines, vec!["some text here"]);
        let lines = wrap_single_line("more", &make_measurer(), 10, -3.0);
        assert_eq!(lines, vec!["more"]);
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        let lines = wrap_single_line("", &make_measurer(), 10, 50.0);
        assert!(lines.is_empty(), "empty input wraps to no lines");
    }

    #[test]
    fn test_consecutive_spaces_preserved() {
        // "a  b" splits into ["a", "", "b"]; joining through the empty word
        // re-inserts the doubled space rather than collapsing it.
        let lines = wrap_single_line("a  b", &make_measurer(), 10, 50.0);
        assert_eq!(lines, vec!["a  b"]);
    }

    #[test]
    fn test_trailing_space_preserved_in_line() {
        let lines = wrap_single_line("ab ", &make_measurer(), 10, 50.0);
        assert_eq!(lines, vec!["ab "]);
    }

    #[test]
    fn test_rewrap_is_idempotent_without_char_splits() {
        let m = make_measurer();
        let text = "one two three four five six seven eight nine ten";
        let first = wrap_single_line(text, &m, 10, 50.0);
        let rejoined = first.join(" ");
        let second = wrap_single_line(&rejoined, &m, 10, 50.0);
        assert_eq!(first, second, "re-wrapping joined lines must reproduce boundaries");
    }
}

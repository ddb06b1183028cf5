//! Shared rendering utilities.
//!
//! Cursor positioning, width-aware padding and search-match highlighting used
//! by several components. Widths are counted in characters, never bytes, so
//! accented descriptions (`AÇÚCAR`, `MÍNIMO`) line up.
//!
//! # Example
//!
//! ```rust
//! use stockboard::ui::helpers::{highlight_segments, pad_right};
//!
//! assert_eq!(pad_right("açúcar", 8), "açúcar  ");
//! assert_eq!(
//!     highlight_segments("arroz", &[(0, 2)]),
//!     vec![("ar".to_string(), true), ("roz".to_string(), false)]
//! );
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Clips or left-aligns `text` in a field of `width` characters.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let fill = width.saturating_sub(char_width(&clipped));
    format!("{clipped}{}", " ".repeat(fill))
}

/// Clips or right-aligns `text` in a field of `width` characters.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let fill = width.saturating_sub(char_width(&clipped));
    format!("{}{clipped}", " ".repeat(fill))
}

/// Centers `text` in a field of `width` characters; the extra space goes right.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let len = char_width(&clipped);
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{clipped}{}", " ".repeat(left), " ".repeat(right))
}

/// Splits `text` into `(segment, highlighted)` runs.
///
/// `ranges` are `(start, end)` character indices, sorted and non-overlapping.
/// Ranges reaching past the end of the text are cut at the end.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        if start > pos {
            segments.push((chars[pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        pos = end;
    }

    if pos < chars.len() {
        segments.push((chars[pos..].iter().collect(), false));
    }
    segments
}

/// Prints `text` with its matched ranges in the highlight colors.
///
/// After each highlighted run the row's base colors are restored: selection
/// colors on the selected row, normal text otherwise.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in highlight_segments(text, ranges) {
        if !highlighted {
            print!("{segment}");
            continue;
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{segment}");
        print!("{}", Theme::reset());

        if is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    }
}

/// Blanks a whole line.
pub fn clear_line(row: usize, cols: usize) {
    position_cursor(row, 1);
    print!("{}{}", Theme::reset(), " ".repeat(cols));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_counts_characters() {
        assert_eq!(pad_right("MÍNIMO", 8), "MÍNIMO  ");
        assert_eq!(pad_left("12", 5), "   12");
        assert_eq!(pad_right("feijão carioca", 6), "feijão");
    }

    #[test]
    fn centering_puts_odd_space_right() {
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("abcdef", 3), "abc");
    }

    #[test]
    fn segments_cover_the_whole_text() {
        let segments = highlight_segments("café torrado", &[(0, 4), (5, 6)]);

        assert_eq!(
            segments,
            vec![
                ("café".to_string(), true),
                (" ".to_string(), false),
                ("t".to_string(), true),
                ("orrado".to_string(), false),
            ]
        );
    }

    #[test]
    fn out_of_range_segments_are_cut() {
        let segments = highlight_segments("sal", &[(2, 10), (12, 14)]);

        assert_eq!(segments, vec![("sa".to_string(), false), ("l".to_string(), true)]);
    }

    #[test]
    fn no_ranges_is_one_plain_segment() {
        assert_eq!(highlight_segments("óleo", &[]), vec![("óleo".to_string(), false)]);
        assert!(highlight_segments("", &[]).is_empty());
    }
}

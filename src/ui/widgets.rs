//! Small drawing helpers shared by the twinpane renderer.
//!
//! Width-aware text fitting (via unicode-width), the scrolling view of a single-line
//! input field and the centered popup rectangle used by the rename modal.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Fits `line` into exactly `width` columns.
///
/// Control characters are dropped, tabs become spaces, and text that does not fit
/// ends in `…`. Shorter text is padded with spaces.
pub fn fit_to_width(line: &str, width: usize) -> String {
    let clean: String = line
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();

    if clean.width() <= width {
        let pad = width - clean.width();
        return clean + &" ".repeat(pad);
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::with_capacity(width);
    let mut used = 0;
    for c in clean.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Visible part of an input field and the cursor column inside it.
///
/// Keeps the end of long input in view, since that is where typing happens.
pub fn input_field_view(input: &str, cursor: usize, visible_width: usize) -> (&str, usize) {
    let cursor = cursor.min(input.len());
    if input.width() <= visible_width {
        return (input, input[..cursor].width());
    }

    let mut used = 0;
    let mut start = input.len();
    for (idx, ch) in input.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > visible_width {
            break;
        }
        start = idx;
    }

    let offset = if cursor < start {
        0
    } else {
        input[start..cursor].width()
    };
    (&input[start..], offset)
}

/// A `width` x `height` rectangle centered in `area`, clamped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_exact_width() {
        let cases = ["short.txt", "very_long_filename.txt", "🦀_crab.rs", "\t_tab", ""];
        for input in cases {
            let result = fit_to_width(input, 10);
            assert_eq!(result.width(), 10, "input {input:?} gave {result:?}");
            assert!(!result.chars().any(|c| c.is_control()));
        }
        assert_eq!(fit_to_width("abcdefghijkl", 5), "abcd…");
        assert_eq!(fit_to_width("anything", 0), "");
    }

    #[test]
    fn test_input_view_keeps_cursor_in_view() {
        let (view, col) = input_field_view("hello", 5, 10);
        assert_eq!((view, col), ("hello", 5));

        let (view, col) = input_field_view("abcdefghij", 10, 4);
        assert_eq!(view, "ghij");
        assert_eq!(col, 4);

        let (_, col) = input_field_view("abcdefghij", 0, 4);
        assert_eq!(col, 0);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(area, 50, 50), area);
    }
}

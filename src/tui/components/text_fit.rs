//! Text fitting helpers for fixed-width terminal columns.
//!
//! Widths are measured in terminal columns, not Unicode scalar count, so
//! accented names and wide glyphs line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Truncates text to the provided display width and appends an ellipsis.
pub(crate) fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let target_width = max_width.saturating_sub(ELLIPSIS.len());
    let mut truncated = String::new();
    let mut current_width = 0;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += char_width;
    }
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Truncates or right-pads text so it occupies exactly `width` columns.
pub(crate) fn fit_to_width(text: &str, width: usize) -> String {
    let mut fitted = truncate_with_ellipsis(text, width);
    let used = fitted.width();
    if used < width {
        fitted.push_str(&" ".repeat(width - used));
    }
    fitted
}

/// Right-aligns text within `width` columns, truncating when it is wider.
pub(crate) fn right_align(text: &str, width: usize) -> String {
    let fitted = truncate_with_ellipsis(text, width);
    let padding = width.saturating_sub(fitted.width());
    format!("{}{fitted}", " ".repeat(padding))
}

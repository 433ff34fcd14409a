//! Width measurement and padding for styled text.
//!
//! Every function here measures the *visible* width: markup is stripped with
//! [`destyle`] first and the remainder is measured in terminal columns, so
//! wide (CJK) characters count as two. Padding decisions never look at the
//! raw length of a styled string.

use btcon_markup::{destyle, truncate};
use unicode_width::UnicodeWidthStr;

use crate::types::Align;

/// Marker appended to truncated cell content.
pub const ELLIPSIS: &str = "...";

/// Visible width of `text` in terminal columns.
///
/// # Example
///
/// ```rust
/// use btcon_table::display_width;
///
/// assert_eq!(display_width("<+bt bold>Hello<-bt>"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(text: &str) -> usize {
    destyle(text).width()
}

/// Pads styled `text` to fill a cell of `width` columns.
///
/// - Left: one space, the text, then at least one space.
/// - Right: at least one space, the text, then one space.
/// - Center: half the slack before the text, the rest (at least one) after.
///
/// Content wider than the cell is not cut; the cell simply overflows.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let len = display_width(text);
    let (before, after) = match align {
        Align::Left => (1, width.saturating_sub(len + 1).max(1)),
        Align::Right => (width.saturating_sub(len + 1).max(1), 1),
        Align::Center => {
            let before = width.saturating_sub(len) / 2;
            (before, width.saturating_sub(len + before).max(1))
        }
    };

    format!("{}{}{}", " ".repeat(before), text, " ".repeat(after))
}

/// Fits one line of cell content into a fixed column width.
///
/// Lines that fit are returned as is. Oversized lines become empty for widths
/// up to 3, `...` for widths up to 5, and otherwise keep their first
/// `width - 5` visible columns followed by `...`, with their own markup kept
/// intact around the surviving text.
pub fn fit_to_width(line: &str, width: usize) -> String {
    if display_width(line) <= width {
        return line.to_string();
    }
    match width {
        0..=3 => String::new(),
        4..=5 => ELLIPSIS.to_string(),
        _ => truncate(line, width - 2, ELLIPSIS),
    }
}

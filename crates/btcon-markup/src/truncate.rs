//! Markup-aware truncation.
//!
//! Cutting a styled string at a raw byte offset can split a tag in half.
//! [`truncate`] instead measures and cuts the visible text, then re-emits the
//! tags that enclose whatever survived, so the result is always well formed.

use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tree::{start_tag, NodeKind, Walk};
use crate::{destyle, parse, END_TAG};

/// Shortens `text` to at most `max_width` visible columns, ending with `marker`.
///
/// Text whose visible width already fits is returned unchanged. Otherwise the
/// visible prefix that fits in `max_width - width(marker)` columns is kept,
/// each kept piece stays inside the tags that enclosed it, and `marker` is
/// appended after the last end tag. If `text` is not well-formed markup, the
/// destyled text is truncated instead.
///
/// # Example
///
/// ```rust
/// use btcon_markup::truncate;
///
/// assert_eq!(
///     truncate("<+bt bold>Hello<-bt> World", 8, "..."),
///     "<+bt bold>Hello<-bt>..."
/// );
/// assert_eq!(truncate("short", 8, "..."), "short");
/// ```
pub fn truncate(text: &str, max_width: usize, marker: &str) -> String {
    let visible = destyle(text);
    if visible.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(marker.width());

    let tree = match parse(text) {
        Ok(tree) => tree,
        Err(err) => {
            debug!(error = %err, "truncating destyled text of malformed markup");
            let mut out = take_width(&visible, budget).to_string();
            out.push_str(marker);
            return out;
        }
    };

    let mut out = String::with_capacity(text.len());
    let mut remaining = budget;
    // One entry per entered styled node: whether its start tag was emitted.
    let mut opened: Vec<bool> = Vec::new();

    tree.walk(|event| match event {
        Walk::Enter(id) if id == tree.root().id() => {}
        Walk::Exit(id) if id == tree.root().id() => {}
        Walk::Enter(id) => match &tree.node(id).kind {
            NodeKind::Text(leaf) => {
                if remaining > 0 {
                    let kept = take_width(leaf, remaining);
                    remaining -= kept.width();
                    out.push_str(kept);
                }
            }
            NodeKind::Styled { styles, .. } => {
                let emit = remaining > 0;
                if emit {
                    out.push_str(&start_tag(styles));
                }
                opened.push(emit);
            }
        },
        Walk::Exit(id) => {
            if let NodeKind::Styled { .. } = tree.node(id).kind {
                if opened.pop() == Some(true) {
                    out.push_str(END_TAG);
                }
            }
        }
    });

    out.push_str(marker);
    out
}

/// Longest prefix of `s` that fits in `width` columns.
fn take_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &s[..i];
        }
        used += w;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_text_is_unchanged() {
        assert_eq!(truncate("<+bt bold>abc<-bt>", 3, "..."), "<+bt bold>abc<-bt>");
    }

    #[test]
    fn plain_text() {
        assert_eq!(truncate("abcdefgh", 5, "..."), "ab...");
    }

    #[test]
    fn keeps_enclosing_tags() {
        assert_eq!(
            truncate("<+bt red>abcdefgh<-bt>", 6, "..."),
            "<+bt red>abc<-bt>..."
        );
    }

    #[test]
    fn cut_inside_nested_tags_closes_all() {
        assert_eq!(
            truncate("<+bt bold>ab<+bt red>cdef<-bt>gh<-bt>", 6, "..."),
            "<+bt bold>ab<+bt red>c<-bt><-bt>..."
        );
    }

    #[test]
    fn drops_tags_after_budget() {
        assert_eq!(
            truncate("abcd<+bt red>efgh<-bt>", 7, "..."),
            "abcd..."
        );
    }

    #[test]
    fn result_never_splits_a_tag() {
        let out = truncate("<+bt bold underline>abcdefghij<-bt>", 6, "...");
        assert!(parse(&out).is_ok());
        assert_eq!(destyle(&out), "abc...");
    }

    #[test]
    fn malformed_markup_falls_back_to_visible_text() {
        assert_eq!(truncate("<+bt bold>abcdefgh", 6, "..."), "abc...");
    }

    #[test]
    fn wide_characters_count_two_columns() {
        assert_eq!(truncate("日本語テキスト", 7, "..."), "日本...");
    }

    #[test]
    fn marker_wider_than_budget() {
        assert_eq!(truncate("abcdef", 2, "..."), "...");
    }

    #[test]
    fn take_width_stops_before_overflow() {
        assert_eq!(take_width("héllo", 3), "hél");
        assert_eq!(take_width("日本", 3), "日");
        assert_eq!(take_width("", 3), "");
    }
}

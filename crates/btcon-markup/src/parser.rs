//! Tag parser producing a [`StyledText`] tree.
//!
//! The grammar has exactly two tags:
//!
//! - start tag: `<+bt` followed by whitespace-separated style tokens and `>`
//! - end tag: `<-bt>`, which always closes the innermost open start tag
//!
//! Tags are not named, so balance is a plain stack discipline. The parser
//! keeps a cursor on the innermost open node instead of recursing, so deeply
//! nested input cannot exhaust the call stack.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::tree::{NodeId, StyledText};
use crate::{END_TAG, HYPERLINK_STYLE, START_TAG, START_TAG_CLOSE};

/// Start tags, end tags and bare URLs, scanned together so URLs can be
/// checked against the hyperlink nodes that enclose them.
static LINK_SCAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<start><\+bt[^>]*>)|(?P<end><-bt>)|https?://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]",
    )
    .expect("link scan pattern is valid")
});

/// Markup parser.
///
/// # Example
///
/// ```rust
/// use btcon_markup::Parser;
///
/// let tree = Parser::new()
///     .autolink(true)
///     .parse("docs at https://example.org")
///     .unwrap();
///
/// let link = tree.nodes().find(|n| n.is_hyperlink()).unwrap();
/// assert_eq!(link.children().next().unwrap().text(), "https://example.org");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    autolink: bool,
}

impl Parser {
    /// Creates a parser with auto-hyperlinking disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps bare `http://` and `https://` URLs in hyperlink tags before parsing.
    ///
    /// Offsets reported by the resulting tree and errors refer to the rewritten text.
    pub fn autolink(mut self, enabled: bool) -> Self {
        self.autolink = enabled;
        self
    }

    /// Parses `input` into a tree.
    ///
    /// An empty input yields a tree holding a single empty leaf.
    pub fn parse(&self, input: &str) -> Result<StyledText> {
        let text = if self.autolink {
            link_urls(input)
        } else {
            Cow::Borrowed(input)
        };
        let result = parse_tags(&text);
        match &result {
            Ok(tree) => trace!(nodes = tree.len(), bytes = text.len(), "parsed markup"),
            Err(err) => debug!(error = %err, "markup parse failed"),
        }
        result
    }
}

fn parse_tags(text: &str) -> Result<StyledText> {
    let mut tree = StyledText::new();
    let root = tree.root().id();
    let mut current = root;
    let mut pos = 0;

    if text.is_empty() {
        tree.push_text(root, String::new(), 0);
    }

    while pos < text.len() {
        let rest = &text[pos..];
        let start = rest.find(START_TAG).map(|i| pos + i);
        let end = rest.find(END_TAG).map(|i| pos + i);

        match (start, end) {
            (Some(start), end) if end.map_or(true, |end| start <= end) => {
                push_literal(&mut tree, current, text, pos, start);

                let body_start = start + START_TAG.len();
                let body_end = text[body_start..]
                    .find(START_TAG_CLOSE)
                    .map(|i| body_start + i)
                    .ok_or(ParseError::UnterminatedStartTag { offset: start })?;
                let styles = text[body_start..body_end]
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();

                current = tree.push_styled(current, styles, start);
                pos = body_end + START_TAG_CLOSE.len();
            }
            (_, Some(end)) => {
                push_literal(&mut tree, current, text, pos, end);

                let tag_end = end + END_TAG.len();
                if !tree.close(current) {
                    return Err(ParseError::UnmatchedEndTag {
                        offset: end,
                        context: text[..tag_end].to_string(),
                    });
                }
                current = tree.node(current).parent.unwrap_or(root);
                pos = tag_end;
            }
            _ => {
                push_literal(&mut tree, current, text, pos, text.len());
                pos = text.len();
            }
        }
    }

    if !tree.is_completely_closed() {
        return Err(unclosed(&tree, current, text));
    }
    Ok(tree)
}

/// Adds `text[from..to]` as a leaf of `parent` unless the range is empty.
fn push_literal(tree: &mut StyledText, parent: NodeId, text: &str, from: usize, to: usize) {
    if from < to {
        tree.push_text(parent, text[from..to].to_string(), from);
    }
}

/// Error for input that ended with `innermost` still open.
fn unclosed(tree: &StyledText, innermost: NodeId, text: &str) -> ParseError {
    let offset = tree.node(innermost).offset;
    let tag = text[offset..]
        .find(START_TAG_CLOSE)
        .map(|i| text[offset..=offset + i].to_string())
        .unwrap_or_else(|| text[offset..].to_string());
    ParseError::UnclosedStartTag { tag, offset }
}

/// Wraps URLs that are not already inside a hyperlink node.
///
/// Tags are tracked with a stack of "is hyperlink" flags; a URL is left alone
/// while any open node on the stack is a hyperlink. Unbalanced tags are left
/// for the main parse to report.
fn link_urls(input: &str) -> Cow<'_, str> {
    let mut open: Vec<bool> = Vec::new();
    let mut out = String::new();
    let mut copied = 0;

    for caps in LINK_SCAN.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(tag) = caps.name("start") {
            let tag = tag.as_str();
            let body = &tag[START_TAG.len()..tag.len() - START_TAG_CLOSE.len()];
            open.push(body.split_whitespace().any(|s| s == HYPERLINK_STYLE));
        } else if caps.name("end").is_some() {
            open.pop();
        } else if !open.iter().any(|&link| link) {
            let url = whole.as_str();
            debug!(url, "wrapping bare URL in hyperlink tag");
            out.push_str(&input[copied..whole.start()]);
            out.push_str(&format!(
                "{START_TAG} {HYPERLINK_STYLE}{START_TAG_CLOSE}{url}{END_TAG}"
            ));
            copied = whole.end();
        }
    }

    if copied == 0 {
        return Cow::Borrowed(input);
    }
    out.push_str(&input[copied..]);
    Cow::Owned(out)
}

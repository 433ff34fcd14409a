//! Inline style markup for console text.
//!
//! This crate parses, resolves, applies and strips a small tag language for
//! styling terminal output:
//!
//! - start tag: `<+bt bold red>` (whitespace-separated style tokens)
//! - end tag: `<-bt>` (always closes the innermost open start tag)
//!
//! Tokens prefixed with `-` negate a style (`-red`), and `-*` stops a node from
//! inheriting anything from its ancestors. Mapping style tokens to actual
//! terminal attributes is left to the consumer.
//!
//! # Example
//!
//! ```rust
//! use btcon_markup::{destyle, parse, Styling};
//!
//! let styling = Styling::enabled();
//! let text = format!("{} done", styling.apply("build", &["bold", "green"]));
//! assert_eq!(text, "<+bt bold green>build<-bt> done");
//!
//! // Visible text, without building a tree
//! assert_eq!(destyle(&text), "build done");
//!
//! // Full tree with inherited styles
//! let tree = parse("<+bt bold red><+bt -red>X<-bt><-bt>").unwrap();
//! let leaf = tree.leaves().next().unwrap();
//! assert_eq!(leaf.effective_styles().into_iter().collect::<Vec<_>>(), vec!["bold"]);
//! ```
//!
//! # Malformed input
//!
//! [`parse`] rejects unbalanced markup with a [`ParseError`]. When degraded
//! output is preferable to failure, [`parse_or_plain`] treats the whole input
//! as literal text instead.

mod error;
mod parser;
mod resolve;
mod style;
mod tree;
mod truncate;

pub use error::{ParseError, Result};
pub use parser::Parser;
pub use style::{
    apply, destyle, set_styling_enabled, styling_enabled, Styling, STYLE_ENV_VAR,
};
pub use tree::{NodeId, NodeRef, StyledText};
pub use truncate::truncate;

/// Opening sequence of a start tag.
pub const START_TAG: &str = "<+bt";
/// Terminator of a start tag.
pub const START_TAG_CLOSE: &str = ">";
/// The end tag.
pub const END_TAG: &str = "<-bt>";
/// Token marking a hyperlink; hyperlink nodes do not inherit ancestor styles.
pub const HYPERLINK_STYLE: &str = "hyperlink";
/// Token that disables inheritance for a node.
pub const INHERIT_NONE: &str = "-*";
/// Base style for ordinary text.
pub const DEFAULT_TEXT_STYLE: &str = "default_text";

/// Parses `text` with a default [`Parser`].
pub fn parse(text: &str) -> Result<StyledText> {
    Parser::new().parse(text)
}

/// Parses `text`, falling back to a single literal leaf if the markup is unbalanced.
pub fn parse_or_plain(text: &str) -> StyledText {
    parse(text).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "treating malformed markup as literal text");
        StyledText::plain(text)
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn token() -> impl Strategy<Value = String> {
        "-?[a-z_][a-z0-9_]{0,8}"
    }

    // Literal text that cannot form a tag.
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"\\-+>]{0,30}"
    }

    /// Well-formed markup of bounded depth.
    fn markup() -> impl Strategy<Value = String> {
        let leaf = plain_text();
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                (prop::collection::vec(token(), 1..4), inner.clone())
                    .prop_map(|(tokens, body)| format!("<+bt {}>{}<-bt>", tokens.join(" "), body)),
                prop::collection::vec(inner, 1..4).prop_map(|parts| parts.concat()),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn tag_free_text_is_one_leaf(s in plain_text()) {
            let tree = parse(&s).unwrap();
            let leaves: Vec<_> = tree.leaves().collect();
            prop_assert_eq!(leaves.len(), 1);
            prop_assert_eq!(leaves[0].text(), s.as_str());
            prop_assert_eq!(destyle(&s), s);
        }

        #[test]
        fn destyle_is_idempotent(s in "[<>+\\-bt a-z]{0,40}") {
            let once = destyle(&s);
            prop_assert_eq!(destyle(&once), once.clone());
        }

        #[test]
        fn leaves_match_destyle(s in markup()) {
            let tree = parse(&s).unwrap();
            prop_assert!(tree.is_completely_closed());
            prop_assert_eq!(tree.plain_text(), destyle(&s));
        }

        #[test]
        fn to_markup_reparses_to_same_text(s in markup()) {
            let tree = parse(&s).unwrap();
            let again = parse(&tree.to_markup()).unwrap();
            prop_assert_eq!(again.plain_text(), tree.plain_text());
        }

        #[test]
        fn truncate_output_is_well_formed(s in markup(), width in 0usize..20) {
            let out = truncate(&s, width, "...");
            prop_assert!(parse(&out).is_ok());
        }
    }
}

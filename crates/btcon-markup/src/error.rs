//! Error types for markup parsing.

use thiserror::Error;

/// Errors produced by [`parse`](crate::parse) when the tags in a string do not balance.
///
/// A parse error is fatal to that one call: no partial tree is ever returned.
/// Callers that prefer degraded output over failure can use
/// [`parse_or_plain`](crate::parse_or_plain), which falls back to treating the
/// whole input as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An end tag was found while no start tag was open.
    #[error("invalid closing tag at byte {offset}: {context:?}")]
    UnmatchedEndTag {
        /// Byte offset of the offending `<-bt>`.
        offset: usize,
        /// Input text up to and including the offending end tag.
        context: String,
    },

    /// Input ended while a start tag was still open.
    #[error("closing tag missing for `{tag}` opened at byte {offset}")]
    UnclosedStartTag {
        /// The full start tag that stayed open, e.g. `<+bt bold>`.
        tag: String,
        /// Byte offset where the start tag begins.
        offset: usize,
    },

    /// A start tag was never terminated by `>`.
    #[error("start tag at byte {offset} is missing its closing '>'")]
    UnterminatedStartTag {
        /// Byte offset where the start tag begins.
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset in the input where the problem was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnmatchedEndTag { offset, .. }
            | ParseError::UnclosedStartTag { offset, .. }
            | ParseError::UnterminatedStartTag { offset } => *offset,
        }
    }
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, ParseError>;

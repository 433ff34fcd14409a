//! Configuration types for table layout.

use std::sync::Arc;

use btcon_markup::DEFAULT_TEXT_STYLE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Turns a raw cell value into display text (which may contain markup).
pub type ValueRenderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Picks the style tokens for a raw cell value.
pub type StyleRenderer = Arc<dyn Fn(&Value) -> Vec<String> + Send + Sync>;

/// Text shown for `null` cells by the default value renderer.
pub const NULL_MARKER: &str = "< null >";

/// Text alignment within a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// One leading space, padding on the right.
    #[default]
    Left,
    /// Padding on the left, one trailing space.
    Right,
    /// Padding split evenly, the extra space going right.
    Center,
}

/// Glyphs used to draw the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separators {
    /// Drawn before the first cell and after every cell of a line.
    pub column: String,
    /// Repeated to form the top border and the line below each row.
    pub row: char,
    /// Repeated to form the line below the header.
    pub header: char,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            column: "|".to_string(),
            row: '-',
            header: '=',
        }
    }
}

/// Table-wide settings, loadable from configuration files.
///
/// # Example
///
/// ```rust
/// use btcon_table::TableOptions;
///
/// let options: TableOptions = serde_json::from_str(
///     r#"{ "multiline": true, "separators": { "column": "│" } }"#,
/// ).unwrap();
///
/// assert!(options.multiline);
/// assert_eq!(options.separators.column, "│");
/// assert_eq!(options.separators.row, '-');
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Border and column glyphs.
    pub separators: Separators,
    /// Styles for cells whose column has no style renderer.
    pub value_styles: Vec<String>,
    /// Styles for headers whose column sets none.
    pub header_styles: Vec<String>,
    /// Styles for column separators and border lines.
    pub separator_styles: Vec<String>,
    /// Split cell values on newlines instead of joining them into one line.
    pub multiline: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            separators: Separators::default(),
            value_styles: vec![DEFAULT_TEXT_STYLE.to_string()],
            header_styles: vec![DEFAULT_TEXT_STYLE.to_string(), "bold".to_string()],
            separator_styles: vec![DEFAULT_TEXT_STYLE.to_string()],
            multiline: false,
        }
    }
}

//! Bordered console tables for `<+bt ...>` styled text.
//!
//! A [`Table`] holds columns and rows of JSON values. Rendering happens in
//! two passes: [`Table::layout`] renders and measures every cell, then
//! [`TableLayout::render`] styles, pads and draws the result. All widths are
//! visible widths (markup stripped, wide characters counted as two), so
//! turning styling on or off never changes the layout.
//!
//! ```rust
//! use btcon_markup::{destyle, Styling};
//! use btcon_table::{Align, Table};
//! use serde_json::json;
//!
//! let mut table = Table::new();
//! table.add_column("Name");
//! table.add_column("Size").value_align(Align::Right);
//! table.add_row([json!("Cargo.toml"), json!(512)]);
//!
//! let styled = table.render_with(Styling::enabled());
//! let plain = table.render_with(Styling::disabled());
//! assert_eq!(destyle(&styled), plain);
//! assert!(plain.contains("| Cargo.toml |  512 |"));
//! ```
//!
//! Columns with a fixed width truncate oversized content; auto-width columns
//! grow to fit their widest line.

mod column;
mod error;
mod layout;
mod table;
mod types;
mod util;

pub use column::Column;
pub use error::{Result, TableError};
pub use layout::{RowLayout, TableLayout};
pub use table::Table;
pub use types::{Align, Separators, StyleRenderer, TableOptions, ValueRenderer, NULL_MARKER};
pub use util::{display_width, fit_to_width, pad, ELLIPSIS};

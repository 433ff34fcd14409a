//! The table builder.

use std::fmt;

use btcon_markup::Styling;
use serde_json::Value;
use tracing::debug;

use crate::column::Column;
use crate::error::{Result, TableError};
use crate::layout::TableLayout;
use crate::types::{Separators, TableOptions};

/// A console table: columns, rows of JSON values, and drawing options.
///
/// # Example
///
/// ```rust
/// use btcon_markup::Styling;
/// use btcon_table::Table;
/// use serde_json::json;
///
/// let mut table = Table::with_headers(["Name", "Age"]);
/// table.add_row([json!("Bob"), json!(42)]);
///
/// let out = table.render_with(Styling::disabled());
/// assert_eq!(
///     out,
///     concat!(
///         "--------------\n",
///         "| Name | Age |\n",
///         "==============\n",
///         "| Bob  | 42  |\n",
///         "--------------\n",
///     )
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
    options: TableOptions,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table using the given drawing options.
    pub fn with_options(options: TableOptions) -> Self {
        Table {
            options,
            ..Self::default()
        }
    }

    /// A table with one auto-width column per header.
    pub fn with_headers<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        let mut table = Self::new();
        for header in headers {
            table.add_column(header);
        }
        table
    }

    /// Appends an auto-width column and returns it for configuration.
    pub fn add_column(&mut self, header: impl Into<String>) -> &mut Column {
        self.columns.push(Column::new(header));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Appends a column with a fixed width. Fails if `width` is zero.
    pub fn add_column_with_width(
        &mut self,
        header: impl Into<String>,
        width: usize,
    ) -> Result<&mut Column> {
        let mut column = Column::new(header);
        column.set_width(Some(width))?;
        self.columns.push(column);
        let last = self.columns.len() - 1;
        Ok(&mut self.columns[last])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Appends a row. Missing trailing cells render blank; extra cells are ignored.
    pub fn add_row<V: Into<Value>, I: IntoIterator<Item = V>>(&mut self, values: I) -> &mut Self {
        let row: Vec<Value> = values.into_iter().map(Into::into).collect();
        if row.len() > self.columns.len() {
            debug!(
                cells = row.len(),
                columns = self.columns.len(),
                "row has more cells than columns"
            );
        }
        self.rows.push(row);
        self
    }

    /// Replaces the row at `index`.
    pub fn replace_row<V: Into<Value>, I: IntoIterator<Item = V>>(
        &mut self,
        index: usize,
        values: I,
    ) -> Result<&mut Self> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange { index, len })?;
        *slot = values.into_iter().map(Into::into).collect();
        Ok(self)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn clear_rows(&mut self) -> &mut Self {
        self.rows.clear();
        self
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TableOptions {
        &mut self.options
    }

    pub fn separators(&mut self, separators: Separators) -> &mut Self {
        self.options.separators = separators;
        self
    }

    pub fn column_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.options.separators.column = separator.into();
        self
    }

    pub fn row_separator(&mut self, glyph: char) -> &mut Self {
        self.options.separators.row = glyph;
        self
    }

    pub fn header_separator(&mut self, glyph: char) -> &mut Self {
        self.options.separators.header = glyph;
        self
    }

    /// Styles for cells of columns without a style renderer.
    pub fn default_value_styles<S, I>(&mut self, styles: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.options.value_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Styles for headers of columns that set none.
    pub fn default_header_styles<S, I>(&mut self, styles: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.options.header_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    pub fn separator_styles<S, I>(&mut self, styles: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.options.separator_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Whether cell values keep their line breaks.
    pub fn multiline(&mut self, enabled: bool) -> &mut Self {
        self.options.multiline = enabled;
        self
    }

    pub fn is_multiline(&self) -> bool {
        self.options.multiline
    }

    /// Measures the table: cell lines, row heights and column widths.
    pub fn layout(&self) -> TableLayout<'_> {
        TableLayout::measure(self)
    }

    /// Renders the table with an explicit styling choice.
    pub fn render_with(&self, styling: Styling) -> String {
        self.layout().render(styling)
    }

    /// Renders the table using the process-wide styling default.
    pub fn render(&self) -> String {
        self.render_with(Styling::global())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

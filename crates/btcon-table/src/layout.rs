//! Two-pass table rendering.
//!
//! The first pass ([`Table::layout`](crate::Table::layout)) renders every
//! cell to text, fits each line into its column and settles the final column
//! widths and row heights. The second pass ([`TableLayout::render`]) styles
//! and pads the measured lines and draws the borders. Measurement only ever
//! looks at visible text, so a layout does not depend on whether styling is
//! enabled: the same table renders with identical widths either way.

use btcon_markup::Styling;
use serde_json::Value;
use tracing::trace;

use crate::column::Column;
use crate::table::Table;
use crate::types::Align;
use crate::util::{display_width, fit_to_width, pad};

/// Measured cell lines for one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowLayout {
    cells: Vec<Vec<String>>,
    height: usize,
}

impl RowLayout {
    /// Fitted text lines of each cell, before styling and padding.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Number of physical lines this row occupies.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// The result of measuring a [`Table`]; immutable once computed.
///
/// Holding a layout borrows the table, so the table cannot change between
/// measuring and rendering.
#[derive(Debug)]
pub struct TableLayout<'a> {
    table: &'a Table,
    widths: Vec<usize>,
    headers: Vec<String>,
    rows: Vec<RowLayout>,
}

impl<'a> TableLayout<'a> {
    pub(crate) fn measure(table: &'a Table) -> Self {
        let columns = table.columns();
        let options = table.options();
        trace!(
            columns = columns.len(),
            rows = table.rows().len(),
            multiline = options.multiline,
            "measuring table"
        );

        let mut headers = Vec::with_capacity(columns.len());
        let mut widths = Vec::with_capacity(columns.len());
        for column in columns {
            let header = fit_line(&single_line(column.header()), column);
            widths.push(grow(0, display_width(&header) + 2, column.width()));
            headers.push(header);
        }

        let empty = Value::String(String::new());
        let mut rows = Vec::with_capacity(table.rows().len());
        for values in table.rows() {
            let mut cells = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value = values.get(i).unwrap_or(&empty);
                let text = column.render_value(value);
                let lines: Vec<String> = if options.multiline {
                    text.split('\n')
                        .map(|line| fit_line(line.trim(), column))
                        .collect()
                } else {
                    vec![fit_line(&single_line(&text), column)]
                };
                for line in &lines {
                    widths[i] = grow(widths[i], display_width(line) + 2, column.width());
                }
                cells.push(lines);
            }
            let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
            rows.push(RowLayout { cells, height });
        }

        trace!(?widths, "measured column widths");
        TableLayout {
            table,
            widths,
            headers,
            rows,
        }
    }

    /// Final width of each column, padding included.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Fitted header text of each column.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RowLayout] {
        &self.rows
    }

    /// Total visible width of a rendered line, borders included.
    pub fn line_width(&self) -> usize {
        let sep = display_width(&self.table.options().separators.column);
        self.widths.iter().map(|w| w + sep).sum::<usize>() + sep
    }

    /// Draws the table. Every line, the last included, ends with `\n`.
    pub fn render(&self, styling: Styling) -> String {
        let options = self.table.options();
        let columns = self.table.columns();
        let sep = styling.apply(&options.separators.column, &options.separator_styles);
        let row_border = self.border(options.separators.row, styling);
        let header_border = self.border(options.separators.header, styling);

        let mut out = String::new();
        out.push_str(&row_border);
        out.push('\n');

        out.push_str(&sep);
        for ((column, header), width) in columns.iter().zip(&self.headers).zip(&self.widths) {
            let styled = styling.apply(header, column.header_styles_or(&options.header_styles));
            out.push_str(&pad(&styled, *width, column.header_alignment()));
            out.push_str(&sep);
        }
        out.push('\n');
        out.push_str(&header_border);
        out.push('\n');

        let empty = Value::String(String::new());
        for (values, row) in self.table.rows().iter().zip(&self.rows) {
            for line in 0..row.height {
                out.push_str(&sep);
                for (i, column) in columns.iter().enumerate() {
                    let value = values.get(i).unwrap_or(&empty);
                    let text = row.cells[i].get(line).map(String::as_str).unwrap_or("");
                    let styles = column.styles_for(value, &options.value_styles);
                    let cell = cell_text(styling, text, &styles, column.value_alignment(), self.widths[i]);
                    out.push_str(&cell);
                    out.push_str(&sep);
                }
                out.push('\n');
            }
            out.push_str(&row_border);
            out.push('\n');
        }
        out
    }

    fn border(&self, glyph: char, styling: Styling) -> String {
        let line: String = std::iter::repeat(glyph).take(self.line_width()).collect();
        styling.apply(&line, &self.table.options().separator_styles)
    }
}

fn cell_text(styling: Styling, text: &str, styles: &[String], align: Align, width: usize) -> String {
    pad(&styling.apply(text, styles), width, align)
}

/// Grows an auto-width column to `candidate`, or caps it at the fixed width.
fn grow(current: usize, candidate: usize, fixed: Option<usize>) -> usize {
    let grown = current.max(candidate);
    match fixed {
        Some(limit) => grown.min(limit),
        None => grown,
    }
}

fn fit_line(line: &str, column: &Column) -> String {
    match column.width() {
        Some(limit) => fit_to_width(line, limit),
        None => line.to_string(),
    }
}

fn single_line(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

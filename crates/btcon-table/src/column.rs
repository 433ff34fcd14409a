//! Per-column configuration.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, TableError};
use crate::types::{Align, StyleRenderer, ValueRenderer, NULL_MARKER};

/// A table column: header, width policy, alignment, styles and renderers.
///
/// Columns are created through [`Table::add_column`](crate::Table::add_column),
/// which hands back `&mut Column` for chained configuration:
///
/// ```rust
/// use btcon_table::{Align, Table};
///
/// let mut table = Table::new();
/// table
///     .add_column("Size")
///     .value_align(Align::Right)
///     .style_renderer(|_| vec!["cyan".to_string()]);
/// ```
#[derive(Clone)]
pub struct Column {
    header: String,
    width: Option<usize>,
    header_align: Align,
    value_align: Align,
    header_styles: Option<Vec<String>>,
    value_renderer: Option<ValueRenderer>,
    style_renderer: Option<StyleRenderer>,
    null_repr: String,
}

impl Column {
    pub(crate) fn new(header: impl Into<String>) -> Self {
        Column {
            header: header.into(),
            width: None,
            header_align: Align::Center,
            value_align: Align::Left,
            header_styles: None,
            value_renderer: None,
            style_renderer: None,
            null_repr: NULL_MARKER.to_string(),
        }
    }

    /// The header text.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = header.into();
        self
    }

    /// Fixed width in columns, or `None` when the column sizes to its content.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Sets a fixed width, or auto width with `None`.
    ///
    /// A fixed width bounds the column: longer content is truncated to fit.
    /// `Some(0)` is rejected.
    pub fn set_width(&mut self, width: Option<usize>) -> Result<&mut Self> {
        if width == Some(0) {
            return Err(TableError::InvalidWidth {
                header: self.header.clone(),
                width: 0,
            });
        }
        self.width = width;
        Ok(self)
    }

    pub fn header_alignment(&self) -> Align {
        self.header_align
    }

    pub fn header_align(&mut self, align: Align) -> &mut Self {
        self.header_align = align;
        self
    }

    pub fn value_alignment(&self) -> Align {
        self.value_align
    }

    pub fn value_align(&mut self, align: Align) -> &mut Self {
        self.value_align = align;
        self
    }

    /// Styles for the header cell. An empty list restores the table default.
    pub fn header_styles<S, I>(&mut self, styles: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let styles: Vec<String> = styles.into_iter().map(Into::into).collect();
        self.header_styles = if styles.is_empty() { None } else { Some(styles) };
        self
    }

    /// Replaces the function turning cell values into text.
    ///
    /// The result may contain markup; it is measured by its visible width.
    pub fn value_renderer<F>(&mut self, render: F) -> &mut Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.value_renderer = Some(Arc::new(render));
        self
    }

    /// Restores the default value renderer.
    pub fn reset_value_renderer(&mut self) -> &mut Self {
        self.value_renderer = None;
        self
    }

    /// Replaces the function choosing style tokens for each cell value.
    pub fn style_renderer<F>(&mut self, styles: F) -> &mut Self
    where
        F: Fn(&Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.style_renderer = Some(Arc::new(styles));
        self
    }

    /// Restores the table's default value styles for this column.
    pub fn reset_style_renderer(&mut self) -> &mut Self {
        self.style_renderer = None;
        self
    }

    /// Text the default value renderer shows for `null`.
    pub fn null_repr(&mut self, marker: impl Into<String>) -> &mut Self {
        self.null_repr = marker.into();
        self
    }

    /// Display text for a cell value.
    pub fn render_value(&self, value: &Value) -> String {
        match &self.value_renderer {
            Some(render) => render(value),
            None => match value {
                Value::Null => self.null_repr.clone(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }

    pub(crate) fn styles_for(&self, value: &Value, defaults: &[String]) -> Vec<String> {
        match &self.style_renderer {
            Some(styles) => styles(value),
            None => defaults.to_vec(),
        }
    }

    pub(crate) fn header_styles_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        self.header_styles.as_deref().unwrap_or(defaults)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("width", &self.width)
            .field("header_align", &self.header_align)
            .field("value_align", &self.value_align)
            .field("header_styles", &self.header_styles)
            .field("custom_value_renderer", &self.value_renderer.is_some())
            .field("custom_style_renderer", &self.style_renderer.is_some())
            .field("null_repr", &self.null_repr)
            .finish()
    }
}

//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use super::Direction;
use crate::model::{TableRow, Value};

/// Custom cell renderer: receives the field value (if any) and the row.
pub type CellRenderer<T> = Arc<dyn Fn(Option<&Value>, &T) -> String + Send + Sync>;

/// Custom sort indicator: receives the direction if the column is active.
pub type SortIcon = Arc<dyn Fn(Option<Direction>) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns are immutable descriptors supplied per render pass: the key to
/// read from each row, header text, whether the header sorts, and optional
/// renderers. Columns are sortable unless told otherwise.
///
/// # Examples
///
/// ```
/// use datagrid_lib::model::Record;
/// use datagrid_lib::table::Column;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("id", "ID").unsortable(),
///     Column::new("title", "Title"),
///     Column::new("price", "Price").render(|value, _row| {
///         value.map(|v| format!("${}", v.display_string())).unwrap_or_default()
///     }),
/// ];
/// assert!(columns[1].is_sortable());
/// ```
pub struct Column<T> {
    key: String,
    label: String,
    sortable: bool,
    render: Option<CellRenderer<T>>,
    sort_icon: Option<SortIcon>,
}

impl<T> Column<T> {
    /// Create a sortable column reading `key` with header `label`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            render: None,
            sort_icon: None,
        }
    }

    /// Make the column non-sortable.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set a custom cell renderer.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &T) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Set a custom sort indicator.
    pub fn sort_icon<F>(mut self, icon: F) -> Self
    where
        F: Fn(Option<Direction>) -> String + Send + Sync + 'static,
    {
        self.sort_icon = Some(Arc::new(icon));
        self
    }

    /// The row field this column reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether header clicks sort by this column.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Header indicator for the given active direction.
    ///
    /// Defaults to `↕` when unsorted, `↑` ascending and `↓` descending.
    pub fn indicator(&self, active: Option<Direction>) -> String {
        if let Some(icon) = &self.sort_icon {
            return icon(active);
        }
        match active {
            None => "↕",
            Some(Direction::Asc) => "↑",
            Some(Direction::Desc) => "↓",
        }
        .to_string()
    }
}

impl<T: TableRow> Column<T> {
    /// Renders this column's cell for a row.
    pub fn render_cell(&self, row: &T) -> String {
        let value = row.field(&self.key);
        match &self.render {
            Some(render) => render(value.as_ref(), row),
            None => value.map(|v| v.display_string()).unwrap_or_default(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
            sort_icon: self.sort_icon.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .field("sort_icon", &self.sort_icon.is_some())
            .finish()
    }
}

//! Table engine state.

use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};

use super::pagination;
use super::selection::{Coverage, Selection};
use super::sort::{Direction, SortKeys, SortState};
use super::Column;
use crate::model::{RowId, TableRow, Value};

/// Callback receiving a fresh copy of the selection after every change.
pub type SelectionObserver = Box<dyn FnMut(HashSet<RowId>) + Send>;

/// Options for a [`TableState`].
///
/// # Example
///
/// ```
/// use datagrid_lib::table::{Direction, TableOptions};
///
/// let options = TableOptions::default()
///     .with_items_per_page(25)
///     .with_default_sort("name", Direction::Desc)
///     .with_selection(true);
/// assert_eq!(options.items_per_page, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Rows per page. Values below 1 are treated as 1.
    ///
    /// Default: 10
    pub items_per_page: usize,
    /// Column key the table starts sorted by.
    pub default_sort_key: Option<String>,
    /// Direction of the initial sort.
    pub default_sort_direction: Direction,
    /// Whether rows can be selected.
    pub enable_selection: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            default_sort_key: None,
            default_sort_direction: Direction::Asc,
            enable_selection: false,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Sets the initial sort.
    pub fn with_default_sort(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.default_sort_key = Some(key.into());
        self.default_sort_direction = direction;
        self
    }

    /// Enables or disables row selection.
    pub fn with_selection(mut self, enable: bool) -> Self {
        self.enable_selection = enable;
        self
    }
}

/// Sortable, selectable, paginated view over a data sequence.
///
/// `TableState<T>` owns sort, selection and page state and derives the
/// ordered, visible rows from the input data:
/// - Sorting by column key (toggle direction on the active key)
/// - Selection by [`RowId`], scoped to the visible page for "select all"
/// - Pagination with clamping
///
/// No operation fails. Unknown keys sort everything as equal, out-of-range
/// pages are clamped, and selection calls are ignored when selection is
/// disabled.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Record, RowId, TableRow};
/// use datagrid_lib::table::{TableOptions, TableState};
///
/// let rows = vec![
///     Record::new().set("id", 1).set("name", "b"),
///     Record::new().set("id", 2).set("name", "a"),
/// ];
/// let mut table = TableState::new(rows, TableOptions::default().with_selection(true));
/// table.handle_sort("name");
/// assert_eq!(table.current_items()[0].row_id(), RowId::Int(2));
///
/// table.select_all();
/// assert!(table.is_all_selected());
/// ```
pub struct TableState<T: TableRow> {
    rows: Vec<T>,
    /// Row indices in sorted order.
    order: Vec<usize>,
    items_per_page: usize,
    current_page: usize,
    sort: SortState,
    selection: Selection,
    observer: Option<SelectionObserver>,
}

impl<T: TableRow> TableState<T> {
    /// Create a table over `rows`.
    pub fn new(rows: Vec<T>, options: TableOptions) -> Self {
        let mut table = Self {
            rows,
            order: Vec::new(),
            items_per_page: options.items_per_page.max(1),
            current_page: 1,
            sort: SortState::new(options.default_sort_key, options.default_sort_direction),
            selection: if options.enable_selection {
                Selection::multi()
            } else {
                Selection::none()
            },
            observer: None,
        };
        table.resort();
        table
    }

    /// Register the selection observer, replacing any previous one.
    pub fn on_selection_change(&mut self, observer: impl FnMut(HashSet<RowId>) + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the input rows (e.g. after a refetch).
    ///
    /// Sort and selection are kept. The page resets to 1 when it no longer
    /// exists.
    pub fn set_data(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.resort();
        if self.current_page > self.total_pages().max(1) {
            debug!(
                "[table] page {} out of range after data change, back to 1",
                self.current_page
            );
            self.current_page = 1;
        }
    }

    /// The input rows, in input order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// All rows in sorted order.
    pub fn sorted_items(&self) -> impl Iterator<Item = &T> {
        self.order.iter().map(|&i| &self.rows[i])
    }

    /// Rows on the current page, in sorted order.
    pub fn current_items(&self) -> Vec<&T> {
        let start = (self.current_page - 1) * self.items_per_page;
        self.order
            .iter()
            .skip(start)
            .take(self.items_per_page)
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Ids of the rows on the current page.
    pub fn visible_ids(&self) -> Vec<RowId> {
        self.current_items()
            .into_iter()
            .map(TableRow::row_id)
            .collect()
    }

    /// The identity of a row: its `id`, or its structural fallback.
    pub fn item_id(&self, row: &T) -> RowId {
        row.row_id()
    }

    /// Total number of rows.
    pub fn total_items(&self) -> usize {
        self.rows.len()
    }

    fn resort(&mut self) {
        self.order = (0..self.rows.len()).collect();
        let Some(key) = self.sort.key() else { return };

        let values: Vec<Option<Value>> = self.rows.iter().map(|row| row.field(key)).collect();
        let keys = SortKeys::from_column(&values);
        let direction = self.sort.direction();
        self.order.sort_by(|&a, &b| direction.apply(keys.compare(a, b)));
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Number of pages (0 when there are no rows).
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.rows.len(), self.items_per_page)
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Go to a page, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        let clamped = pagination::clamp_page(page, self.total_pages());
        if clamped != page {
            trace!("[table] page {} clamped to {}", page, clamped);
        }
        self.current_page = clamped;
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    /// Go to the previous page, if any.
    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Returns `true` if there is a page after the current one.
    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Returns `true` if there is a page before the current one.
    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// The active sort key, if any.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort.key()
    }

    /// The current sort direction.
    pub fn sort_direction(&self) -> Direction {
        self.sort.direction()
    }

    /// Toggle sort for a key.
    ///
    /// If the key is already active, flips the direction. A new key sorts
    /// ascending. The key is not checked against any column; use
    /// [`sort_by_column`](Self::sort_by_column) to respect `sortable`.
    pub fn handle_sort(&mut self, key: &str) {
        let direction = self.sort.toggle(key);
        debug!("[table] sort by {} {}", key, direction.as_str());
        self.resort();
    }

    /// Header click: sorts by the column unless it is marked unsortable.
    pub fn sort_by_column(&mut self, column: &Column<T>) {
        if column.is_sortable() {
            self.handle_sort(column.key());
        } else {
            trace!("[table] column {} is not sortable", column.key());
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Whether selection is enabled.
    pub fn selection_enabled(&self) -> bool {
        self.selection.mode() != super::SelectionMode::None
    }

    /// All selected ids, including ids outside the current page.
    pub fn selected_items(&self) -> &HashSet<RowId> {
        self.selection.selected()
    }

    /// Check if a row is selected by id.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Flip the selection of a row.
    pub fn toggle_selection(&mut self, id: impl Into<RowId>) {
        if self.selection.toggle(id.into()) {
            self.notify();
        }
    }

    /// Select exactly the rows on the current page.
    ///
    /// Ids selected on other pages are dropped.
    pub fn select_all(&mut self) {
        let visible = self.visible_ids();
        if self.selection.select_exactly(visible) {
            self.notify();
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.notify();
        }
    }

    /// Header checkbox behaviour: clear when all are selected, otherwise
    /// select the page.
    pub fn toggle_all(&mut self) {
        if self.is_all_selected() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    /// How much of the current page is selected.
    pub fn coverage(&self) -> Coverage {
        self.selection.coverage(&self.visible_ids())
    }

    /// Every row on the current page is selected (and there is at least one).
    pub fn is_all_selected(&self) -> bool {
        self.coverage() == Coverage::All
    }

    /// Some, but not all, rows on the current page are selected.
    pub fn is_indeterminate(&self) -> bool {
        self.coverage() == Coverage::Partial
    }

    fn notify(&mut self) {
        debug!("[table] selection changed: {} selected", self.selection.len());
        if let Some(observer) = self.observer.as_mut() {
            observer(self.selection.snapshot());
        }
    }
}

impl<T: TableRow + fmt::Debug> fmt::Debug for TableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("rows", &self.rows)
            .field("order", &self.order)
            .field("items_per_page", &self.items_per_page)
            .field("current_page", &self.current_page)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

//! Render projection of a table.
//!
//! [`TableView`] is plain data: whatever draws the table (HTML, terminal,
//! tests) reads it and calls back into [`TableState`] on interaction.

use super::pagination::{self, CompactPages};
use super::selection::Coverage;
use super::{Column, TableState};
use crate::model::{RowId, TableRow};

/// Message shown when the current page has no rows.
pub const EMPTY_MESSAGE: &str = "No data available";

/// Maximum number of numbered page buttons.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// State of the "select all" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Sort indicator; `None` for unsortable columns.
    pub indicator: Option<String>,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    pub selected: bool,
    pub cells: Vec<String>,
}

/// Everything a renderer needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Header checkbox, present when selection is enabled.
    pub select_all: Option<CheckState>,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    /// Set when there are no rows to show.
    pub empty_message: Option<&'static str>,
    /// `start-end of total`, present when there is more than one page.
    pub range_label: Option<String>,
    /// Numbered page buttons around the current page.
    pub page_buttons: Vec<usize>,
    /// Compact layout with an overflow dropdown, for long page counts.
    pub compact_pages: CompactPages,
    pub current_page: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    /// `N item(s) selected`, present when selection is enabled and non-empty.
    pub selection_summary: Option<String>,
}

impl<T: TableRow> TableState<T> {
    /// Project the current page through `columns`.
    pub fn view(&self, columns: &[Column<T>]) -> TableView {
        let selection_enabled = self.selection_enabled();

        let headers = columns
            .iter()
            .map(|column| {
                let sortable = column.is_sortable();
                HeaderCell {
                    key: column.key().to_string(),
                    label: column.label().to_string(),
                    sortable,
                    indicator: sortable
                        .then(|| column.indicator(self.sort_state().direction_for(column.key()))),
                }
            })
            .collect();

        let rows: Vec<RowView> = self
            .current_items()
            .into_iter()
            .map(|row| {
                let id = row.row_id();
                RowView {
                    selected: self.is_selected(&id),
                    cells: columns.iter().map(|c| c.render_cell(row)).collect(),
                    id,
                }
            })
            .collect();

        let select_all = selection_enabled.then(|| match self.coverage() {
            Coverage::All => CheckState::Checked,
            Coverage::Partial => CheckState::Indeterminate,
            Coverage::None | Coverage::Empty => CheckState::Unchecked,
        });

        let total_pages = self.total_pages();
        let selected = self.selected_items().len();

        TableView {
            select_all,
            headers,
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
            range_label: (total_pages > 1).then(|| {
                pagination::range_label(self.current_page(), self.items_per_page(), self.total_items())
            }),
            page_buttons: pagination::page_window(self.current_page(), total_pages, MAX_VISIBLE_PAGES)
                .collect(),
            compact_pages: pagination::compact_pages(self.current_page(), total_pages),
            current_page: self.current_page(),
            can_go_prev: self.can_go_prev(),
            can_go_next: self.can_go_next(),
            selection_summary: (selection_enabled && selected > 0)
                .then(|| format!("{} item(s) selected", selected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::table::{Direction, TableOptions};

    fn columns() -> Vec<Column<Record>> {
        vec![
            Column::new("id", "ID").unsortable(),
            Column::new("name", "Name"),
        ]
    }

    fn rows(count: i64) -> Vec<Record> {
        (1..=count)
            .map(|i| Record::new().set("id", i).set("name", format!("row {}", i)))
            .collect()
    }

    #[test]
    fn test_headers_and_indicators() {
        let options = TableOptions::default().with_default_sort("name", Direction::Desc);
        let table = TableState::new(rows(2), options);
        let view = table.view(&columns());
        assert_eq!(view.headers[0].indicator, None);
        assert_eq!(view.headers[1].indicator.as_deref(), Some("↓"));
        assert_eq!(view.rows[0].cells, vec!["2", "row 2"]);
        assert_eq!(view.select_all, None);
    }

    #[test]
    fn test_empty_view() {
        let table: TableState<Record> = TableState::new(vec![], TableOptions::default());
        let view = table.view(&columns());
        assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
        assert!(view.page_buttons.is_empty());
        assert_eq!(view.compact_pages.all().count(), 0);
        assert_eq!(view.range_label, None);
    }

    #[test]
    fn test_paging_and_selection_summary() {
        let options = TableOptions::default().with_items_per_page(2).with_selection(true);
        let mut table = TableState::new(rows(5), options);
        table.go_to_page(2);
        table.toggle_selection(3);

        let view = table.view(&columns());
        assert_eq!(view.range_label.as_deref(), Some("3-4 of 5"));
        assert_eq!(view.page_buttons, vec![1, 2, 3]);
        assert_eq!(view.select_all, Some(CheckState::Indeterminate));
        assert!(view.rows[0].selected);
        assert!(!view.rows[1].selected);
        assert_eq!(view.selection_summary.as_deref(), Some("1 item(s) selected"));
    }

    #[test]
    fn test_compact_pages_follow_current_page() {
        let options = TableOptions::default().with_items_per_page(1);
        let mut table = TableState::new(rows(12), options);
        table.go_to_page(6);

        let view = table.view(&columns());
        assert_eq!(view.compact_pages.leading, vec![1, 6, 7]);
        assert_eq!(view.compact_pages.overflow, 8..=10);
        assert_eq!(view.compact_pages.trailing, vec![11, 12]);
    }
}

//! Row selection tracked by id.

use std::collections::HashSet;

use crate::model::RowId;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// Multiple rows can be selected (checkbox style).
    Multi,
}

/// How much of the visible window is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Nothing is visible.
    Empty,
    /// No visible row is selected.
    None,
    /// Some, but not all, visible rows are selected.
    Partial,
    /// Every visible row is selected.
    All,
}

/// Tracks selected rows by their ids.
///
/// Ids stay selected when the rows leave the visible window (sorting, paging);
/// [`coverage`](Selection::coverage) only looks at the ids it is given.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create selection with no selection allowed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create multi-selection mode.
    pub fn multi() -> Self {
        Self {
            mode: SelectionMode::Multi,
            selected: HashSet::new(),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Toggle selection for an id. Returns true if selection changed.
    pub fn toggle(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Multi => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
        }
    }

    /// Replace the selection with exactly `ids`. Returns true if allowed.
    pub fn select_exactly(&mut self, ids: impl IntoIterator<Item = RowId>) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Multi => {
                self.selected = ids.into_iter().collect();
                true
            }
        }
    }

    /// Clear all selections. Returns true if allowed.
    pub fn clear(&mut self) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Multi => {
                self.selected.clear();
                true
            }
        }
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// All selected ids.
    pub fn selected(&self) -> &HashSet<RowId> {
        &self.selected
    }

    /// A fresh copy of the selected ids.
    pub fn snapshot(&self) -> HashSet<RowId> {
        self.selected.clone()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Measures the selection against the visible ids.
    pub fn coverage<'a>(&self, visible: impl IntoIterator<Item = &'a RowId>) -> Coverage {
        let mut total = 0;
        let mut hits = 0;
        for id in visible {
            total += 1;
            if self.selected.contains(id) {
                hits += 1;
            }
        }
        match (total, hits) {
            (0, _) => Coverage::Empty,
            (_, 0) => Coverage::None,
            (t, h) if t == h => Coverage::All,
            _ => Coverage::Partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<RowId> {
        values.iter().copied().map(RowId::Int).collect()
    }

    #[test]
    fn test_none_mode_ignores_changes() {
        let mut selection = Selection::none();
        assert!(!selection.toggle(RowId::Int(1)));
        assert!(!selection.select_exactly(ids(&[1, 2])));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = Selection::multi();
        selection.toggle(RowId::Int(1));
        assert!(selection.is_selected(&RowId::Int(1)));
        selection.toggle(RowId::Int(1));
        assert!(!selection.is_selected(&RowId::Int(1)));
    }

    #[test]
    fn test_coverage() {
        let mut selection = Selection::multi();
        let visible = ids(&[1, 2]);
        assert_eq!(selection.coverage(&Vec::new()), Coverage::Empty);
        assert_eq!(selection.coverage(&visible), Coverage::None);
        selection.toggle(RowId::Int(1));
        assert_eq!(selection.coverage(&visible), Coverage::Partial);
        selection.toggle(RowId::Int(2));
        assert_eq!(selection.coverage(&visible), Coverage::All);
        // Off-window ids don't count.
        selection.toggle(RowId::Int(3));
        assert_eq!(selection.coverage(&visible), Coverage::All);
    }
}

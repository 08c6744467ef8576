//! Committed filter state plus a draft buffer for the filter form.
//!
//! Form edits land in the draft and reach the committed state only on
//! [`FilterStore::commit`] (the Search action). Table actions (sort toggles,
//! paging) and chip removals act on the committed state directly and are
//! mirrored into the draft so the form stays in sync.

use crate::models::{FilterField, FilterState, Pagination, SortBy, SortOrder};

#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    committed: FilterState,
    draft: FilterState,
}

impl FilterStore {
    pub fn new(initial: FilterState) -> Self {
        Self {
            committed: initial.clone(),
            draft: initial,
        }
    }

    pub fn committed(&self) -> &FilterState {
        &self.committed
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FilterState {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: FilterState) {
        self.draft = draft;
    }

    /// Whether the draft differs from what is committed.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    /// Copy the draft into the committed state and return it.
    pub fn commit(&mut self) -> &FilterState {
        self.committed = self.draft.clone();
        &self.committed
    }

    /// Throw away uncommitted form edits.
    pub fn reset_draft(&mut self) {
        self.draft = self.committed.clone();
    }

    /// Apply `edit` to the committed state and mirror it into the draft.
    pub fn update<F>(&mut self, edit: F) -> &FilterState
    where
        F: FnOnce(&mut FilterState),
    {
        edit(&mut self.committed);
        self.draft = self.committed.clone();
        &self.committed
    }

    /// Column header click: ascending first, a second click on the same
    /// ascending column flips to descending. Always resets pagination.
    pub fn toggle_sort(&mut self, column: SortBy) -> &FilterState {
        let order = if self.committed.sort_by() == column
            && self.committed.sort_order() == SortOrder::Asc
        {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.update(|f| f.set_sort(column, order))
    }

    /// Move to the next page. Returns `false` when there is none.
    pub fn next_page(&mut self, pagination: &Pagination) -> bool {
        if !pagination.has_next() {
            return false;
        }
        self.update(|f| f.set_after(&pagination.after));
        true
    }

    /// Move to the previous page. Returns `false` when there is none.
    pub fn previous_page(&mut self, pagination: &Pagination) -> bool {
        if !pagination.has_previous() {
            return false;
        }
        self.update(|f| f.set_before(&pagination.before));
        true
    }

    /// Empty every user filter. Sort and cursors are left alone.
    pub fn clear_filters(&mut self) -> &FilterState {
        self.update(|f| {
            for field in FilterField::ALL {
                f.field_mut(field).clear();
            }
        })
    }

    /// Remove a single filter chip.
    pub fn remove_filter(&mut self, field: FilterField) -> &FilterState {
        self.update(|f| f.field_mut(field).clear())
    }
}

//! Application context for one catalog window: the store plus the view state
//! layered on top of it (active filter, origin options, selection, dialog).

use shared::{
    domain::{BreedRecord, OriginFilter, RecordId},
    error::StoreError,
};
use tracing::debug;

use crate::{
    dialog::{CloseOutcome, DetailDialog, DialogTransition},
    store::{RecordStore, TableRow},
};

#[derive(Debug, Default)]
pub struct CatalogSession {
    store: RecordStore,
    filter: OriginFilter,
    origins: Vec<String>,
    selected: Option<RecordId>,
    dialog: Option<DetailDialog>,
}

impl CatalogSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<BreedRecord>) -> Self {
        let mut session = Self::new();
        session.seed(records);
        session
    }

    /// Replaces the whole collection. Local edits and deletions are lost, the
    /// selection and any open dialog are dropped. The active filter is kept.
    pub fn seed(&mut self, records: Vec<BreedRecord>) {
        self.store.replace_all(records);
        self.selected = None;
        self.dialog = None;
        self.refresh_derived_state();
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn origin_filter(&self) -> &OriginFilter {
        &self.filter
    }

    /// Distinct origins of the current collection, ascending.
    pub fn origin_options(&self) -> &[String] {
        &self.origins
    }

    pub fn select_origin(&mut self, filter: OriginFilter) {
        if self.filter != filter {
            debug!(filter = filter.label(), "origin filter changed");
            self.filter = filter;
            self.drop_hidden_selection();
        }
    }

    /// The current projection under the active filter.
    pub fn rows(&self) -> Vec<TableRow> {
        self.store.project(&self.filter)
    }

    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    pub fn shown_count(&self) -> usize {
        self.store.filter_by_origin(&self.filter).len()
    }

    pub fn select(&mut self, id: Option<RecordId>) {
        self.selected = id.filter(|id| self.is_visible(*id));
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.selected
    }

    /// Deletes the selected record. A missing selection or a stale id is a
    /// no-op returning `None`.
    pub fn delete_selected(&mut self) -> Option<BreedRecord> {
        let id = self.selected.take()?;
        let Some(removed) = self.store.delete(id) else {
            debug!(record = %id, "selected breed no longer exists; nothing deleted");
            return None;
        };
        if self.dialog.as_ref().map(DetailDialog::record_id) == Some(id) {
            self.dialog = None;
        }
        self.refresh_derived_state();
        Some(removed)
    }

    /// Removes every record with this name.
    pub fn delete_by_name(&mut self, name: &str) -> usize {
        let removed = self.store.delete_by_name(name);
        if removed > 0 {
            if let Some(dialog) = &self.dialog {
                if self.store.get(dialog.record_id()).is_none() {
                    self.dialog = None;
                }
            }
            self.refresh_derived_state();
        }
        removed
    }

    /// Opens the detail dialog for a row. Returns `false` for stale ids.
    pub fn open_details(&mut self, id: RecordId) -> bool {
        match DetailDialog::open(&self.store, id) {
            Some(dialog) => {
                self.selected = Some(id);
                self.dialog = Some(dialog);
                true
            }
            None => {
                debug!(record = %id, "row no longer resolves to a breed; dialog not opened");
                false
            }
        }
    }

    pub fn dialog(&self) -> Option<&DetailDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut DetailDialog> {
        self.dialog.as_mut()
    }

    /// Runs the dialog's "Edit"/"Save" action. `None` when no dialog is open.
    pub fn toggle_dialog(&mut self) -> Option<Result<DialogTransition, StoreError>> {
        let dialog = self.dialog.as_mut()?;
        let result = dialog.toggle(&mut self.store);
        if matches!(result, Ok(DialogTransition::Saved)) {
            self.refresh_derived_state();
        }
        Some(result)
    }

    pub fn close_dialog(&mut self) -> Option<CloseOutcome> {
        let dialog = self.dialog.take()?;
        let outcome = dialog.close(&self.store);
        self.drop_hidden_selection();
        Some(outcome)
    }

    fn is_visible(&self, id: RecordId) -> bool {
        self.store
            .get(id)
            .is_some_and(|record| self.filter.matches(record))
    }

    fn drop_hidden_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.is_visible(id) {
                self.selected = None;
            }
        }
    }

    fn refresh_derived_state(&mut self) {
        self.origins = self.store.list_distinct_origins();
        self.drop_hidden_selection();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

//! Detail/edit dialog for a single stored breed.
//!
//! The dialog never holds a reference into the store. It keeps the record id
//! plus a private edit buffer, and only writes back through
//! [`RecordStore::update_record`] on the save transition.

use shared::{
    domain::{BreedField, BreedPatch, BreedRecord, RecordId},
    error::StoreError,
};

use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTransition {
    BeganEditing,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    DiscardedEdits,
}

#[derive(Debug, Clone)]
pub struct DetailDialog {
    record_id: RecordId,
    mode: DialogMode,
    buffer: BreedRecord,
}

impl DetailDialog {
    /// Returns `None` when the id no longer resolves (stale selection).
    pub fn open(store: &RecordStore, record_id: RecordId) -> Option<Self> {
        let record = store.get(record_id)?;
        Some(Self {
            record_id,
            mode: DialogMode::Viewing,
            buffer: record.clone(),
        })
    }

    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == DialogMode::Editing
    }

    pub fn action_label(&self) -> &'static str {
        match self.mode {
            DialogMode::Viewing => "Edit",
            DialogMode::Editing => "Save",
        }
    }

    pub fn field(&self, field: BreedField) -> &str {
        field.get(&self.buffer)
    }

    /// Writes into the edit buffer. Rejected (returns `false`) while viewing.
    pub fn set_field(&mut self, field: BreedField, value: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        *field.get_mut(&mut self.buffer) = value.into();
        true
    }

    pub fn has_unsaved_changes(&self, store: &RecordStore) -> bool {
        self.is_editing() && store.get(self.record_id) != Some(&self.buffer)
    }

    /// The "Edit"/"Save" action.
    ///
    /// On save the buffer is committed before the dialog returns to viewing.
    /// A failed commit still leaves the dialog in viewing mode, with the
    /// store untouched.
    pub fn toggle(&mut self, store: &mut RecordStore) -> Result<DialogTransition, StoreError> {
        match self.mode {
            DialogMode::Viewing => {
                self.mode = DialogMode::Editing;
                Ok(DialogTransition::BeganEditing)
            }
            DialogMode::Editing => {
                self.mode = DialogMode::Viewing;
                store.update_record(self.record_id, BreedPatch::replace_with(self.buffer.clone()))?;
                Ok(DialogTransition::Saved)
            }
        }
    }

    pub fn close(self, store: &RecordStore) -> CloseOutcome {
        if self.has_unsaved_changes(store) {
            tracing::debug!(record = %self.record_id, "discarding uncommitted breed edits");
            CloseOutcome::DiscardedEdits
        } else {
            CloseOutcome::Closed
        }
    }
}

#[cfg(test)]
#[path = "tests/dialog_tests.rs"]
mod tests;

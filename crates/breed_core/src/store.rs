use std::collections::BTreeSet;

use shared::{
    domain::{BreedPatch, BreedRecord, OriginFilter, RecordId},
    error::StoreError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBreed {
    pub id: RecordId,
    pub record: BreedRecord,
}

/// One rendered table row. The id is captured at render time so later
/// actions on the row resolve to the exact record that was displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: RecordId,
    pub name: String,
    pub origin: String,
    pub temperament: String,
}

impl From<&StoredBreed> for TableRow {
    fn from(value: &StoredBreed) -> Self {
        Self {
            id: value.id,
            name: value.record.name.clone(),
            origin: value.record.origin.clone(),
            temperament: value.record.temperament.clone(),
        }
    }
}

/// Authoritative, ordered in-memory collection of breed records.
///
/// Records only change through [`RecordStore::update_record`] and the delete
/// operations. Ids are handed out monotonically and never reused, even across
/// [`RecordStore::replace_all`].
#[derive(Debug, Default)]
pub struct RecordStore {
    entries: Vec<StoredBreed>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = BreedRecord>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    pub fn replace_all(&mut self, records: impl IntoIterator<Item = BreedRecord>) {
        self.entries.clear();
        for record in records {
            let id = self.allocate_id();
            self.entries.push(StoredBreed { id, record });
        }
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredBreed> {
        self.entries.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&BreedRecord> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.record)
    }

    /// First record with this exact name.
    pub fn find_by_name(&self, name: &str) -> Option<RecordId> {
        self.entries
            .iter()
            .find(|entry| entry.record.name == name)
            .map(|entry| entry.id)
    }

    pub fn filter_by_origin(&self, filter: &OriginFilter) -> Vec<&BreedRecord> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(&entry.record))
            .map(|entry| &entry.record)
            .collect()
    }

    pub fn project(&self, filter: &OriginFilter) -> Vec<TableRow> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(&entry.record))
            .map(TableRow::from)
            .collect()
    }

    /// Removes every record with this name and returns how many went away.
    pub fn delete_by_name(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.record.name != name);
        before - self.entries.len()
    }

    pub fn delete(&mut self, id: RecordId) -> Option<BreedRecord> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).record)
    }

    pub fn update_record(&mut self, id: RecordId, patch: BreedPatch) -> Result<(), StoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(StoreError::UnknownRecord(id))?;
        entry.record.apply(patch);
        Ok(())
    }

    /// Unique origins of the current collection, ascending. The empty origin
    /// is included when some record has none.
    pub fn list_distinct_origins(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.record.origin.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;

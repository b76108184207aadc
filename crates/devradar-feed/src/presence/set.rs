//! The merged set of presence records surfaced to the display layer.

use std::collections::BTreeMap;

use devradar_common::PresenceRecord;

/// Result of merging one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Presence records keyed by id. At most one record per id; the latest
/// write wins. Iteration is ordered by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceSet {
    records: BTreeMap<String, PresenceRecord>,
}

impl PresenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, replacing any record with the same id.
    pub fn upsert(&mut self, record: PresenceRecord) -> Upsert {
        match self.records.insert(record.id.clone(), record) {
            Some(_) => Upsert::Replaced,
            None => Upsert::Inserted,
        }
    }

    /// Clear the set and reseed it. Later duplicates in `records` win.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = PresenceRecord>) {
        self.records.clear();
        for record in records {
            self.upsert(record);
        }
    }

    pub fn get(&self, id: &str) -> Option<&PresenceRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresenceRecord> {
        self.records.values()
    }

    pub fn to_vec(&self) -> Vec<PresenceRecord> {
        self.iter().cloned().collect()
    }
}

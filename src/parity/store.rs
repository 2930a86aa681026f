//! Override store
//!
//! Holds every parity record of the current map, at most one per identity
//! key. Generated records are thrown away and rebuilt on each full pass;
//! manually tagged records persist until their note disappears.

use std::collections::{HashMap, HashSet};

use super::types::{IdentityKey, ParityRecord};
use crate::note::Note;

#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    records: Vec<ParityRecord>,
    index: HashMap<IdentityKey, usize>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from manual records, keeping the last record of any
    /// duplicated key.
    pub fn from_manual(records: impl IntoIterator<Item = ParityRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert_manual(record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&ParityRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn get_note(&self, note: &Note) -> Option<&ParityRecord> {
        self.get(&IdentityKey::from(note))
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.index.contains_key(key)
    }

    /// All records, ordered by time after [`sort_by_time`](Self::sort_by_time).
    pub fn records(&self) -> &[ParityRecord] {
        &self.records
    }

    pub fn manual_records(&self) -> impl Iterator<Item = &ParityRecord> {
        self.records.iter().filter(|r| r.manually_tagged)
    }

    /// Tag the record at `key` as manual and flip its parity.
    ///
    /// Returns `false` when no record exists at `key`.
    pub fn flag(&mut self, key: &IdentityKey) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                let record = &mut self.records[i];
                record.manually_tagged = true;
                record.is_forehand = !record.is_forehand;
                true
            }
            None => false,
        }
    }

    /// Drop the manual tag at `key`. The record itself stays until the next
    /// [`prune_generated`](Self::prune_generated).
    pub fn unflag(&mut self, key: &IdentityKey) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                self.records[i].manually_tagged = false;
                true
            }
            None => false,
        }
    }

    /// Insert a reconstructed record unless its key is already taken.
    pub fn insert_generated(&mut self, record: ParityRecord) -> bool {
        let key = record.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
        true
    }

    /// Insert or overwrite a manual record.
    pub fn insert_manual(&mut self, mut record: ParityRecord) {
        record.manually_tagged = true;
        match self.index.get(&record.key()) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(record.key(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Replace the whole store with a set of manual records.
    pub fn replace_manual(&mut self, records: impl IntoIterator<Item = ParityRecord>) {
        *self = Self::from_manual(records);
    }

    /// Remove every record whose key matches none of `notes`.
    ///
    /// Returns the number of removed records.
    pub fn prune_unmatched(&mut self, notes: &[Note]) -> usize {
        let live: HashSet<IdentityKey> = notes.iter().map(IdentityKey::from).collect();
        self.retain(|r| live.contains(&r.key()))
    }

    /// Remove every record that is not manually tagged.
    pub fn prune_generated(&mut self) -> usize {
        self.retain(|r| r.manually_tagged)
    }

    /// Stable sort by time.
    pub fn sort_by_time(&mut self) {
        self.records.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.reindex();
    }

    fn retain(&mut self, keep: impl Fn(&ParityRecord) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|r| keep(r));
        let removed = before - self.records.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key(), i))
            .collect();
    }
}

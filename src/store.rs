//! Record store
//!
//! Ordered list of employees mirrored into one key-value slot. Every
//! mutation rewrites the whole slot; the in-memory list only changes once
//! that write has succeeded.
//!
//! Entries that fail to parse are skipped on load. Before the first write
//! replaces such a slot, its raw text is copied to `<key>_backup`.

use crate::error::StoreError;
use crate::persistence::KeyValueStore;
use crate::record::EmployeeRecord;

/// Employee list backed by a key-value slot
#[derive(Debug)]
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    key: String,
    records: Vec<EmployeeRecord>,
    /// Raw slot text to back up before the next write
    damaged: Option<String>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Load the list stored under `key`.
    ///
    /// A missing slot is an empty list. Unreadable entries (or an
    /// unreadable slot) are logged and skipped.
    pub fn open(storage: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let mut store = Self {
            storage,
            key: key.into(),
            records: Vec::new(),
            damaged: None,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the slot, discarding the in-memory list
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.damaged = None;
        self.records = match self.storage.get(&self.key)? {
            Some(json) => self.parse_slot(json),
            None => Vec::new(),
        };
        log::info!("Loaded {} employees", self.records.len());
        Ok(())
    }

    fn parse_slot(&mut self, json: String) -> Vec<EmployeeRecord> {
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Stored employees under {:?} unreadable ({}), starting fresh",
                    self.key,
                    e
                );
                self.damaged = Some(json);
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for (i, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping stored employee #{} ({})", i, e);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            self.damaged = Some(json);
        }
        records
    }

    /// Key the raw text of a damaged slot is copied to
    pub fn backup_key(&self) -> String {
        format!("{}_backup", self.key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&EmployeeRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append (`editing` is `None`) or overwrite the record at `editing`.
    /// Returns the index written.
    pub fn upsert(
        &mut self,
        record: EmployeeRecord,
        editing: Option<usize>,
    ) -> Result<usize, StoreError> {
        let mut next = self.records.clone();
        let index = match editing {
            Some(index) => {
                let slot = next.get_mut(index).ok_or(StoreError::IndexOutOfRange {
                    index,
                    len: self.records.len(),
                })?;
                *slot = record;
                index
            }
            None => {
                next.push(record);
                next.len() - 1
            }
        };
        self.commit(next)?;
        log::info!(
            "Employee {} at index {} ({} total)",
            if editing.is_some() { "updated" } else { "added" },
            index,
            self.records.len()
        );
        Ok(index)
    }

    /// Remove the record at `index`; later records shift down by one
    pub fn delete(&mut self, index: usize) -> Result<EmployeeRecord, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        log::info!("Employee deleted at index {} ({} left)", index, self.records.len());
        Ok(removed)
    }

    fn commit(&mut self, next: Vec<EmployeeRecord>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)?;
        if let Some(raw) = &self.damaged {
            let backup = self.backup_key();
            self.storage.set(&backup, raw)?;
            log::warn!("Previous contents of {:?} saved under {:?}", self.key, backup);
            self.damaged = None;
        }
        self.storage.set(&self.key, &json)?;
        self.records = next;
        Ok(())
    }
}

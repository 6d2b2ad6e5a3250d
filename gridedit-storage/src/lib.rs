//! GRIDEDIT Storage - Record Repository Trait and In-Memory Implementation
//!
//! The editable grid never talks to a database directly. Everything it
//! needs from the record layer (lookup, listing, persistence, schema
//! scaffolding hints and the per-record edit permission) goes through
//! [`RecordRepository`].

use gridedit_core::{FieldKind, GridResult, Record, RecordId, Schema, StorageError};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

// ============================================================================
// REPOSITORY TRAIT
// ============================================================================

/// Record access for an editable grid.
pub trait RecordRepository: Send + Sync {
    /// Column layout of the records served.
    fn schema(&self) -> &Schema;

    /// Get a record by ID.
    fn get(&self, id: RecordId) -> GridResult<Option<Record>>;

    /// All records, in display order.
    fn list(&self) -> GridResult<Vec<Record>>;

    /// Persist a record, inserting it when the id is new.
    fn save(&self, record: &Record) -> GridResult<()>;

    /// Whether the current caller may edit the record.
    fn is_editable(&self, id: RecordId) -> bool;

    /// Field kind the schema scaffolds for `column`, if the column exists.
    fn default_field_for(&self, column: &str) -> Option<FieldKind> {
        self.schema().default_field_for(column)
    }
}

// ============================================================================
// IN-MEMORY REPOSITORY
// ============================================================================

/// Repository backed by in-process maps. Used by the demo server and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    schema: Schema,
    records: Arc<RwLock<IndexMap<RecordId, Record>>>,
    locked: Arc<RwLock<HashSet<RecordId>>>,
    writes: Arc<RwLock<Vec<RecordId>>>,
}

impl InMemoryRepository {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Seed a record without counting it as a write.
    pub fn insert(&self, record: Record) -> GridResult<()> {
        let mut records = self.records.write().map_err(|_| StorageError::LockPoisoned)?;
        records.insert(record.id, record);
        Ok(())
    }

    /// Builder-style seeding.
    pub fn with_records(self, records: impl IntoIterator<Item = Record>) -> GridResult<Self> {
        for record in records {
            self.insert(record)?;
        }
        Ok(self)
    }

    /// Deny editing for a record.
    pub fn lock(&self, id: RecordId) -> GridResult<()> {
        let mut locked = self.locked.write().map_err(|_| StorageError::LockPoisoned)?;
        locked.insert(id);
        Ok(())
    }

    /// Allow editing for a record again.
    pub fn unlock(&self, id: RecordId) -> GridResult<()> {
        let mut locked = self.locked.write().map_err(|_| StorageError::LockPoisoned)?;
        locked.remove(&id);
        Ok(())
    }

    /// Ids passed to [`RecordRepository::save`], in call order.
    pub fn write_log(&self) -> GridResult<Vec<RecordId>> {
        let writes = self.writes.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(writes.clone())
    }

    pub fn record_count(&self) -> GridResult<usize> {
        let records = self.records.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(records.len())
    }
}

impl RecordRepository for InMemoryRepository {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn get(&self, id: RecordId) -> GridResult<Option<Record>> {
        let records = self.records.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn list(&self) -> GridResult<Vec<Record>> {
        let records = self.records.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(records.values().cloned().collect())
    }

    fn save(&self, record: &Record) -> GridResult<()> {
        let mut records = self.records.write().map_err(|_| StorageError::LockPoisoned)?;
        let mut writes = self.writes.write().map_err(|_| StorageError::LockPoisoned)?;
        records.insert(record.id, record.clone());
        writes.push(record.id);
        tracing::debug!(record_id = %record.id, "Record saved");
        Ok(())
    }

    fn is_editable(&self, id: RecordId) -> bool {
        match self.locked.read() {
            Ok(locked) => !locked.contains(&id),
            Err(_) => {
                tracing::error!(record_id = %id, "Lock set poisoned; treating record as read-only");
                false
            }
        }
    }
}

impl<R: RecordRepository + ?Sized> RecordRepository for Arc<R> {
    fn schema(&self) -> &Schema {
        (**self).schema()
    }

    fn get(&self, id: RecordId) -> GridResult<Option<Record>> {
        (**self).get(id)
    }

    fn list(&self) -> GridResult<Vec<Record>> {
        (**self).list()
    }

    fn save(&self, record: &Record) -> GridResult<()> {
        (**self).save(record)
    }

    fn is_editable(&self, id: RecordId) -> bool {
        (**self).is_editable(id)
    }

    fn default_field_for(&self, column: &str) -> Option<FieldKind> {
        (**self).default_field_for(column)
    }
}

// =============================================================================
// TESTS
// =============================================================================

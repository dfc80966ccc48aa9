use crate::schema;
use model::record::SourceRecord;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown column {column} for table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("legacy id {legacy_id} already imported into {table}")]
    AlreadyImported { table: String, legacy_id: i64 },
}

#[derive(Debug, Clone)]
pub struct StoredRow {
    pub id: u64,
    pub record: SourceRecord,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<StoredRow>,
    next_id: u64,
}

/// In-memory destination store standing in for the real database in tests.
#[derive(Debug)]
pub struct MemoryStore {
    tables: HashMap<&'static str, Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let tables = schema::TABLES
            .iter()
            .map(|def| (def.name, Table { rows: Vec::new(), next_id: 1 }))
            .collect();
        MemoryStore { tables }
    }

    /// Inserts a record and returns its assigned id. Rejects unknown
    /// tables/columns and records whose `legacy_id` is already present.
    pub fn insert(&mut self, table: &str, record: &SourceRecord) -> Result<u64, StoreError> {
        let def = schema::table(table).ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        for (field, _) in record.fields() {
            if !def.columns.contains(&field) {
                return Err(StoreError::UnknownColumn {
                    table: table.to_string(),
                    column: field.to_string(),
                });
            }
        }
        if let Some(legacy_id) = record.get("legacy_id").and_then(|v| v.as_i64()) {
            if self.contains_legacy(table, legacy_id) {
                return Err(StoreError::AlreadyImported {
                    table: table.to_string(),
                    legacy_id,
                });
            }
        }

        let slot = self.tables.get_mut(def.name).expect("seeded from schema");
        let id = slot.next_id;
        slot.next_id += 1;
        slot.rows.push(StoredRow {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    pub fn contains_legacy(&self, table: &str, legacy_id: i64) -> bool {
        self.tables
            .get(table)
            .map(|slot| {
                slot.rows.iter().any(|row| {
                    row.record.get("legacy_id").and_then(|v| v.as_i64()) == Some(legacy_id)
                })
            })
            .unwrap_or(false)
    }

    pub fn count(&self, table: &str) -> usize {
        self.tables.get(table).map(|slot| slot.rows.len()).unwrap_or(0)
    }

    pub fn rows(&self, table: &str) -> &[StoredRow] {
        self.tables.get(table).map(|slot| slot.rows.as_slice()).unwrap_or(&[])
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

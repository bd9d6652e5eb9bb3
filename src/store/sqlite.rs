//! SQLite-backed record store.
//!
//! Records are persisted as one JSON document per row; the integer primary
//! key is the authoritative id and overrides whatever id the payload
//! carries. One database file per configured namespace.

use std::fs;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::record::FinanceRecord;

use super::{RecordStore, StoreConfig, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    payload TEXT NOT NULL
)";

pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (and initialize, if needed) the database for `config`.
    ///
    /// Safe to call for an already-initialized namespace; the schema is
    /// created only when missing.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.directory)?;
        let path = config.db_path();
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %path.display(), "record store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn encode(record: &FinanceRecord) -> Result<String, StoreError> {
        serde_json::to_string(record).map_err(|err| StoreError::Other(err.to_string()))
    }

    fn decode(id: i64, payload: &str) -> Result<FinanceRecord, StoreError> {
        let mut record: FinanceRecord = serde_json::from_str(payload)
            .map_err(|err| StoreError::Corrupt(format!("record {id}: {err}")))?;
        record.id = Some(id);
        Ok(record)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn list_all(&self) -> Result<Vec<FinanceRecord>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, payload FROM records ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, payload) = row?;
            records.push(Self::decode(id, &payload)?);
        }
        Ok(records)
    }

    async fn add(&self, record: FinanceRecord) -> Result<FinanceRecord, StoreError> {
        let payload = Self::encode(&record)?;
        let conn = self.conn.lock();
        conn.execute("INSERT INTO records (payload) VALUES (?1)", params![payload])?;
        let mut stored = record;
        stored.id = Some(conn.last_insert_rowid());
        Ok(stored)
    }

    async fn update(&self, id: i64, record: FinanceRecord) -> Result<(), StoreError> {
        let mut stored = record;
        stored.id = Some(id);
        let payload = Self::encode(&stored)?;
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE records SET payload = ?1 WHERE id = ?2",
            params![payload, id],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM records WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::UnknownId(id));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM records", [])?;
        Ok(())
    }
}

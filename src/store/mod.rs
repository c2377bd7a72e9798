//! Local patient store
//!
//! A single SQLite file holding the `patients` table that MindsDB trains on.
//! The assistant never inserts rows; it creates the file and table when
//! missing and reads counts and samples back.

use rusqlite::{params, Connection};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::errors::{AssistantError, Result};
use crate::types::PatientRecord;

const CREATE_PATIENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS patients (
        id INTEGER PRIMARY KEY,
        age INTEGER,
        gender TEXT,
        symptom1 TEXT,
        symptom2 TEXT,
        symptom3 TEXT,
        diagnosis TEXT,
        diagnosis_explain TEXT
    )";

/// Open handle on the patient store
///
/// The connection is released when the store is dropped.
#[derive(Debug)]
pub struct PatientStore {
    conn: Connection,
    path: PathBuf,
}

impl PatientStore {
    /// Open the store, creating an empty file first if none exists
    ///
    /// The file is created explicitly so a datasource registered against the
    /// path sees a real file even before SQLite writes to it.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let created = ensure_file(&path)?;

        let conn = Connection::open(&path).map_err(|e| {
            AssistantError::StorageFailure(format!("cannot open {}: {}", path.display(), e))
        })?;

        let store = Self { conn, path };
        if created {
            // An empty file is a valid database; touch the header so it is initialised
            store.conn.execute_batch("PRAGMA user_version = 0")?;
        }
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        })
    }

    /// Create the `patients` table if it does not exist
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_PATIENTS_TABLE)?;
        Ok(())
    }

    /// Number of rows in the `patients` table
    pub fn count_rows(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Most recent rows by id, newest first
    pub fn recent_records(&self, limit: usize) -> Result<Vec<PatientRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, age, gender, symptom1, symptom2, symptom3, diagnosis, diagnosis_explain
             FROM patients ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(PatientRecord {
                id: row.get(0)?,
                age: row.get(1)?,
                gender: row.get(2)?,
                symptom1: row.get(3)?,
                symptom2: row.get(4)?,
                symptom3: row.get(5)?,
                diagnosis: row.get(6)?,
                diagnosis_explain: row.get(7)?,
            })
        })?;

        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }
        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path for registering with a remote service
    ///
    /// Falls back to the configured path when it cannot be resolved.
    pub fn absolute_path(&self) -> PathBuf {
        std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    /// Close the connection, reporting any error instead of ignoring it on drop
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| AssistantError::from(e))
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Create an empty file at `path` if absent; returns whether it was created
fn ensure_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            AssistantError::StorageFailure(format!("cannot create {}: {}", path.display(), e))
        })?;
    Ok(true)
}

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rusqlite::Connection;
use thiserror::Error;

use crate::models::Task;

/// Storage slot holding the serialized task list.
const SLOT_KEY: &str = "todos";

/// Fault at the persistence port.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Persistence port for the task list.
///
/// The task store reads the full list once at startup and writes the full
/// list after every change; there is no partial update. Implementations
/// must return an empty list when nothing has been stored yet.
pub trait Storage {
    fn load(&self) -> Result<Vec<Task>, StorageError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

/// SQLite-backed storage.
///
/// The task list lives as a JSON value in a single row of the `slots`
/// table, keyed `todos`. A corrupt value is discarded with a warning and
/// treated as an empty list rather than failing startup.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "strike")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("strike.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }
}

impl Storage for SqliteStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare("SELECT value FROM slots WHERE key = ?")?;
        let mut rows = stmt.query([SLOT_KEY])?;

        let Some(row) = rows.next()? else {
            return Ok(Vec::new());
        };
        let raw: String = row.get(0)?;

        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!("Discarding unreadable task list from storage: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let value = serde_json::to_string(tasks)?;
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO slots (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (SLOT_KEY, &value, chrono::Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }
}

impl Clone for SqliteStorage {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// In-memory storage for tests.
///
/// Holds the same serialized form the SQLite backend writes, so encoding
/// and fallback behavior match. Clones share the slot.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot with a raw value, bypassing the encoder.
    pub fn with_raw(value: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(value.to_string()))),
        }
    }

    /// Current raw slot value, `None` when nothing was ever saved.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().expect("slot lock poisoned").clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let slot = self.slot.lock().expect("slot lock poisoned");
        let Some(raw) = slot.as_ref() else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(raw) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!("Discarding unreadable task list from storage: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let value = serde_json::to_string(tasks)?;
        *self.slot.lock().expect("slot lock poisoned") = Some(value);
        Ok(())
    }
}

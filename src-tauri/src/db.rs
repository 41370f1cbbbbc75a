use crate::error::{InventoryError, Result};
use crate::store::KeyValueStore;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "Opened inventory database");

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| InventoryError::LockPoisoned)?;

        conn.execute_batch(
            "
            -- Serialized collections and session state, one JSON document per key
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )?;

        // Run migrations for existing databases (pass connection to avoid deadlock)
        Self::migrate_conn(&conn)?;

        Ok(())
    }

    fn migrate_conn(conn: &Connection) -> Result<()> {
        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(kv_store)")?
            .query_map([], |row| row.get::<_, String>(1))?
            .filter_map(|r| r.ok())
            .collect();

        if !columns.contains(&"updated_at".to_string()) {
            conn.execute("ALTER TABLE kv_store ADD COLUMN updated_at DATETIME", [])?;
        }

        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| InventoryError::LockPoisoned)?;

        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| InventoryError::LockPoisoned)?;

        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            rusqlite::params![key, value],
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| InventoryError::LockPoisoned)?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| InventoryError::LockPoisoned)?;

        // substr comparison keeps LIKE wildcards in the prefix from matching
        conn.execute(
            "DELETE FROM kv_store WHERE substr(key, 1, length(?1)) = ?1",
            [prefix],
        )?;

        Ok(())
    }
}

#[cfg(feature = "desktop")]
mod desktop {
    use super::Database;
    use crate::context::AppState;
    use tauri::{AppHandle, Manager};

    pub trait AppStateExt {
        fn app_state(&self) -> &AppState;
    }

    impl AppStateExt for AppHandle {
        fn app_state(&self) -> &AppState {
            self.state::<AppState>().inner()
        }
    }

    impl Database {
        /// Opens `file_name` inside the platform app-data directory.
        pub fn new(app_handle: &AppHandle, file_name: &str) -> crate::error::Result<Self> {
            let app_dir = app_handle
                .path()
                .app_data_dir()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

            Database::open(&app_dir.join(file_name))
        }
    }
}

#[cfg(feature = "desktop")]
pub use desktop::AppStateExt;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::{normalize_path, DocumentStore};
use crate::error::{PlannerError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    path TEXT PRIMARY KEY NOT NULL,
    body TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Documents kept in a single SQLite table keyed by path.
///
/// rusqlite is blocking, so every call hops onto the blocking pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    location: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlannerError::io_operation("create directory", parent.display(), e))?;
        }

        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Database that lives only as long as this store
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, location: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }

    /// When the document at `path` was last written (RFC 3339)
    pub async fn updated_at(&self, path: &str) -> Result<Option<String>> {
        let path = normalize_path(path)?;
        self.with_conn(move |conn| {
            Ok(conn
                .query_row(
                    "SELECT updated_at FROM documents WHERE path = ?1",
                    params![path],
                    |row| row.get::<_, String>(0),
                )
                .optional()?)
        })
        .await
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| PlannerError::Other("sqlite connection lock poisoned".to_string()))?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn write(&self, path: &str, document: &Value) -> Result<()> {
        let path = normalize_path(path)?;

        if document.is_null() {
            return self
                .with_conn(move |conn| {
                    conn.execute("DELETE FROM documents WHERE path = ?1", params![path])?;
                    Ok(())
                })
                .await;
        }

        let body = serde_json::to_string(document)?;
        let updated_at = Utc::now().to_rfc3339();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO documents (path, body, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(path) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                params![path, body, updated_at],
            )?;
            Ok(())
        })
        .await
    }

    async fn read(&self, path: &str) -> Result<Option<Value>> {
        let path = normalize_path(path)?;
        let lookup = path.clone();
        let body = self
            .with_conn(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT body FROM documents WHERE path = ?1",
                        params![lookup],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?)
            })
            .await?;

        match body {
            None => Ok(None),
            Some(body) => serde_json::from_str(&body)
                .map(Some)
                .map_err(|e| PlannerError::malformed(&path, e)),
        }
    }

    fn describe(&self) -> String {
        match &self.location {
            Some(path) => format!("sqlite:{}", path.display()),
            None => "sqlite::memory:".to_string(),
        }
    }
}

//! SQLite backend for per-user memory storage.
//!
//! This module provides:
//! - `Database`: connection, pragmas, schema and row-level CRUD
//! - `Memory`: a stored memory row
//! - `embedding`: BLOB codec and cosine similarity
//! - `search`: semantic candidate scan and substring search

pub mod embedding;
pub mod search;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use self::embedding::{blob_to_vec, cosine_similarity, vec_to_blob};

/// Milliseconds a writer waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u64 = 5_000;

/// Columns selected for every `Memory` read, in `raw_memory` order.
const MEMORY_COLUMNS: &str = "id, user_id, content, tags, created_at, updated_at";

/// A single remembered fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Memory {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Insertion order is preserved, duplicates are kept.
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Error types for SQLite operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid tags column: {0}")]
    InvalidTags(#[from] serde_json::Error),

    #[error("Invalid BLOB size: {actual} bytes is not a whole number of f32 values")]
    InvalidBlobSize { actual: usize },

    #[error("Mismatched dimensions: expected {expected} dimensions, got {actual} dimensions")]
    MismatchedDimensions { expected: usize, actual: usize },

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Database connection lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Current time in the fixed-width form stored in `created_at`/`updated_at`.
///
/// Fixed microsecond precision keeps lexical and chronological order equal.
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn encode_tags(tags: &[String]) -> Result<String> {
    Ok(serde_json::to_string(tags)?)
}

pub(crate) fn decode_tags(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Map a row selected with `MEMORY_COLUMNS`, leaving tags undecoded.
fn raw_memory(row: &Row<'_>) -> rusqlite::Result<(Memory, String)> {
    Ok((
        Memory {
            id: row.get(0)?,
            user_id: row.get(1)?,
            content: row.get(2)?,
            tags: Vec::new(),
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        },
        row.get(3)?,
    ))
}

fn finish_memory((mut memory, tags): (Memory, String)) -> Result<Memory> {
    memory.tags = decode_tags(&tags)?;
    Ok(memory)
}

/// SQLite database backend.
///
/// The connection sits behind a mutex so a single `Database` can be shared
/// across threads. Other processes are serialized by SQLite's file locking.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    dimensions: usize,
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.busy_timeout(std::time::Duration::from_millis(BUSY_TIMEOUT_MS))?;
    // journal_mode answers with a row, so it cannot go through execute_batch.
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.execute_batch(
        r#"
        PRAGMA synchronous = NORMAL;
        PRAGMA temp_store = MEMORY;
        "#,
    )?;
    Ok(())
}

/// Create tables and indexes. Safe to run against an existing database.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS memories (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            content TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            embedding BLOB,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_memories_user_id ON memories(user_id);
        CREATE INDEX IF NOT EXISTS idx_memories_user_updated
            ON memories(user_id, updated_at);
        "#,
    )?;
    Ok(())
}

impl Database {
    /// Open or create a SQLite database at the given path.
    ///
    /// `dimensions` is the embedding length every write must match.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema initialization fails.
    pub fn open(path: &Path, dimensions: usize) -> Result<Self> {
        let conn = Connection::open(path)?;
        configure_connection(&conn)?;
        create_schema(&conn)?;
        tracing::debug!(path = %path.display(), dimensions, "memory database opened");
        Ok(Self {
            conn: Mutex::new(conn),
            dimensions,
        })
    }

    /// Embedding dimension enforced on writes.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::Poisoned)
    }

    /// Insert a new memory with its embedding and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns error if the embedding has the wrong dimension or the write fails.
    pub fn insert(
        &self,
        user_id: &str,
        content: &str,
        tags: &[String],
        embedding: &[f32],
    ) -> Result<Memory> {
        let now = timestamp_now();
        self.insert_with_time(user_id, content, tags, Some(embedding), &now, &now)
    }

    /// Insert a memory with explicit timestamps and an optional embedding.
    ///
    /// Rows without an embedding come from databases migrated from a store
    /// that kept no vectors; they are listed and text-searchable but skipped
    /// by semantic recall.
    pub(crate) fn insert_with_time(
        &self,
        user_id: &str,
        content: &str,
        tags: &[String],
        embedding: Option<&[f32]>,
        created_at: &str,
        updated_at: &str,
    ) -> Result<Memory> {
        let blob = match embedding {
            Some(values) => Some(vec_to_blob(values, self.dimensions)?),
            None => None,
        };
        let memory = Memory {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            tags: tags.to_vec(),
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        };

        self.conn()?.execute(
            r#"
            INSERT INTO memories (id, user_id, content, tags, embedding, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                &memory.id,
                &memory.user_id,
                &memory.content,
                encode_tags(tags)?,
                blob,
                &memory.created_at,
                &memory.updated_at
            ],
        )?;

        Ok(memory)
    }

    /// Retrieve a single memory owned by `user_id`.
    ///
    /// Returns `None` if the memory does not exist or belongs to another user.
    pub fn get(&self, user_id: &str, id: &str) -> Result<Option<Memory>> {
        let conn = self.conn()?;
        let raw = conn
            .query_row(
                &format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?1 AND user_id = ?2"),
                params![id, user_id],
                raw_memory,
            )
            .optional()?;
        raw.map(finish_memory).transpose()
    }

    /// List a user's memories, most recently updated first.
    ///
    /// With a non-empty `tags` filter only rows sharing at least one tag are
    /// returned; the filter runs before `LIMIT`/`OFFSET`.
    ///
    /// # Errors
    ///
    /// Returns error if the limit is invalid or the query fails.
    pub fn list(
        &self,
        user_id: &str,
        tags: Option<&[String]>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Memory>> {
        search::validate_limit(limit)?;
        let filter = tags.filter(|t| !t.is_empty());
        // SQLite reads a negative OFFSET as 0; clamp instead of wrapping.
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let conn = self.conn()?;
        let rows = match filter {
            Some(wanted) => {
                let mut stmt = conn.prepare(&format!(
                    r#"
                    SELECT {MEMORY_COLUMNS}
                    FROM memories
                    WHERE user_id = ?1
                      AND EXISTS (
                          SELECT 1 FROM json_each(memories.tags) AS have
                          WHERE have.value IN (SELECT wanted.value FROM json_each(?2) AS wanted)
                      )
                    ORDER BY updated_at DESC, rowid DESC
                    LIMIT ?3 OFFSET ?4
                    "#
                ))?;
                let rows = stmt
                    .query_map(
                        params![user_id, encode_tags(wanted)?, limit as i64, offset],
                        raw_memory,
                    )?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    r#"
                    SELECT {MEMORY_COLUMNS}
                    FROM memories
                    WHERE user_id = ?1
                    ORDER BY updated_at DESC, rowid DESC
                    LIMIT ?2 OFFSET ?3
                    "#
                ))?;
                let rows = stmt
                    .query_map(params![user_id, limit as i64, offset], raw_memory)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };

        rows.into_iter().map(finish_memory).collect()
    }

    /// Replace a memory's tags and refresh `updated_at`.
    ///
    /// The embedding is left untouched: it is bound to the content, which
    /// never changes. Returns false if no row matched `(id, user_id)`.
    ///
    /// The timestamp is taken under the connection lock, so concurrent
    /// updates of one memory resolve last-write-wins.
    pub fn update_tags(&self, user_id: &str, id: &str, tags: &[String]) -> Result<bool> {
        let encoded = encode_tags(tags)?;
        let conn = self.conn()?;
        let rows = conn.execute(
            r#"
            UPDATE memories
            SET tags = ?1, updated_at = ?2
            WHERE id = ?3 AND user_id = ?4
            "#,
            params![encoded, timestamp_now(), id, user_id],
        )?;
        Ok(rows > 0)
    }

    /// Delete a memory owned by `user_id`.
    ///
    /// Returns true if a memory was deleted, false if it didn't exist or
    /// belongs to someone else.
    pub fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let rows = self.conn()?.execute(
            "DELETE FROM memories WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    /// Delete every memory of `user_id`, returning how many were removed.
    pub fn delete_all(&self, user_id: &str) -> Result<usize> {
        let rows = self
            .conn()?
            .execute("DELETE FROM memories WHERE user_id = ?1", [user_id])?;
        Ok(rows)
    }

    /// Number of memories stored for `user_id`.
    pub fn count(&self, user_id: &str) -> Result<usize> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM memories WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Distinct user ids with at least one memory, sorted ascending.
    pub fn users(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT user_id FROM memories ORDER BY user_id")?;
        let users = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(users)
    }
}

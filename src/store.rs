// Copyright (c) 2026 rezky_nightky

use std::path::Path;

use chrono::Local;
use rusqlite::{params, Connection};
use thiserror::Error;

pub const DB_FILE: &str = "messages.db";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

/// SQLite-backed message log. Every write is its own committed statement, so
/// an abrupt exit leaves the file at the last completed operation.
pub struct MessageStore {
    conn: Connection,
}

impl MessageStore {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 sender TEXT NOT NULL,
                 content TEXT NOT NULL,
                 timestamp TEXT NOT NULL
             )",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn append(&self, sender: &str, content: &str) -> StoreResult<i64> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.conn.execute(
            "INSERT INTO messages (sender, content, timestamp) VALUES (?1, ?2, ?3)",
            params![sender, content, timestamp],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Newest first. Ordered by id rather than timestamp: rapid inserts share
    /// a second-granularity timestamp.
    pub fn list_recent(&self, limit: usize) -> StoreResult<Vec<Message>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, sender, content, timestamp FROM messages ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(Message {
                id: row.get(0)?,
                sender: row.get(1)?,
                content: row.get(2)?,
                timestamp: row.get(3)?,
            })
        })?;

        let mut out = Vec::new();
        for message in rows {
            out.push(message?);
        }
        Ok(out)
    }

    pub fn clear_all(&self) -> StoreResult<usize> {
        Ok(self.conn.execute("DELETE FROM messages", [])?)
    }
}

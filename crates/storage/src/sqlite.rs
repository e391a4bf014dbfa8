// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `sqlite` backend named in §6's `database: { type: sqlite, filepath }`.
//! Blocking rusqlite calls run on `spawn_blocking` so the async scheduler
//! loop never stalls on disk I/O.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keepwatch_core::{ContentItem, PersistError, SourceId};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::store::ContentStore;

pub struct SqliteContentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteContentStore {
    pub fn open(filepath: &Path) -> Result<Self, PersistError> {
        let conn = Connection::open(filepath).map_err(|e| persist_err(format!("open: {e}")))?;
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// An in-memory store, for tests.
    pub fn open_in_memory() -> Result<Self, PersistError> {
        let conn = Connection::open_in_memory().map_err(|e| persist_err(format!("open: {e}")))?;
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn migrate(conn: &Connection) -> Result<(), PersistError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS content (
            source_id    TEXT NOT NULL,
            id           TEXT NOT NULL,
            title        TEXT NOT NULL,
            description  TEXT NOT NULL,
            url          TEXT NOT NULL,
            author       TEXT NOT NULL,
            platform     TEXT NOT NULL,
            published_at TEXT NOT NULL,
            updated_at   TEXT NOT NULL,
            metadata     TEXT NOT NULL,
            PRIMARY KEY (source_id, id)
        );
        CREATE INDEX IF NOT EXISTS content_source_published
            ON content (source_id, published_at DESC);",
    )
    .map_err(|e| persist_err(format!("migrate: {e}")))
}

fn persist_err(cause: impl Into<String>) -> PersistError {
    PersistError {
        cause: cause.into(),
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn latest_published(
        &self,
        source_id: &SourceId,
    ) -> Result<Option<DateTime<Utc>>, PersistError> {
        let conn = self.conn.clone();
        let source_id = source_id.as_str().to_string();
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            let raw: Option<String> = conn
                .query_row(
                    "SELECT published_at FROM content WHERE source_id = ?1
                     ORDER BY published_at DESC LIMIT 1",
                    params![source_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| persist_err(format!("latest_published: {e}")))?;
            raw.map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| persist_err(format!("corrupt published_at: {e}")))
            })
            .transpose()
        })
        .await
        .map_err(|e| persist_err(format!("join: {e}")))?
    }

    async fn lookup_existing(
        &self,
        source_id: &SourceId,
        ids: &[String],
    ) -> Result<HashSet<String>, PersistError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let conn = self.conn.clone();
        let source_id = source_id.as_str().to_string();
        let ids = ids.to_vec();
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            let placeholders = std::iter::repeat("?")
                .take(ids.len())
                .collect::<Vec<_>>()
                .join(",");
            let sql = format!(
                "SELECT id FROM content WHERE source_id = ? AND id IN ({placeholders})"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| persist_err(format!("lookup_existing: {e}")))?;
            let mut rows_params: Vec<&dyn rusqlite::ToSql> = Vec::with_capacity(ids.len() + 1);
            rows_params.push(&source_id);
            for id in &ids {
                rows_params.push(id);
            }
            let found = stmt
                .query_map(rows_params.as_slice(), |row| row.get::<_, String>(0))
                .map_err(|e| persist_err(format!("lookup_existing: {e}")))?
                .collect::<Result<HashSet<_>, _>>()
                .map_err(|e| persist_err(format!("lookup_existing: {e}")))?;
            Ok(found)
        })
        .await
        .map_err(|e| persist_err(format!("join: {e}")))?
    }

    async fn insert_many(&self, items: &[ContentItem]) -> Result<(), PersistError> {
        if items.is_empty() {
            return Ok(());
        }
        let conn = self.conn.clone();
        let items = items.to_vec();
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            let tx = conn
                .transaction()
                .map_err(|e| persist_err(format!("insert_many: {e}")))?;
            for item in &items {
                let metadata = serde_json::to_string(&item.metadata)
                    .map_err(|e| persist_err(format!("serialize metadata: {e}")))?;
                tx.execute(
                    "INSERT INTO content
                        (source_id, id, title, description, url, author, platform,
                         published_at, updated_at, metadata)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        item.source_id.as_str(),
                        item.id,
                        item.title,
                        item.description,
                        item.url,
                        item.author,
                        item.platform,
                        item.published_at.to_rfc3339(),
                        item.updated_at.to_rfc3339(),
                        metadata,
                    ],
                )
                .map_err(|e| persist_err(format!("insert_many: primary key collision or write error: {e}")))?;
            }
            tx.commit()
                .map_err(|e| persist_err(format!("insert_many commit: {e}")))
        })
        .await
        .map_err(|e| persist_err(format!("join: {e}")))?
    }
}

//! SQLite-backed store holding the `posts` and `options` tables.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use aom_model::Record;
use aom_types::{PostStatus, RecordId};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::permalink::Permalinks;
use crate::store::{QueryOrder, RecordQuery, RecordStore, SettingStore};

const RECORD_COLUMNS: &str =
    "id, post_type, status, title, slug, content, thumbnail, meta, created_at, modified_at";

/// Persistent store for records and options backed by SQLite.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    permalinks: Permalinks,
}

/// Column values as read from a `posts` row, before validation.
struct RawRecord {
    id: i64,
    post_type: String,
    status: String,
    title: String,
    slug: String,
    content: String,
    thumbnail: Option<String>,
    meta: String,
    created_at: i64,
    modified_at: i64,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: &Path, permalinks: Permalinks) -> StorageResult<Self> {
        debug!(path = %path.display(), "Opening SQLite store");
        let conn = Connection::open(path)?;
        Self::with_conn(conn, permalinks)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory(permalinks: Permalinks) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_conn(conn, permalinks)
    }

    fn with_conn(conn: Connection, permalinks: Permalinks) -> StorageResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            permalinks,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY,
                post_type TEXT NOT NULL,
                status TEXT NOT NULL,
                title TEXT NOT NULL,
                slug TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                thumbnail TEXT,
                meta TEXT NOT NULL DEFAULT 'null',
                created_at INTEGER NOT NULL,
                modified_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_posts_type_status ON posts (post_type, status);
            CREATE INDEX IF NOT EXISTS idx_posts_type_slug ON posts (post_type, slug);

            CREATE TABLE IF NOT EXISTS options (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::LockPoisoned("sqlite connection"))
    }

    /// Inserts or replaces a record.
    pub fn insert(&self, record: &Record) -> StorageResult<()> {
        let id = to_sql_id(record.id).ok_or_else(|| {
            StorageError::InvalidData(format!("record id {} out of range", record.id))
        })?;
        let meta = serde_json::to_string(&record.meta)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO posts (id, post_type, status, title, slug, content, thumbnail, meta, created_at, modified_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                id,
                record.post_type,
                record.status.as_str(),
                record.title,
                record.slug,
                record.content,
                record.thumbnail,
                meta,
                record.created_at,
                record.modified_at,
            ],
        )?;
        Ok(())
    }

    /// Deletes a record. Returns true if a row was removed.
    pub fn delete(&self, id: RecordId) -> StorageResult<bool> {
        let Some(id) = to_sql_id(id) else {
            return Ok(false);
        };
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn query_one(&self, sql: &str, params: impl rusqlite::Params) -> StorageResult<Option<Record>> {
        let conn = self.conn()?;
        let raw = conn.query_row(sql, params, read_raw).optional()?;
        raw.map(RawRecord::into_record).transpose()
    }
}

impl RecordStore for SqliteStore {
    fn get(&self, id: RecordId) -> StorageResult<Option<Record>> {
        let Some(id) = to_sql_id(id) else {
            return Ok(None);
        };
        self.query_one(
            &format!("SELECT {RECORD_COLUMNS} FROM posts WHERE id = ?1"),
            params![id],
        )
    }

    fn get_by_slug(&self, post_type: &str, slug: &str) -> StorageResult<Option<Record>> {
        self.query_one(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM posts WHERE post_type = ?1 AND slug = ?2 ORDER BY id LIMIT 1"
            ),
            params![post_type, slug],
        )
    }

    fn query(&self, query: &RecordQuery) -> StorageResult<Vec<Record>> {
        let order = match query.order {
            QueryOrder::IdAsc => "id ASC",
            QueryOrder::TitleAsc => "title ASC, id ASC",
        };
        // SQLite treats a negative LIMIT as "no limit".
        let limit = query
            .limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1);
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM posts
             WHERE post_type = ?1 AND (?2 IS NULL OR status = ?2)
             ORDER BY {order} LIMIT ?3"
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![query.post_type, query.status.map(|s| s.as_str()), limit],
            read_raw,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }

    fn random(&self, post_type: &str, status: PostStatus) -> StorageResult<Option<Record>> {
        self.query_one(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM posts
                 WHERE post_type = ?1 AND status = ?2
                 ORDER BY RANDOM() LIMIT 1"
            ),
            params![post_type, status.as_str()],
        )
    }

    fn permalinks(&self) -> &Permalinks {
        &self.permalinks
    }
}

impl SettingStore for SqliteStore {
    fn get_option(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM options WHERE name = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_option(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO options (name, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        post_type: row.get(1)?,
        status: row.get(2)?,
        title: row.get(3)?,
        slug: row.get(4)?,
        content: row.get(5)?,
        thumbnail: row.get(6)?,
        meta: row.get(7)?,
        created_at: row.get(8)?,
        modified_at: row.get(9)?,
    })
}

impl RawRecord {
    fn into_record(self) -> StorageResult<Record> {
        let id = u64::try_from(self.id)
            .ok()
            .and_then(RecordId::new)
            .ok_or_else(|| StorageError::InvalidData(format!("invalid post id {}", self.id)))?;
        let status: PostStatus = self
            .status
            .parse()
            .map_err(|e: aom_types::Error| StorageError::InvalidData(e.to_string()))?;
        Ok(Record {
            id,
            post_type: self.post_type,
            status,
            title: self.title,
            slug: self.slug,
            content: self.content,
            thumbnail: self.thumbnail,
            meta: serde_json::from_str(&self.meta)?,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }
}

fn to_sql_id(id: RecordId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

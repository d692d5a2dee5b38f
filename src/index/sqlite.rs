//! SQLite implementation of the content index

use crate::content::Document;
use crate::index::schema::initialize_schema;
use crate::index::tokenize::tokenize;
use crate::index::traits::{Index, IndexResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// SQLite-backed content index
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Opens (or creates) an index database at the given path
    pub fn open(path: &Path) -> IndexResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory index (for testing)
    pub fn new_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Index for SqliteIndex {
    fn is_indexed(&self, location: &str) -> IndexResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM pages WHERE url = ?1",
                params![location],
                |row| row.get(0),
            )
            .optional()?;

        Ok(found.is_some())
    }

    fn index_page(&mut self, location: &str, content: &Document) -> IndexResult<()> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for paragraph in &content.paragraphs {
            for term in tokenize(&paragraph.text) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO pages (url, paragraph_count, indexed_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET
                 paragraph_count = excluded.paragraph_count,
                 indexed_at = excluded.indexed_at",
            params![location, content.len() as i64, now],
        )?;

        // Re-indexing replaces the prior term rows rather than accumulating
        tx.execute(
            "DELETE FROM term_counts WHERE url = ?1",
            params![location],
        )?;

        {
            let mut stmt =
                tx.prepare("INSERT INTO term_counts (term, url, count) VALUES (?1, ?2, ?3)")?;
            for (term, count) in &counts {
                stmt.execute(params![term, location, *count as i64])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn term_counts(&self, term: &str) -> IndexResult<HashMap<String, u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, count FROM term_counts WHERE term = ?1")?;

        let rows = stmt.query_map(params![term], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })?;

        let mut counts = HashMap::new();
        for row in rows {
            let (url, count) = row?;
            counts.insert(url, count);
        }

        Ok(counts)
    }

    fn page_count(&self) -> IndexResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

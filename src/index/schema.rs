//! SQLite schema for the content index

use rusqlite::Connection;

/// Creates the index tables if they do not exist
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pages (
            url             TEXT PRIMARY KEY,
            paragraph_count INTEGER NOT NULL,
            indexed_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS term_counts (
            term  TEXT NOT NULL,
            url   TEXT NOT NULL,
            count INTEGER NOT NULL,
            PRIMARY KEY (term, url)
        );

        CREATE INDEX IF NOT EXISTS idx_term_counts_term ON term_counts (term);
        ",
    )
}

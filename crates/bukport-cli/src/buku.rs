//! buku database access
//!
//! Thin wrapper over buku's SQLite `bookmarks` table. bukport reads every
//! row at start and appends the insertion set in one transaction at the
//! end; it never updates or deletes.

use crate::error::{CliError, Result};
use bukport_common::model::tags_to_tagstring;
use bukport_common::Bookmark;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// buku's immutable bit: set on imported rows so buku never overwrites
/// their title or tags on later operations.
const FLAG_IMMUTABLE: i64 = 1;

/// Handle to a buku bookmark database
pub struct BukuDb {
    conn: Connection,
}

impl BukuDb {
    /// Open (or create) a buku database at the given path
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// The standard buku database location, `$XDG_DATA_HOME/buku/bookmarks.db`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CliError::config("Cannot determine the user data directory"))?;
        Ok(data_dir.join("buku").join("bookmarks.db"))
    }

    /// Read all records, normalized, ordered by rowid
    pub fn get_rec_all(&self) -> Result<Vec<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, URL, metadata, tags, desc FROM bookmarks ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok(Bookmark::from_buku_row(
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                &row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            ))
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(CliError::from)
    }

    /// Insert a single record, marked immutable, without fetching page
    /// content
    pub fn add_rec(&self, item: &Bookmark) -> Result<()> {
        insert_rec(&self.conn, item)
    }

    /// Insert all records in one transaction, committed once at the end.
    ///
    /// If any insert fails the transaction rolls back on drop; there is no
    /// per-record recovery.
    pub fn add_all(&mut self, items: &[Bookmark]) -> Result<usize> {
        let tx = self.conn.transaction()?;

        for item in items {
            insert_rec(&tx, item)?;
        }

        tx.commit()?;
        Ok(items.len())
    }
}

fn insert_rec(conn: &Connection, item: &Bookmark) -> Result<()> {
    conn.execute(
        "INSERT INTO bookmarks (URL, metadata, tags, desc, flags) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            item.url,
            item.title,
            tags_to_tagstring(&item.tags),
            item.desc,
            FLAG_IMMUTABLE,
        ],
    )?;
    Ok(())
}

/// Create buku's `bookmarks` table when missing (fresh-database case).
/// Matches the schema buku itself creates.
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS bookmarks (
            id integer PRIMARY KEY,
            URL text NOT NULL UNIQUE,
            metadata text default '',
            tags text default ',',
            desc text default '',
            flags integer default 0
        )
        "#,
        [],
    )?;
    Ok(())
}

//! SQLite-backed channel directory.
//!
//! The request path only ever calls [`ChannelDirectory::find_by_code`];
//! `upsert`, `remove` and `list` exist for the administrative CLI.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OptionalExtension;

use super::{migrations, Channel, ChannelDirectory, DirectoryError};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Debug, Clone)]
pub struct SqliteDirectory {
    pool: DbPool,
}

impl SqliteDirectory {
    /// Open (creating if needed) the store at `path` and apply migrations.
    ///
    /// The CLI may write while the gateway reads, so connections wait on a
    /// locked database instead of failing immediately.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let manager = SqliteConnectionManager::file(path.as_ref())
            .with_init(|conn| conn.busy_timeout(Duration::from_secs(5)));
        let pool = Pool::builder().max_size(4).build(manager)?;
        Self::from_pool(pool)
    }

    /// In-memory store for tests.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// capped at one connection.
    pub fn in_memory() -> Result<Self, DirectoryError> {
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())?;
        Self::from_pool(pool)
    }

    fn from_pool(pool: DbPool) -> Result<Self, DirectoryError> {
        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Insert a channel or replace the URL of an existing one.
    pub fn upsert(&self, channel: &Channel) -> Result<(), DirectoryError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO channels (code, upstream_url) VALUES (:code, :url)
             ON CONFLICT(code) DO UPDATE SET
                upstream_url = excluded.upstream_url,
                updated_at = datetime('now')",
            rusqlite::named_params! {
                ":code": channel.code,
                ":url": channel.upstream_url,
            },
        )?;
        Ok(())
    }

    /// Delete a channel; returns whether it existed.
    pub fn remove(&self, code: &str) -> Result<bool, DirectoryError> {
        let conn = self.pool.get()?;
        let deleted = conn.execute(
            "DELETE FROM channels WHERE code = :code",
            rusqlite::named_params! { ":code": code },
        )?;
        Ok(deleted > 0)
    }

    /// All channels ordered by code.
    pub fn list(&self) -> Result<Vec<Channel>, DirectoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT code, upstream_url FROM channels ORDER BY code")?;
        let channels = stmt
            .query_map([], |row| {
                Ok(Channel {
                    code: row.get(0)?,
                    upstream_url: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(channels)
    }
}

impl ChannelDirectory for SqliteDirectory {
    fn find_by_code(&self, code: &str) -> Result<Option<Channel>, DirectoryError> {
        let conn = self.pool.get()?;
        let channel = conn
            .query_row(
                "SELECT code, upstream_url FROM channels WHERE code = :code",
                rusqlite::named_params! { ":code": code },
                |row| {
                    Ok(Channel {
                        code: row.get(0)?,
                        upstream_url: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(channel)
    }
}

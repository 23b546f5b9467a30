//! Versioned schema setup for the local document store.
//!
//! [`MIGRATIONS`] is an ordered list of schema steps; step `n` (1-based)
//! takes the database to version `n`. The applied version lives in the
//! `metadata` table and each step commits together with its version bump.

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Error, Result};

use super::schema::{CREATE_METADATA_TABLE, SCHEMA_STATEMENTS};

/// Schema steps in the order they are applied.
const MIGRATIONS: &[&[&str]] = &[SCHEMA_STATEMENTS];

/// The schema version a fully migrated database is at.
pub const CURRENT_VERSION: usize = MIGRATIONS.len();

const VERSION_KEY: &str = "schema_version";

/// Bring the database schema up to [`CURRENT_VERSION`].
///
/// Safe to call on every open; steps already applied are skipped.
///
/// # Errors
///
/// Returns an error if a step fails, the stored version is unreadable, or the
/// database was written by a newer schema.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let applied = schema_version(conn)?;
    if applied > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database is at schema version {applied}, newer than supported {CURRENT_VERSION}"
            ),
        });
    }

    for (index, statements) in MIGRATIONS.iter().enumerate().skip(applied) {
        let version = index + 1;
        let tx = conn.unchecked_transaction()?;
        for statement in *statements {
            tx.execute(statement, [])?;
        }
        tx.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            (VERSION_KEY, version.to_string()),
        )?;
        tx.commit()?;
        debug!("Applied schema version {}", version);
    }

    Ok(())
}

/// Stored schema version; 0 for a database that has never been migrated.
fn schema_version(conn: &Connection) -> Result<usize> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

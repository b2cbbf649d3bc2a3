#![forbid(unsafe_code)]

mod console;
mod error;
mod requests;
mod schema;
mod tags;
mod translations;
mod types;
mod words;

pub use error::StoreError;
pub use requests::*;
pub use types::*;

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vc_core::logbook::{LogService, LogSource};

const DB_FILE_NAME: &str = "vocab.db";

/// Single-writer SQLite store for words, their translations and tags.
///
/// Every write method records failures in the injected [`LogService`] before
/// returning them, so callers can degrade to an empty result without losing
/// the diagnostic.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
    logbook: LogService,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>, logbook: LogService) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        // Cascading deletes of translations and tags depend on this.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        preflight_gate(&conn)?;
        install_schema(&conn)?;

        logbook.info(
            LogSource::Database,
            "Database opened",
            Some(format!("path={}", db_path.display())),
        );

        Ok(Self {
            conn,
            storage_dir,
            logbook,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(DB_FILE_NAME)
    }

    pub fn logbook(&self) -> &LogService {
        &self.logbook
    }

    fn logged<T>(&self, operation: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(err) = &result {
            self.logbook.error(
                LogSource::Database,
                format!("{operation} failed"),
                Some(format!("code={} error={err}", err.code())),
            );
        }
        result
    }
}

fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let has_table = |name: &str| -> Result<bool, StoreError> {
        Ok(conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1",
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .is_some())
    };

    let has_words = has_table("words")?;
    if !has_table("meta")? {
        if has_words {
            return Err(StoreError::InvalidInput(
                "RESET_REQUIRED: schema state row is missing",
            ));
        }
        return Ok(());
    }

    let version = conn
        .query_row(
            "SELECT value FROM meta WHERE key='schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match version.as_deref() {
        Some(v) if v == schema::SCHEMA_VERSION => Ok(()),
        Some(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
        None if has_words => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema state row is missing",
        )),
        None => Ok(()),
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(&schema::full_schema_sql())?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", schema::SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Maps a foreign-key failure on a `word_id` column to [`StoreError::UnknownId`].
fn map_missing_word(err: rusqlite::Error) -> StoreError {
    if is_foreign_key_violation(&err) {
        return StoreError::UnknownId;
    }
    StoreError::Sql(err)
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
                || (code.code == ErrorCode::ConstraintViolation
                    && message
                        .as_deref()
                        .is_some_and(|value| value.contains("FOREIGN KEY constraint failed")))
        }
        _ => false,
    }
}
